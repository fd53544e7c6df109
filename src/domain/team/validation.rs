//! Team validation utilities

use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Contact email address cannot be empty")]
    EmptyContactEmail,

    #[error("Contact email address is not valid")]
    InvalidContactEmail,

    #[error("Affiliation exceeds maximum length of {0} characters")]
    AffiliationTooLong(usize),

    #[error("Country cannot be empty")]
    EmptyCountry,

    #[error("Country exceeds maximum length of {0} characters")]
    CountryTooLong(usize),

    #[error("Net number must not be negative, got {0}")]
    NegativeNetNumber(i32),
}

const MAX_AFFILIATION_LENGTH: usize = 100;
const MAX_COUNTRY_LENGTH: usize = 100;

/// Validate the informal contact email address of a team
pub fn validate_contact_email(email: &str) -> Result<(), TeamValidationError> {
    if email.is_empty() {
        return Err(TeamValidationError::EmptyContactEmail);
    }

    // Same well-formedness check the user module applies to account addresses
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2
        || parts[0].is_empty()
        || !parts[1].contains('.')
        || parts[1].starts_with('.')
        || parts[1].ends_with('.')
        || email.contains(char::is_whitespace)
    {
        return Err(TeamValidationError::InvalidContactEmail);
    }

    Ok(())
}

/// Validate a team's affiliation, which is optional but length-limited
pub fn validate_affiliation(affiliation: &str) -> Result<(), TeamValidationError> {
    if affiliation.len() > MAX_AFFILIATION_LENGTH {
        return Err(TeamValidationError::AffiliationTooLong(
            MAX_AFFILIATION_LENGTH,
        ));
    }

    Ok(())
}

/// Validate a team's country
pub fn validate_country(country: &str) -> Result<(), TeamValidationError> {
    if country.is_empty() {
        return Err(TeamValidationError::EmptyCountry);
    }

    if country.len() > MAX_COUNTRY_LENGTH {
        return Err(TeamValidationError::CountryTooLong(MAX_COUNTRY_LENGTH));
    }

    Ok(())
}

/// Validate an explicitly assigned net number
pub fn validate_net_number(net_number: i32) -> Result<(), TeamValidationError> {
    if net_number < 0 {
        return Err(TeamValidationError::NegativeNetNumber(net_number));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_contact_emails() {
        assert!(validate_contact_email("team@example.com").is_ok());
        assert!(validate_contact_email("a.b+c@sub.example.org").is_ok());
    }

    #[test]
    fn test_invalid_contact_emails() {
        assert_eq!(
            validate_contact_email(""),
            Err(TeamValidationError::EmptyContactEmail)
        );
        assert_eq!(
            validate_contact_email("no-at-sign"),
            Err(TeamValidationError::InvalidContactEmail)
        );
        assert_eq!(
            validate_contact_email("two@@example.com"),
            Err(TeamValidationError::InvalidContactEmail)
        );
        assert_eq!(
            validate_contact_email("no-tld@example"),
            Err(TeamValidationError::InvalidContactEmail)
        );
    }

    #[test]
    fn test_affiliation_length() {
        assert!(validate_affiliation("").is_ok());
        assert!(validate_affiliation("Some University").is_ok());
        assert_eq!(
            validate_affiliation(&"a".repeat(101)),
            Err(TeamValidationError::AffiliationTooLong(100))
        );
    }

    #[test]
    fn test_country() {
        assert!(validate_country("Germany").is_ok());
        assert_eq!(validate_country(""), Err(TeamValidationError::EmptyCountry));
        assert_eq!(
            validate_country(&"a".repeat(101)),
            Err(TeamValidationError::CountryTooLong(100))
        );
    }

    #[test]
    fn test_net_number() {
        assert!(validate_net_number(0).is_ok());
        assert!(validate_net_number(42).is_ok());
        assert_eq!(
            validate_net_number(-1),
            Err(TeamValidationError::NegativeNetNumber(-1))
        );
    }
}
