//! Team entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    validate_affiliation, validate_contact_email, validate_country, validate_net_number,
    TeamValidationError,
};
use crate::domain::user::UserId;

/// Competition team, keyed one-to-one by the owning user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Account this team belongs to
    user_id: UserId,
    /// Informal contact email address, independent of the account address
    informal_email: String,
    /// Institution or group the team plays for
    #[serde(skip_serializing_if = "Option::is_none")]
    affiliation: Option<String>,
    /// Country the team plays from
    country: String,
    /// Whether this is the NOP team targeted by exploit checks
    nop_team: bool,
    /// Explicitly assigned net number, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    net_number: Option<i32>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team for a user account
    pub fn new(
        user_id: UserId,
        informal_email: impl Into<String>,
        country: impl Into<String>,
    ) -> Result<Self, TeamValidationError> {
        let informal_email = informal_email.into();
        validate_contact_email(&informal_email)?;
        let country = country.into();
        validate_country(&country)?;
        let now = Utc::now();

        Ok(Self {
            user_id,
            informal_email,
            affiliation: None,
            country,
            nop_team: false,
            net_number: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a team from stored values
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        user_id: UserId,
        informal_email: String,
        affiliation: Option<String>,
        country: String,
        nop_team: bool,
        net_number: Option<i32>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            informal_email,
            affiliation,
            country,
            nop_team,
            net_number,
            created_at,
            updated_at,
        }
    }

    /// Set affiliation (builder pattern)
    pub fn with_affiliation(
        mut self,
        affiliation: impl Into<String>,
    ) -> Result<Self, TeamValidationError> {
        let affiliation = affiliation.into();
        validate_affiliation(&affiliation)?;
        self.affiliation = Some(affiliation);
        Ok(self)
    }

    // Getters

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn informal_email(&self) -> &str {
        &self.informal_email
    }

    pub fn affiliation(&self) -> Option<&str> {
        self.affiliation.as_deref()
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn nop_team(&self) -> bool {
        self.nop_team
    }

    pub fn net_number(&self) -> Option<i32> {
        self.net_number
    }

    /// Net number the gameserver will use for this team
    ///
    /// The explicit assignment wins; without one, a numeric user ID doubles
    /// as the net number.
    pub fn effective_net_number(&self) -> Option<i32> {
        self.net_number
            .or_else(|| self.user_id.as_str().parse().ok())
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Update the informal contact email address
    pub fn set_informal_email(
        &mut self,
        email: impl Into<String>,
    ) -> Result<(), TeamValidationError> {
        let email = email.into();
        validate_contact_email(&email)?;
        self.informal_email = email;
        self.touch();
        Ok(())
    }

    /// Update the affiliation
    pub fn set_affiliation(
        &mut self,
        affiliation: Option<String>,
    ) -> Result<(), TeamValidationError> {
        if let Some(ref a) = affiliation {
            validate_affiliation(a)?;
        }
        self.affiliation = affiliation.filter(|a| !a.is_empty());
        self.touch();
        Ok(())
    }

    /// Update the country
    pub fn set_country(&mut self, country: impl Into<String>) -> Result<(), TeamValidationError> {
        let country = country.into();
        validate_country(&country)?;
        self.country = country;
        self.touch();
        Ok(())
    }

    /// Mark or unmark this team as the NOP team
    pub fn set_nop_team(&mut self, nop_team: bool) {
        self.nop_team = nop_team;
        self.touch();
    }

    /// Update the explicitly assigned net number
    pub fn set_net_number(&mut self, net_number: Option<i32>) -> Result<(), TeamValidationError> {
        if let Some(n) = net_number {
            validate_net_number(n)?;
        }
        self.net_number = net_number;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
