//! Shared in-memory storage backing the in-memory repositories
//!
//! Users and teams live in the same store so the user listing can compute
//! team presence without crossing repository boundaries, mirroring what the
//! Postgres backend does with a join.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::game_control::GameControl;
use crate::domain::team::Team;
use crate::domain::user::User;

/// In-memory database shared between repositories
#[derive(Debug, Default)]
pub struct InMemoryDb {
    pub(crate) users: RwLock<HashMap<String, User>>,
    pub(crate) teams: RwLock<HashMap<String, Team>>,
    pub(crate) game_control: RwLock<Option<GameControl>>,
}

impl InMemoryDb {
    /// Create a new empty database
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}
