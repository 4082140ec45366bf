use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::account::User;

/// Lightweight record of who is signed in.
///
/// Every field defaults when missing so that a partially written record still
/// deserializes; `is_active` decides whether it counts as a live session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_logged_in: bool,
    pub login_time: DateTime<Utc>,
}

impl Session {
    pub fn for_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_logged_in: true,
            login_time: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_logged_in && !self.id.is_empty()
    }
}
