use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::records::{Application, Booking};
use crate::pii::Masked;

/// Per-account notification preferences
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationSettings {
    pub email: bool,
    pub booking: bool,
    pub marketing: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email: true,
            booking: true,
            marketing: false,
        }
    }
}

fn default_active() -> bool {
    true
}

/// A registered account and everything attached to it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub password: Masked<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_settings: Option<NotificationSettings>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Stamp the record as modified now
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
