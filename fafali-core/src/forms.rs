use chrono::{DateTime, Utc};
use serde::Deserialize;

use fafali_shared::{Masked, NotificationSettings, Session, User};

/// Sign-up form contents
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub email: String,
    pub password: Masked<String>,
    /// Only checked by the form; never stored
    #[serde(default)]
    pub confirm_password: Option<Masked<String>>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl Registration {
    pub(crate) fn into_user(self, id: String, created_at: DateTime<Utc>) -> User {
        User {
            id,
            email: self.email,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            country: self.country,
            is_active: true,
            created_at,
            updated_at: None,
            applications: Vec::new(),
            bookings: Vec::new(),
            notification_settings: None,
        }
    }
}

/// Profile edit: every `Some` field overwrites the stored one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub notification_settings: Option<NotificationSettings>,
}

impl ProfilePatch {
    pub fn notifications(settings: NotificationSettings) -> Self {
        Self {
            notification_settings: Some(settings),
            ..Self::default()
        }
    }

    pub(crate) fn apply_to(&self, user: &mut User) {
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(country) = &self.country {
            user.country = Some(country.clone());
        }
        if let Some(settings) = self.notification_settings {
            user.notification_settings = Some(settings);
        }
    }

    /// Copy name and email onto a session. Blank values keep what the session had.
    pub(crate) fn mirror_into(&self, session: &mut Session) {
        fn pick(patch: &Option<String>, current: &mut String) {
            if let Some(value) = patch.as_deref().filter(|v| !v.is_empty()) {
                *current = value.to_string();
            }
        }

        pick(&self.first_name, &mut session.first_name);
        pick(&self.last_name, &mut session.last_name);
        pick(&self.email, &mut session.email);
    }
}

/// Password change form contents
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: Masked<String>,
    pub new_password: Masked<String>,
    pub confirm_new_password: Masked<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        Registration {
            email: "ama@example.com".to_string(),
            password: Masked::from("secret1"),
            confirm_password: Some(Masked::from("secret1")),
            first_name: "Ama".to_string(),
            last_name: "Mensah".to_string(),
            phone: Some("+233 20 123 4567".to_string()),
            country: None,
        }
        .into_user("1".to_string(), Utc::now())
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut user = sample_user();
        let patch = ProfilePatch {
            country: Some("Ghana".to_string()),
            ..Default::default()
        };

        patch.apply_to(&mut user);
        assert_eq!(user.country.as_deref(), Some("Ghana"));
        assert_eq!(user.first_name, "Ama");
        assert_eq!(user.phone.as_deref(), Some("+233 20 123 4567"));
    }

    #[test]
    fn test_mirror_ignores_blank_values() {
        let user = sample_user();
        let mut session = Session::for_user(&user);
        let patch = ProfilePatch {
            first_name: Some(String::new()),
            last_name: Some("Owusu".to_string()),
            ..Default::default()
        };

        patch.mirror_into(&mut session);
        assert_eq!(session.first_name, "Ama");
        assert_eq!(session.last_name, "Owusu");
        assert_eq!(session.email, "ama@example.com");
    }

    #[test]
    fn test_registration_drops_confirmation() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("confirmPassword").is_none());
        assert_eq!(json["isActive"], true);
    }
}
