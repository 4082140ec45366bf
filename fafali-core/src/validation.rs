use regex::Regex;
use std::sync::LazyLock;

use fafali_store::ValidationRules;

use crate::forms::{PasswordChange, ProfilePatch, Registration};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("valid phone regex"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Spaces, dashes and parentheses are formatting and ignored
pub fn is_valid_phone(value: &str) -> bool {
    let digits: String = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    PHONE_RE.is_match(&digits)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationError(pub Vec<FieldError>);

impl ValidationError {
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|e| e.field)
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message.as_str())
    }
}

/// Form checks run before a form reaches the store. The store itself only
/// enforces email uniqueness.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: ValidationRules,
}

#[derive(Default)]
struct Collector(Vec<FieldError>);

impl Collector {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn required(&mut self, field: &'static str, label: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.push(field, format!("{} is required", label));
            false
        } else {
            true
        }
    }

    fn email(&mut self, field: &'static str, value: &str) {
        if !is_valid_email(value) {
            self.push(field, "Please enter a valid email address");
        }
    }

    fn phone(&mut self, field: &'static str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            if !is_valid_phone(value) {
                self.push(field, "Please enter a valid phone number");
            }
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError(self.0))
        }
    }
}

impl Validator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    fn password_length(&self, errors: &mut Collector, field: &'static str, password: &str) {
        if password.chars().count() < self.rules.min_password_length {
            errors.push(
                field,
                format!(
                    "Password must be at least {} characters long",
                    self.rules.min_password_length
                ),
            );
        }
    }

    pub fn check_registration(&self, form: &Registration) -> Result<(), ValidationError> {
        let mut errors = Collector::default();

        errors.required("firstName", "First Name", &form.first_name);
        errors.required("lastName", "Last Name", &form.last_name);
        if errors.required("email", "Email", &form.email) {
            errors.email("email", &form.email);
        }
        if errors.required("password", "Password", form.password.expose()) {
            self.password_length(&mut errors, "password", form.password.expose());
        }
        if let Some(confirm) = &form.confirm_password {
            if confirm != &form.password {
                errors.push("confirmPassword", "Passwords do not match");
            }
        }
        errors.phone("phone", form.phone.as_deref());

        errors.finish()
    }

    /// Only fields present in the patch are checked
    pub fn check_profile(&self, patch: &ProfilePatch) -> Result<(), ValidationError> {
        let mut errors = Collector::default();

        if let Some(first_name) = &patch.first_name {
            errors.required("firstName", "First Name", first_name);
        }
        if let Some(last_name) = &patch.last_name {
            errors.required("lastName", "Last Name", last_name);
        }
        if let Some(email) = &patch.email {
            if errors.required("email", "Email", email) {
                errors.email("email", email);
            }
        }
        errors.phone("phone", patch.phone.as_deref());

        errors.finish()
    }

    pub fn check_password_change(&self, form: &PasswordChange) -> Result<(), ValidationError> {
        let mut errors = Collector::default();

        errors.required("currentPassword", "Current Password", form.current_password.expose());
        if form.new_password != form.confirm_new_password {
            errors.push("confirmNewPassword", "New passwords do not match");
        }
        self.password_length(&mut errors, "newPassword", form.new_password.expose());

        errors.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fafali_shared::Masked;

    fn form() -> Registration {
        Registration {
            email: "kofi@example.com".to_string(),
            password: Masked::from("secret1"),
            confirm_password: Some(Masked::from("secret1")),
            first_name: "Kofi".to_string(),
            last_name: "Boateng".to_string(),
            phone: Some("+233 (20) 123-4567".to_string()),
            country: None,
        }
    }

    #[test]
    fn test_email_and_phone_patterns() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));

        assert!(is_valid_phone("+233 (20) 123-4567"));
        assert!(!is_valid_phone("0201234567"));
        assert!(!is_valid_phone("+1234567890123456789"));
    }

    #[test]
    fn test_valid_registration_passes() {
        assert!(Validator::default().check_registration(&form()).is_ok());
    }

    #[test]
    fn test_registration_collects_every_problem() {
        let mut bad = form();
        bad.first_name = "  ".to_string();
        bad.email = "kofi".to_string();
        bad.password = Masked::from("abc");
        bad.confirm_password = Some(Masked::from("abd"));

        let err = Validator::default().check_registration(&bad).unwrap_err();
        let fields: Vec<_> = err.fields().collect();
        assert_eq!(fields, vec!["firstName", "email", "password", "confirmPassword"]);
        assert_eq!(err.message_for("firstName"), Some("First Name is required"));
        assert_eq!(
            err.message_for("password"),
            Some("Password must be at least 6 characters long")
        );
    }

    #[test]
    fn test_password_change_rules_follow_config() {
        let validator = Validator::new(ValidationRules { min_password_length: 8 });
        let change = PasswordChange {
            current_password: Masked::from("secret1"),
            new_password: Masked::from("newpass"),
            confirm_new_password: Masked::from("newpass"),
        };

        let err = validator.check_password_change(&change).unwrap_err();
        assert_eq!(
            err.message_for("newPassword"),
            Some("Password must be at least 8 characters long")
        );

        let mismatch = PasswordChange {
            confirm_new_password: Masked::from("newpass2"),
            ..change
        };
        let err = Validator::default().check_password_change(&mismatch).unwrap_err();
        assert_eq!(err.message_for("confirmNewPassword"), Some("New passwords do not match"));
    }

    #[test]
    fn test_profile_patch_checks_only_present_fields() {
        let patch = ProfilePatch {
            phone: Some("12".to_string()),
            ..Default::default()
        };
        assert!(Validator::default().check_profile(&patch).is_ok());

        let patch = ProfilePatch {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(Validator::default().check_profile(&patch).is_err());
    }
}
