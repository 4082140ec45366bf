pub mod dashboard;
pub mod forms;
pub mod ids;
pub mod navigation;
pub mod session;
pub mod store;
pub mod validation;

pub use dashboard::Dashboard;
pub use forms::{PasswordChange, ProfilePatch, Registration};
pub use navigation::{NavigationState, Route};
pub use session::SessionHolder;
pub use store::AccountStore;
pub use validation::{FieldError, ValidationError, Validator};

use fafali_store::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("User with this email already exists: {0}")]
    DuplicateEmail(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account is deactivated")]
    AccountDeactivated,
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("Current password is incorrect")]
    PasswordMismatch,
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type AccountResult<T> = Result<T, AccountError>;
