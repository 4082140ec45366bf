pub mod models;
pub mod pii;

pub use models::account::{NotificationSettings, User};
pub use models::records::{
    Application, ApplicationDraft, ApplicationStatus, Booking, BookingDraft, BookingStatus,
};
pub use models::session::Session;
pub use pii::Masked;
