use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visa application status in the review lifecycle.
///
/// Stored as a plain string. Values outside the known set are kept verbatim
/// in `Other` and written back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Completed,
    Other(String),
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Completed => "completed",
            ApplicationStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for ApplicationStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => ApplicationStatus::Pending,
            "approved" => ApplicationStatus::Approved,
            "rejected" => ApplicationStatus::Rejected,
            "completed" => ApplicationStatus::Completed,
            _ => ApplicationStatus::Other(raw),
        }
    }
}

impl From<ApplicationStatus> for String {
    fn from(status: ApplicationStatus) -> Self {
        match status {
            ApplicationStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Travel booking status; unknown stored values land in `Other`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Cancelled,
    Completed,
    Other(String),
}

impl BookingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for BookingStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "confirmed" => BookingStatus::Confirmed,
            "cancelled" => BookingStatus::Cancelled,
            "completed" => BookingStatus::Completed,
            _ => BookingStatus::Other(raw),
        }
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A visa-service request attached to a user account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub visa_type: String,
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new application
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    pub visa_type: String,
    pub destination: String,
    #[serde(default)]
    pub travel_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl Application {
    /// New applications always enter review as `pending`
    pub fn new(id: String, draft: ApplicationDraft) -> Self {
        Self {
            id,
            visa_type: draft.visa_type,
            destination: draft.destination,
            travel_date: draft.travel_date,
            notes: draft.notes,
            status: ApplicationStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ApplicationStatus::Completed
    }
}

/// A travel-service reservation attached to a user account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub booking_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_date: Option<NaiveDate>,
    #[serde(default)]
    pub special_requests: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub booking_type: String,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub check_in: Option<NaiveDate>,
    #[serde(default)]
    pub check_out: Option<NaiveDate>,
    #[serde(default)]
    pub flight_date: Option<NaiveDate>,
    #[serde(default)]
    pub special_requests: String,
}

impl Booking {
    pub fn new(id: String, draft: BookingDraft) -> Self {
        Self {
            id,
            booking_type: draft.booking_type,
            destination: draft.destination,
            check_in: draft.check_in,
            check_out: draft.check_out,
            flight_date: draft.flight_date,
            special_requests: draft.special_requests,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == BookingStatus::Completed
    }
}
