use chrono::NaiveDate;
use serde::Serialize;

use crate::store::AccountStore;
use fafali_shared::{
    Application, ApplicationStatus, Booking, BookingStatus, NotificationSettings, User,
};

/// Colour family a status badge renders in
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl From<&ApplicationStatus> for StatusTone {
    fn from(status: &ApplicationStatus) -> Self {
        match status {
            ApplicationStatus::Pending | ApplicationStatus::Other(_) => StatusTone::Pending,
            ApplicationStatus::Approved => StatusTone::Approved,
            ApplicationStatus::Rejected => StatusTone::Rejected,
            ApplicationStatus::Completed => StatusTone::Completed,
        }
    }
}

impl From<&BookingStatus> for StatusTone {
    fn from(status: &BookingStatus) -> Self {
        match status {
            BookingStatus::Confirmed => StatusTone::Approved,
            BookingStatus::Cancelled => StatusTone::Rejected,
            BookingStatus::Completed => StatusTone::Completed,
            BookingStatus::Other(_) => StatusTone::Pending,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Applications not yet completed
    pub active_applications: usize,
    pub total_bookings: usize,
    /// Completed applications plus completed bookings
    pub completed_services: usize,
}

impl DashboardStats {
    pub fn for_user(user: &User) -> Self {
        let completed_apps = user.applications.iter().filter(|a| a.is_completed()).count();
        let completed_bookings = user.bookings.iter().filter(|b| b.is_completed()).count();

        Self {
            active_applications: user.applications.len() - completed_apps,
            total_bookings: user.bookings.len(),
            completed_services: completed_apps + completed_bookings,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub member_since: NaiveDate,
}

impl ProfileView {
    pub fn for_user(user: &User) -> Self {
        fn or_placeholder(value: &Option<String>, placeholder: &str) -> String {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .unwrap_or(placeholder)
                .to_string()
        }

        Self {
            full_name: user.full_name(),
            email: user.email.clone(),
            phone: or_placeholder(&user.phone, "Not provided"),
            country: or_placeholder(&user.country, "Not specified"),
            member_since: user.created_at.date_naive(),
        }
    }

    /// e.g. "January 5, 2024"
    pub fn member_since_label(&self) -> String {
        self.member_since.format("%B %-d, %Y").to_string()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCard {
    pub id: String,
    pub title: String,
    pub destination: String,
    pub status_label: String,
    pub tone: StatusTone,
    pub applied_on: NaiveDate,
    pub travel_date: Option<NaiveDate>,
    pub notes: Option<String>,
    /// Only pending applications can still be edited
    pub editable: bool,
}

impl From<&Application> for ApplicationCard {
    fn from(app: &Application) -> Self {
        Self {
            id: app.id.clone(),
            title: if app.visa_type.is_empty() {
                "Visa Application".to_string()
            } else {
                app.visa_type.clone()
            },
            destination: if app.destination.is_empty() {
                "Not specified".to_string()
            } else {
                app.destination.clone()
            },
            status_label: capitalize(app.status.as_str()),
            tone: (&app.status).into(),
            applied_on: app.created_at.date_naive(),
            travel_date: app.travel_date,
            notes: Some(app.notes.clone()).filter(|n| !n.is_empty()),
            editable: app.status == ApplicationStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingCard {
    pub id: String,
    pub title: String,
    pub destination: Option<String>,
    pub status_label: String,
    pub tone: StatusTone,
    pub booked_on: NaiveDate,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub flight_date: Option<NaiveDate>,
    pub special_requests: Option<String>,
    /// Only confirmed bookings can be modified
    pub modifiable: bool,
}

impl From<&Booking> for BookingCard {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id.clone(),
            title: if booking.booking_type.is_empty() {
                "Booking".to_string()
            } else {
                booking.booking_type.clone()
            },
            destination: booking.destination.clone().filter(|d| !d.is_empty()),
            status_label: capitalize(booking.status.as_str()),
            tone: (&booking.status).into(),
            booked_on: booking.created_at.date_naive(),
            check_in: booking.check_in,
            check_out: booking.check_out,
            flight_date: booking.flight_date,
            special_requests: Some(booking.special_requests.clone()).filter(|s| !s.is_empty()),
            modifiable: booking.status == BookingStatus::Confirmed,
        }
    }
}

/// Everything the dashboard view renders for one account
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub greeting_name: String,
    pub profile: ProfileView,
    pub stats: DashboardStats,
    pub applications: Vec<ApplicationCard>,
    pub bookings: Vec<BookingCard>,
    pub notifications: NotificationSettings,
}

impl Dashboard {
    pub fn for_user(user: &User) -> Self {
        Self {
            greeting_name: user.first_name.clone(),
            profile: ProfileView::for_user(user),
            stats: DashboardStats::for_user(user),
            applications: user.applications.iter().map(ApplicationCard::from).collect(),
            bookings: user.bookings.iter().map(BookingCard::from).collect(),
            notifications: user.notification_settings.unwrap_or_default(),
        }
    }

    /// Dashboard for whoever is signed in; `None` when nobody is, or the
    /// session points at an account that no longer exists.
    pub fn for_current(store: &AccountStore) -> Option<Self> {
        store.current_user().map(Self::for_user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fafali_shared::{ApplicationDraft, BookingDraft, Masked};

    fn user() -> User {
        User {
            id: "1".to_string(),
            email: "ama@example.com".to_string(),
            password: Masked::from("secret1"),
            first_name: "Ama".to_string(),
            last_name: "Mensah".to_string(),
            phone: None,
            country: Some("Ghana".to_string()),
            is_active: true,
            created_at: Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap(),
            updated_at: None,
            applications: vec![],
            bookings: vec![],
            notification_settings: None,
        }
    }

    #[test]
    fn test_stats_count_completed_across_both_lists() {
        let mut user = user();
        let mut done = Application::new("10".to_string(), ApplicationDraft::default());
        done.status = ApplicationStatus::Completed;
        user.applications.push(done);
        user.applications.push(Application::new("11".to_string(), ApplicationDraft::default()));

        let mut trip = Booking::new("12".to_string(), BookingDraft::default());
        trip.status = BookingStatus::Completed;
        user.bookings.push(trip);
        user.bookings.push(Booking::new("13".to_string(), BookingDraft::default()));

        let stats = DashboardStats::for_user(&user);
        assert_eq!(stats, DashboardStats {
            active_applications: 1,
            total_bookings: 2,
            completed_services: 2,
        });
    }

    #[test]
    fn test_profile_placeholders() {
        let profile = ProfileView::for_user(&user());
        assert_eq!(profile.phone, "Not provided");
        assert_eq!(profile.country, "Ghana");
        assert_eq!(profile.member_since_label(), "January 5, 2024");
    }

    #[test]
    fn test_cards_and_allowed_actions() {
        let app = Application::new("10".to_string(), ApplicationDraft::default());
        let card = ApplicationCard::from(&app);
        assert_eq!(card.title, "Visa Application");
        assert_eq!(card.status_label, "Pending");
        assert_eq!(card.tone, StatusTone::Pending);
        assert!(card.editable);
        assert!(card.notes.is_none());

        let mut booking = Booking::new("11".to_string(), BookingDraft {
            booking_type: "Hotel".to_string(),
            ..Default::default()
        });
        assert!(BookingCard::from(&booking).modifiable);

        booking.status = BookingStatus::Cancelled;
        let card = BookingCard::from(&booking);
        assert_eq!(card.tone, StatusTone::Rejected);
        assert_eq!(card.status_label, "Cancelled");
        assert!(!card.modifiable);
    }

    #[test]
    fn test_notification_defaults() {
        let dashboard = Dashboard::for_user(&user());
        assert_eq!(dashboard.notifications, NotificationSettings::default());
        assert!(dashboard.notifications.email);
        assert!(!dashboard.notifications.marketing);
        assert_eq!(dashboard.greeting_name, "Ama");
    }

    #[test]
    fn test_unknown_status_renders_as_pending() {
        let mut app = Application::new("10".to_string(), ApplicationDraft::default());
        app.status = ApplicationStatus::Other("processing".to_string());
        let card = ApplicationCard::from(&app);
        assert_eq!(card.tone, StatusTone::Pending);
        assert_eq!(card.status_label, "Processing");
        assert!(!card.editable);

        let mut booking = Booking::new("11".to_string(), BookingDraft::default());
        booking.status = BookingStatus::Other("on hold".to_string());
        let card = BookingCard::from(&booking);
        assert_eq!(card.tone, StatusTone::Pending);
        assert!(!card.modifiable);

        let mut user = user();
        user.applications.push(app);
        assert_eq!(DashboardStats::for_user(&user).active_applications, 1);
    }
}
