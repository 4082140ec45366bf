use tracing::{debug, info, warn};

use fafali_shared::Session;
use fafali_store::{AreaKind, Areas, StorageArea};

use crate::navigation::Route;
use crate::AccountResult;

/// Reads and writes the signed-in session.
///
/// The session lives under one key in either the durable or the tab-scoped
/// area. Lookups check the durable area first.
#[derive(Clone)]
pub struct SessionHolder {
    areas: Areas,
    key: String,
}

impl SessionHolder {
    pub fn new(areas: Areas, key: impl Into<String>) -> Self {
        Self {
            areas,
            key: key.into(),
        }
    }

    /// Raw serialized session and the area holding it
    fn read_raw(&self) -> Option<(AreaKind, String)> {
        for kind in [AreaKind::Durable, AreaKind::TabScoped] {
            match self.areas.get(kind).get_item(&self.key) {
                Ok(Some(raw)) if !raw.is_empty() => return Some((kind, raw)),
                Ok(_) => {}
                Err(e) => warn!("Reading session from {} storage failed: {}", kind, e),
            }
        }
        None
    }

    /// The current session and its area; malformed content counts as absent
    pub fn locate(&self) -> Option<(AreaKind, Session)> {
        let (kind, raw) = self.read_raw()?;
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Some((kind, session)),
            Err(e) => {
                warn!("Ignoring malformed session in {} storage: {}", kind, e);
                None
            }
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.locate().map(|(_, session)| session)
    }

    pub fn is_active(&self) -> bool {
        self.current().is_some_and(|s| s.is_active())
    }

    /// Store a fresh session in the area picked by `remember`, dropping any
    /// copy from the other area.
    pub fn start(&self, session: &Session, remember: bool) -> AccountResult<AreaKind> {
        let (target, other) = if remember {
            (AreaKind::Durable, AreaKind::TabScoped)
        } else {
            (AreaKind::TabScoped, AreaKind::Durable)
        };

        self.write(target, session)?;
        self.areas.get(other).remove_item(&self.key)?;
        info!("Session started for user {} in {} storage", session.id, target);
        Ok(target)
    }

    pub(crate) fn write(&self, kind: AreaKind, session: &Session) -> AccountResult<()> {
        let raw = serde_json::to_string(session)?;
        self.areas.get(kind).set_item(&self.key, &raw)?;
        debug!("Session for user {} written to {} storage", session.id, kind);
        Ok(())
    }

    /// Remove the session from both areas
    pub fn clear(&self) -> AccountResult<()> {
        self.areas.durable.remove_item(&self.key)?;
        self.areas.tab.remove_item(&self.key)?;
        Ok(())
    }

    /// Clear the session and return where the visitor goes next
    pub fn sign_out(&self) -> AccountResult<Route> {
        self.clear()?;
        info!("Signed out");
        Ok(Route::Landing)
    }

    /// Guard for protected views: the active session, or the sign-in route to
    /// redirect to.
    pub fn require_active(&self) -> Result<Session, Route> {
        match self.current() {
            Some(session) if session.is_active() => Ok(session),
            _ => {
                debug!("No active session, redirecting to {}", Route::SignIn);
                Err(Route::SignIn)
            }
        }
    }

    /// Guard applied when a view is opened by path
    pub fn guard(&self, route: Route) -> Result<Option<Session>, Route> {
        if route.is_protected() {
            self.require_active().map(Some)
        } else {
            Ok(self.current())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "fafaliUserSession";

    fn signed_in(id: &str) -> Session {
        Session {
            id: id.to_string(),
            email: "ama@example.com".to_string(),
            first_name: "Ama".to_string(),
            last_name: "Mensah".to_string(),
            is_logged_in: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_start_moves_session_between_areas() {
        let areas = Areas::in_memory();
        let holder = SessionHolder::new(areas.clone(), KEY);

        assert_eq!(holder.start(&signed_in("1"), false).unwrap(), AreaKind::TabScoped);
        assert!(areas.durable.get_item(KEY).unwrap().is_none());

        assert_eq!(holder.start(&signed_in("1"), true).unwrap(), AreaKind::Durable);
        assert!(areas.tab.get_item(KEY).unwrap().is_none());
        assert!(holder.is_active());
    }

    #[test]
    fn test_malformed_session_is_absent() {
        let areas = Areas::in_memory();
        areas.durable.set_item(KEY, "{not json").unwrap();
        let holder = SessionHolder::new(areas, KEY);

        assert!(holder.current().is_none());
        assert!(!holder.is_active());
        assert_eq!(holder.require_active(), Err(Route::SignIn));
    }

    #[test]
    fn test_durable_session_wins_lookup() {
        let areas = Areas::in_memory();
        let holder = SessionHolder::new(areas.clone(), KEY);
        holder.write(AreaKind::TabScoped, &signed_in("tab")).unwrap();
        holder.write(AreaKind::Durable, &signed_in("durable")).unwrap();

        let (kind, session) = holder.locate().unwrap();
        assert_eq!(kind, AreaKind::Durable);
        assert_eq!(session.id, "durable");
    }

    #[test]
    fn test_sign_out_clears_both_areas() {
        let areas = Areas::in_memory();
        let holder = SessionHolder::new(areas.clone(), KEY);
        holder.write(AreaKind::TabScoped, &signed_in("1")).unwrap();
        holder.write(AreaKind::Durable, &signed_in("2")).unwrap();

        assert_eq!(holder.sign_out().unwrap(), Route::Landing);
        assert!(areas.durable.get_item(KEY).unwrap().is_none());
        assert!(areas.tab.get_item(KEY).unwrap().is_none());
    }

    #[test]
    fn test_guard_only_blocks_protected_routes() {
        let holder = SessionHolder::new(Areas::in_memory(), KEY);

        assert_eq!(holder.guard(Route::Dashboard), Err(Route::SignIn));
        assert_eq!(holder.guard(Route::Landing), Ok(None));
    }
}
