use std::fmt;

use fafali_shared::Session;

/// Views the site can send a visitor to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    SignIn,
    SignUp,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "index.html",
            Route::SignIn => "signin.html",
            Route::SignUp => "signup.html",
            Route::Dashboard => "dashboard.html",
        }
    }

    /// Views that need a signed-in visitor
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard)
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let page = path.rsplit('/').next().unwrap_or(path);
        [Route::Landing, Route::SignIn, Route::SignUp, Route::Dashboard]
            .into_iter()
            .find(|route| route.path() == page)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub target: Route,
}

/// The account area of the nav bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub links: [NavLink; 2],
    pub display_name: Option<String>,
}

impl NavigationState {
    pub fn for_session(session: Option<&Session>) -> Self {
        match session.filter(|s| s.is_logged_in) {
            Some(session) => {
                let name = if session.first_name.is_empty() {
                    "User".to_string()
                } else {
                    session.first_name.clone()
                };
                Self {
                    links: [
                        NavLink { label: "Dashboard", target: Route::Dashboard },
                        NavLink { label: "Profile", target: Route::Dashboard },
                    ],
                    display_name: Some(name),
                }
            }
            None => Self {
                links: [
                    NavLink { label: "Sign In", target: Route::SignIn },
                    NavLink { label: "Sign Up", target: Route::SignUp },
                ],
                display_name: None,
            },
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.display_name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_out_links() {
        let nav = NavigationState::for_session(None);
        assert!(!nav.is_signed_in());
        assert_eq!(nav.links[0].label, "Sign In");
        assert_eq!(nav.links[1].target, Route::SignUp);
    }

    #[test]
    fn test_signed_in_links_fall_back_to_user() {
        let session = Session {
            id: "1".to_string(),
            is_logged_in: true,
            ..Default::default()
        };

        let nav = NavigationState::for_session(Some(&session));
        assert_eq!(nav.display_name.as_deref(), Some("User"));
        assert!(nav.links.iter().all(|l| l.target == Route::Dashboard));
    }

    #[test]
    fn test_route_from_path() {
        assert_eq!(Route::from_path("/site/dashboard.html"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("about.html"), None);
        assert!(Route::Dashboard.is_protected());
        assert!(!Route::SignIn.is_protected());
    }
}
