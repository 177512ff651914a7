//! Client-side routes and the access rules in front of them.

/// Root of the signed-in application.
pub const AGENDA_ROOT: &str = "/app/agenda";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Calendar,
    Clients,
    Services,
    Settings,
    /// Public booking page, no sign-in needed
    PublicBooking { slug: String },
    NotFound,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["app", "agenda"] => Self::Dashboard,
            ["app", "agenda", "login"] => Self::Login,
            ["app", "agenda", "calendar"] => Self::Calendar,
            ["app", "agenda", "clients"] => Self::Clients,
            ["app", "agenda", "services"] => Self::Services,
            ["app", "agenda", "settings"] => Self::Settings,
            ["agenda", slug] => Self::PublicBooking {
                slug: (*slug).to_string(),
            },
            _ => Self::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Login => format!("{AGENDA_ROOT}/login"),
            Self::Dashboard => AGENDA_ROOT.to_string(),
            Self::Calendar => format!("{AGENDA_ROOT}/calendar"),
            Self::Clients => format!("{AGENDA_ROOT}/clients"),
            Self::Services => format!("{AGENDA_ROOT}/services"),
            Self::Settings => format!("{AGENDA_ROOT}/settings"),
            Self::PublicBooking { slug } => format!("/agenda/{slug}"),
            Self::NotFound => "/".to_string(),
        }
    }

    /// Pages that require a signed-in user and a business.
    pub const fn is_protected(&self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Calendar | Self::Clients | Self::Services | Self::Settings
        )
    }

    /// Sidebar entries, in display order.
    pub fn navigation() -> [(Self, &'static str); 5] {
        [
            (Self::Dashboard, "Dashboard"),
            (Self::Calendar, "Calendar"),
            (Self::Clients, "Clients"),
            (Self::Services, "Services"),
            (Self::Settings, "Settings"),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    SignedOut,
    SignedIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessStatus {
    Loading,
    Missing,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Render,
    Redirect(Route),
    Loading,
    /// Signed in but no business yet
    Onboarding,
}

/// Decides what to show for `route` given the session and business state.
pub fn guard(route: &Route, session: SessionStatus, business: BusinessStatus) -> GuardOutcome {
    match route {
        Route::Login => match session {
            SessionStatus::Loading => GuardOutcome::Loading,
            SessionStatus::SignedIn => GuardOutcome::Redirect(Route::Dashboard),
            SessionStatus::SignedOut => GuardOutcome::Render,
        },
        r if r.is_protected() => match (session, business) {
            (SessionStatus::Loading, _) => GuardOutcome::Loading,
            (SessionStatus::SignedOut, _) => GuardOutcome::Redirect(Route::Login),
            (SessionStatus::SignedIn, BusinessStatus::Loading) => GuardOutcome::Loading,
            (SessionStatus::SignedIn, BusinessStatus::Missing) => GuardOutcome::Onboarding,
            (SessionStatus::SignedIn, BusinessStatus::Ready) => GuardOutcome::Render,
        },
        _ => GuardOutcome::Render,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_roundtrip() {
        let routes = [
            Route::Login,
            Route::Dashboard,
            Route::Calendar,
            Route::Clients,
            Route::Services,
            Route::Settings,
            Route::PublicBooking {
                slug: "marias-hair-salon".into(),
            },
        ];
        for route in routes {
            assert_eq!(Route::from_path(&route.path()), route);
        }
    }

    #[test]
    fn test_trailing_slash_and_unknown_paths() {
        assert_eq!(Route::from_path("/app/agenda/"), Route::Dashboard);
        assert_eq!(Route::from_path("/app/agenda/reports"), Route::NotFound);
        assert_eq!(Route::from_path("/agenda"), Route::NotFound);
        assert_eq!(Route::from_path("/"), Route::NotFound);
    }

    #[test]
    fn test_protected_routes_need_session() {
        assert_eq!(
            guard(&Route::Calendar, SessionStatus::SignedOut, BusinessStatus::Missing),
            GuardOutcome::Redirect(Route::Login)
        );
        assert_eq!(
            guard(&Route::Calendar, SessionStatus::Loading, BusinessStatus::Loading),
            GuardOutcome::Loading
        );
        assert_eq!(
            guard(&Route::Settings, SessionStatus::SignedIn, BusinessStatus::Ready),
            GuardOutcome::Render
        );
    }

    #[test]
    fn test_signed_in_without_business_goes_to_onboarding() {
        assert_eq!(
            guard(&Route::Dashboard, SessionStatus::SignedIn, BusinessStatus::Missing),
            GuardOutcome::Onboarding
        );
        assert_eq!(
            guard(&Route::Dashboard, SessionStatus::SignedIn, BusinessStatus::Loading),
            GuardOutcome::Loading
        );
    }

    #[test]
    fn test_login_redirects_when_signed_in() {
        assert_eq!(
            guard(&Route::Login, SessionStatus::SignedIn, BusinessStatus::Ready),
            GuardOutcome::Redirect(Route::Dashboard)
        );
        assert_eq!(
            guard(&Route::Login, SessionStatus::SignedOut, BusinessStatus::Missing),
            GuardOutcome::Render
        );
    }

    #[test]
    fn test_public_booking_is_open() {
        let route = Route::from_path("/agenda/barber-co");
        assert_eq!(
            guard(&route, SessionStatus::SignedOut, BusinessStatus::Missing),
            GuardOutcome::Render
        );
    }
}
