/// Configuration constants for the application
pub struct Config;

impl Config {
    /// Backend origin, injected at build time. Empty means same-origin.
    pub const BACKEND_URL: &'static str = match option_env!("AGENDA_BACKEND_URL") {
        Some(url) => url,
        None => "",
    };

    /// External identity provider that redirects back with `#session_id=...`
    pub const AUTH_URL: &'static str = match option_env!("AGENDA_AUTH_URL") {
        Some(url) => url,
        None => "https://auth.emergentagent.com/",
    };

    /// First hour row shown in the calendar week grid
    pub const CALENDAR_FIRST_HOUR: u32 = 8;

    /// Number of hour rows in the calendar week grid (8:00 through 19:00)
    pub const CALENDAR_HOUR_ROWS: u32 = 12;

    /// Upcoming appointments listed on the dashboard
    pub const DASHBOARD_UPCOMING_LIMIT: usize = 5;

    /// How long the settings page keeps showing "Saved!" (3 seconds)
    pub const SAVED_INDICATOR_MS: u32 = 3_000;

    /// SessionStorage key used to hand the signed-in user across the auth redirect
    pub const SESSION_USER_KEY: &'static str = "agenda.user";

    /// Timezone preselected during onboarding
    pub const DEFAULT_TIMEZONE: &'static str = "America/New_York";
}
