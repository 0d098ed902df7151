//! Storage keys shared with the browser dashboard's local storage layout.

/// `{ "apps": AppPortal[] }`
pub const APP_CONFIG_DATA: &str = "appConfigData";
/// Logged-in identity.
pub const USER: &str = "user";
/// `Notification[]`, newest first.
pub const NOTIFICATIONS: &str = "notifications";
pub const DARK_THEME: &str = "darkTheme";
pub const SIDEBAR_COLLAPSED: &str = "sidebar-collapsed";
