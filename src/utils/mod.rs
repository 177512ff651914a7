pub mod auth_fragment;
pub mod calendar_month;
pub mod format;
pub mod slug;
pub mod validation;
