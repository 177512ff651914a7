pub mod appointment_modal;
pub mod auth_callback;
pub mod booking;
pub mod calendar;
pub mod clients;
pub mod dashboard;
pub mod layout;
pub mod link;
pub mod login;
pub mod onboarding;
pub mod services;
pub mod settings;
pub mod status;
