pub mod appointment;
pub mod business;
pub mod calendar;
pub mod client;
pub mod dashboard;
pub mod datetime;
pub mod error;
pub mod onboarding;
pub mod service;
pub mod settings;
pub mod slot;
pub mod staff;
pub mod user;
pub mod wizard;
