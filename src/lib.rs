//! Appointment scheduling for small businesses: the owner's back office and
//! the public booking page, rendered client-side with Yew.

pub mod components;
pub mod config;
pub mod hooks;
pub mod models;
pub mod router;
pub mod services;
pub mod utils;
