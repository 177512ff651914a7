pub mod use_business;
pub mod use_calendar;
pub mod use_clients;
pub mod use_dashboard;
pub mod use_navigator;
pub mod use_public_business;
pub mod use_resource;
pub mod use_services;
pub mod use_session;
