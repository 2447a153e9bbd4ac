//! API Route Handlers

pub mod dashboard;
pub mod health;
pub mod tooltip;
