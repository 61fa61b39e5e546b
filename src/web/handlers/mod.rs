//! # Web API Request Handlers
//!
//! Contains all HTTP request handlers organized by functional area.
//! Each module handles a specific aspect of the API.

pub mod employees;
pub mod health;
pub mod tasks;
