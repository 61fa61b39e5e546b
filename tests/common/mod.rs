//! Shared helpers for the integration test suites.

#![allow(dead_code)]

pub mod factories;
pub mod strategies;

use chrono::{Duration, NaiveDate, Utc};

/// A deadline the validators accept: one week from today
pub fn valid_deadline() -> NaiveDate {
    Utc::now().date_naive() + Duration::days(7)
}
