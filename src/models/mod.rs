//! # Data Layer
//!
//! Employee and task records plus the derived shapes built on top of them.
//! Each model carries its own SQLx queries against the Postgres schema in
//! `migrations/`; storage-agnostic access goes through [`crate::store`].

pub mod employee;
pub mod pagination;
pub mod task;
pub mod workload;

// Re-export core models for easy access
pub use employee::{Employee, EmployeeChanges, EmployeeSummary, NewEmployee};
pub use pagination::{Page, PageParams, PageRequest};
pub use task::{NewTask, Task, TaskChanges};
pub use workload::{BusyEmployee, EmployeeWorkload};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Distinguishes an absent field from an explicit `null` in partial updates:
/// absent stays `None`, `null` becomes `Some(None)`.
pub(crate) fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Present non-nullable fields in partial updates; an explicit `null` is
/// rejected instead of being read as "leave unchanged".
pub(crate) fn deserialize_non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<T>::deserialize(deserializer)? {
        Some(value) => Ok(Some(value)),
        None => Err(D::Error::custom("This field may not be null.")),
    }
}
