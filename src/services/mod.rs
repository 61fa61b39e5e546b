//! # Services
//!
//! Decision logic layered over the stores.
//!
//! - [`busy_employees`] - ranking employees by active task count
//! - [`important_tasks`] - assigning unassigned tasks that block active work

pub mod busy_employees;
pub mod important_tasks;

pub use busy_employees::{least_busy, rank_by_active_tasks, BusyEmployeeRanking, RankOrder};
pub use important_tasks::{
    choose_assignee, AssigneeChoice, ImportantTaskAssignment, ImportantTaskSelector,
};
