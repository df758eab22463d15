//! Dashboard statistics and task list.
//!
//! This module provides:
//! - Headline pipeline statistics computed from raw counts
//! - Follow-up tasks derived from the caller's open leads

mod stats;
mod tasks;

#[cfg(test)]
mod stats_props;

pub use stats::{
    DashboardCounts, DashboardStats, month_start, round_money, round_one, success_rate, week_ago,
};
pub use tasks::{FOLLOW_UP_TASK_LIMIT, UpcomingTask, due_label};
