//! Core business logic for DealScope.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Domain vocabulary, derived fields and aggregate math live here.
//!
//! # Modules
//!
//! - `analysis` - Analysis kinds, full-analysis summary, recent merge
//! - `pipeline` - Lead and investment statuses, priorities, hot-lead threshold
//! - `dashboard` - Headline statistics and follow-up tasks
//! - `presentation` - Derived read-only fields (ranges, relative dates, colors)
//! - `auth` - Password hashing

pub mod analysis;
pub mod auth;
pub mod dashboard;
pub mod pipeline;
pub mod presentation;

pub use analysis::{AnalysisKind, MetricsSummary, ScoreSample};
pub use pipeline::{InvestmentStatus, LeadStatus, ParseChoiceError, Priority};
