//! Expense Tracker - personal expenses with monthly budget goals
//!
//! This library provides the core of the `expense` command: recording
//! expenses per owner, keeping one spending goal per month and category,
//! checking new expenses against that goal, and aggregating the owner's
//! expenses into the dashboard views.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Expenses, budget goals, money and month periods
//! - `storage`: JSON file persistence behind the [`storage::Backend`] trait
//! - `session`: Session tokens and the signed-in owner
//! - `routes`: Route protection for signed-in and anonymous visitors
//! - `services`: Aggregation engine, budget checks and expense submission
//! - `audit`: Audit logging of every write
//! - `display`: Terminal tables for expenses, goals and the dashboard
//! - `export`: CSV, JSON and YAML exports
//! - `cli`: Command handlers used by the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::services::aggregation::group_by_category;
//!
//! let totals = group_by_category(&expenses);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
