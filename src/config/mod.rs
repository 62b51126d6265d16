//! Configuration for the expense tracker
//!
//! - `paths`: where settings, the session file, data and the audit log live
//! - `settings`: user preferences and the route tables

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::{RouteSettings, Settings};
