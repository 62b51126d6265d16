//! Display formatting for terminal output
//!
//! Tables are rendered with `tabled`; amounts use the configured currency
//! symbol.

pub mod budget;
pub mod dashboard;
pub mod expense;

pub use budget::format_goal_list;
pub use dashboard::format_dashboard;
pub use expense::{format_expense_details, format_expense_list};

/// Truncate `s` to at most `max_len` characters, marking the cut with "..."
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

/// A horizontal bar of `value / max` scaled to `width` cells
pub(crate) fn bar(value: i64, max: i64, width: usize) -> String {
    if max <= 0 || value <= 0 {
        return String::new();
    }
    let cells = ((value as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(cells.clamp(1, width))
}
