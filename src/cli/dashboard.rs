//! Dashboard CLI command

use crate::config::settings::Settings;
use crate::display::format_dashboard;
use crate::error::{TrackerError, TrackerResult};
use crate::services::DashboardService;
use crate::session::Session;
use crate::storage::Storage;

pub fn handle_dashboard_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    json: bool,
) -> TrackerResult<()> {
    let view = DashboardService::new(storage, settings.top_categories).load(session)?;

    if json {
        let output = serde_json::to_string_pretty(&view)
            .map_err(|e| TrackerError::Json(e.to_string()))?;
        println!("{}", output);
    } else {
        println!(
            "{}",
            format_dashboard(&view, &settings.currency_symbol, &settings.date_format)
        );
    }

    Ok(())
}
