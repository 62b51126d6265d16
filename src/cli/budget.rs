//! Budget goal CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_period};
use crate::config::settings::Settings;
use crate::display::format_goal_list;
use crate::error::TrackerResult;
use crate::services::BudgetService;
use crate::session::Session;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the goal for a month and category
    Set {
        /// Month (YYYY-MM)
        month: String,
        category: String,
        /// Goal amount (e.g. "500" or "500.00")
        amount: String,
    },

    /// List budget goals
    List {
        /// Only goals for this month (YYYY-MM)
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Delete a budget goal
    Delete {
        /// Goal ID (full or short form)
        id: String,
    },

    /// Check whether a prospective expense fits the month's goal
    Check {
        /// Month (YYYY-MM)
        month: String,
        category: String,
        amount: String,
    },
}

pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    cmd: BudgetCommands,
) -> TrackerResult<()> {
    let service = BudgetService::new(storage);
    let currency = &settings.currency_symbol;

    match cmd {
        BudgetCommands::Set {
            month,
            category,
            amount,
        } => {
            let period = parse_period(&month)?;
            let goal = service.set_goal(session, period, &category, parse_amount(&amount)?)?;
            println!(
                "Budget for {} {} set to {} ({})",
                goal.category,
                period.label(),
                goal.goal_amount.format_with_symbol(currency),
                goal.id
            );
        }

        BudgetCommands::List { period } => {
            let period = period.as_deref().map(parse_period).transpose()?;
            let goals = service.list_goals(session, period)?;
            println!("{}", format_goal_list(&goals, currency));
        }

        BudgetCommands::Delete { id } => {
            let id = service.resolve_goal_id(session, &id)?;
            service.delete_goal(session, id)?;
            println!("Deleted budget goal {}", id);
        }

        BudgetCommands::Check {
            month,
            category,
            amount,
        } => {
            let period = parse_period(&month)?;
            let amount = parse_amount(&amount)?;
            let category = category.trim();
            let owner = session.owner_id();

            if !service.budget_exists(owner, &period, category)? {
                println!("No budget set for this month.");
                return Ok(());
            }

            let goal = service.goal_for(owner, &period, category)?;
            let within = service.budget_limit_check(owner, &period, category, amount)?;
            if let Some(goal) = goal {
                println!(
                    "Goal for {} {}: {}",
                    category,
                    period.label(),
                    goal.goal_amount.format_with_symbol(currency)
                );
            }
            if within {
                println!(
                    "Within budget: adding {} stays within the goal.",
                    amount.format_with_symbol(currency)
                );
            } else {
                println!(
                    "Over budget: adding {} exceeds the goal for this month.",
                    amount.format_with_symbol(currency)
                );
            }
        }
    }

    Ok(())
}
