//! Command execution and terminal output.

pub mod setup;
pub mod tables;
pub mod ui;

use crate::api::Reply;
use crate::core::DateRange;
use crate::service::StockService;
use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Search { query: String },
    Detail { symbol: String },
    History { symbol: String, range: DateRange },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The JSON body an HTTP client would receive.
    #[default]
    Json,
    Table,
}

/// Result of one command: the rendered reply plus a table view of a
/// successful result.
#[derive(Debug)]
pub struct CommandOutput {
    pub reply: Reply,
    table: Option<String>,
}

impl CommandOutput {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match (format, &self.table) {
            (OutputFormat::Table, Some(table)) => Ok(table.clone()),
            _ => Ok(serde_json::to_string_pretty(&self.reply.body)?),
        }
    }
}

pub async fn execute(service: &dyn StockService, command: AppCommand) -> CommandOutput {
    match command {
        AppCommand::Search { query } => {
            let result = service.search_stocks(&query).await;
            CommandOutput {
                reply: Reply::from_result(&result),
                table: result.ok().map(|stocks| tables::stocks_table(&stocks)),
            }
        }
        AppCommand::Detail { symbol } => {
            let result = service.get_stock_detail(&symbol).await;
            CommandOutput {
                reply: Reply::from_result(&result),
                table: result.ok().map(|detail| detail.display_as_table()),
            }
        }
        AppCommand::History { symbol, range } => {
            let result = service.get_stock_history(&symbol, range).await;
            CommandOutput {
                reply: Reply::from_result(&result),
                table: result.ok().map(|history| history.display_as_table()),
            }
        }
    }
}
