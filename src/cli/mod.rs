//! Command line interface for voyage_publish.
//!
//! Parses arguments, builds the workflow with its real collaborators and
//! reports the outcome.

mod args;
mod commands;
mod output;

pub use args::Args;
pub use commands::execute_publish;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub async fn run(args: Args) -> Result<i32> {
    if let Err(validation_error) = args.validate() {
        let output = OutputManager::new(false);
        output.error(&format!("Invalid arguments: {}", validation_error));
        return Ok(1);
    }
    execute_publish(&args).await
}
