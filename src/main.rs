//! Voyage Publish - git release workflow for scaffolded projects.

use voyage_publish::cli::{self, Args, OutputManager};
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let debug = args.debug;
    match cli::run(args).await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            let output = OutputManager::new(false);
            if debug {
                output.error(&format!("Error: {e:?}"));
            } else {
                output.error(&format!("Error: {e}"));
            }

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                output.notice("Recovery suggestions:");
                for suggestion in suggestions {
                    output.indent(&suggestion);
                }
            }

            process::exit(1);
        }
    }
}
