use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use fuzzdial_cli::cli_args::Args;
use fuzzdial_cli::command_selection::{run_list, ListOutcome};
use fuzzdial_core::error::Result;
use fuzzdial_core::search::CommandCatalog;
use fuzzdial_core::{config, file_handling};

fn execute() -> Result<()> {
    let args = Args::parse();

    let commands_path = config::get_commands_path(&args.commands_path);
    debug!("Commands path: `{commands_path}`");

    let command_definitions = file_handling::get_command_definitions(&commands_path)?;
    let catalog = CommandCatalog::new(command_definitions, args.search_mode());

    match run_list(&catalog, &args.list_options())? {
        ListOutcome::Selected(command) => println!("{}", command.invocation),
        ListOutcome::Cancelled => info!("Nothing selected"),
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
