//! Nook CLI entry point: argument parsing, logging setup, command dispatch.

use clap::Parser;
use miette::Result;
use nook_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors();

    let result = match args.command {
        cli::Command::Dev(dev_args) => commands::dev::execute(dev_args).await,
        cli::Command::List(list_args) => commands::list::execute(list_args).await,
        cli::Command::Check(check_args) => commands::check::execute(check_args).await,
    };

    result.map_err(error::cli_error_to_miette)
}
