use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod domain;
mod services;

use cli::{Cli, Commands};
use commands::{handle_classify, handle_connect, handle_render, handle_suggest, run_session};
use services::config::{apply_overrides, load_settings};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli);

    let settings = apply_overrides(load_settings()?, cli.server.as_deref(), cli.timeout_ms);

    match &cli.command {
        Commands::Connect {
            player1,
            player2,
            path,
        } => handle_connect(&cli, &settings, player1, player2, *path),
        Commands::Suggest { term } => handle_suggest(&cli, &settings, term),
        Commands::Classify { message } => handle_classify(&cli, message),
        Commands::Render {
            input,
            player1,
            player2,
            path,
        } => handle_render(&cli, input, player1, player2, *path),
        Commands::Session => run_session(cli.json, &settings),
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}
