use clap::Parser;
use colored::Colorize;
use vitrine_repo::RepoError;

mod cli;
mod commands;
mod config;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = cli::Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match commands::run_command(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<RepoError>() {
                Some(repo_err) if repo_err.is_validation() => {
                    eprintln!("{} {}", "✗".red().bold(), repo_err)
                }
                Some(repo_err) => {
                    eprintln!("{} {}: {}", "✗".red().bold(), repo_err.user_message(), repo_err)
                }
                None => eprintln!("{} {:#}", "✗".red().bold(), err),
            }
            std::process::ExitCode::FAILURE
        }
    }
}
