use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

mod build;
mod log;
mod manifest;
mod report;
mod serve;

/// CLI tools for building and serving wisp apps
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print extra information while running
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the app in the current directory into `dist`
    #[command(visible_alias = "b")]
    Build(Build),

    /// Build, then start a local development server
    #[command(visible_alias = "s")]
    Serve(Serve),
}

#[derive(Clone, Debug, Args)]
struct Build {
    /// Build with optimizations
    #[arg(long)]
    release: bool,

    /// Output directory
    #[arg(long, default_value = "dist")]
    dist: PathBuf,
}

#[derive(Debug, Args)]
struct Serve {
    #[command(flatten)]
    build: Build,

    /// Port to bind the server to
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Rebuild and reload the page when source files change
    #[arg(long)]
    watch: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        log::enable_verbose_output();
    }
    if std::io::stderr().is_terminal() {
        log::enable_color_output();
    }

    let res = match &cli.command {
        Command::Build(b) => build::build(b),
        Command::Serve(s) => serve::serve(s),
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
