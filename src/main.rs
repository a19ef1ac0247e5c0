use clap::Parser;
use tracing_subscriber::EnvFilter;

use vbx::cli::{Cli, Command};
use vbx::commands;
use vbx::config;
use vbx::error::VbxError;
use vbx::manage::VboxManage;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("vbx=debug")
    } else {
        EnvFilter::from_default_env()
            .add_directive("vbx=info".parse().expect("valid log directive"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    if let Err(err) = run(cli).await {
        // CommandFailed propagates the external tool's exit code; every
        // other error exits 1.
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<(), VbxError> {
    let config = config::load_config(cli.config.as_deref())?;
    let vbox = VboxManage::new(config.vboxmanage_path())?;

    match cli.command {
        Command::Start { name, headless } => commands::start(&vbox, &name, headless).await,
        Command::Stop { name, force } => commands::stop(&vbox, &name, force).await,
        Command::StopAll { force } => commands::stop_all(&vbox, force).await,
        Command::List {
            sorted: _,
            no_sorted,
            details: _,
            no_details,
        } => commands::list(&vbox, !no_sorted, !no_details).await,
    }
}
