use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vbx", about = "Slim VirtualBox CLI built on VBoxManage")]
pub struct Cli {
    /// Path to config file (default: ./vbx.toml, then ~/.config/vbx/vbx.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a VM
    Start {
        /// VM name
        name: String,

        /// Start without an attached display window
        #[arg(long)]
        headless: bool,
    },

    /// Stop a VM via ACPI power button
    Stop {
        /// VM name
        name: String,

        /// Power off immediately instead of requesting ACPI shutdown
        #[arg(long)]
        force: bool,
    },

    /// Stop every running VM
    StopAll {
        /// Power off immediately instead of requesting ACPI shutdown
        #[arg(long)]
        force: bool,
    },

    /// List VMs
    List {
        /// Ask VBoxManage for sorted output (default)
        #[arg(long, overrides_with = "no_sorted")]
        sorted: bool,

        /// Keep VBoxManage's registration order
        #[arg(long)]
        no_sorted: bool,

        /// Show guest OS, memory, CPUs and state per VM (default)
        #[arg(long, overrides_with = "no_details")]
        details: bool,

        /// Show bare VM names only
        #[arg(long)]
        no_details: bool,
    },
}
