//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use sopslab_core::config::consts::env;

#[derive(Parser)]
#[command(name = "sopslab")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download sops into the tool cache and export its path
    Setup {
        #[command(flatten)]
        version: VersionArg,
    },

    /// Print the concrete version a specifier resolves to
    Resolve {
        #[command(flatten)]
        version: VersionArg,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the download URL for this platform
    Url {
        #[command(flatten)]
        version: VersionArg,
    },
}

#[derive(Args)]
pub struct VersionArg {
    /// "latest" or a version such as 3.8.1 / v3.8.1
    #[arg(env = env::INPUT_VERSION, default_value = "latest")]
    pub version: String,
}
