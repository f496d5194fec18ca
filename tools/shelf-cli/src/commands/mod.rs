//! CLI command implementations.

pub mod config;
pub mod preview;

use clap::{Args, Subcommand, ValueEnum};

/// Arguments for the preview command.
#[derive(Args)]
pub struct PreviewArgs {
    /// Catalog JSON: a tool output object (`places`/`items`) or a bare array.
    #[arg(long)]
    pub catalog: String,

    /// Product ids to select for comparison, in order.
    #[arg(long, value_delimiter = ',', required = true)]
    pub select: Vec<String>,

    /// Surface that runs the selection.
    #[arg(long, value_enum, default_value_t = SurfaceArg::List)]
    pub surface: SurfaceArg,

    /// Product ids to put in the cart before rendering.
    #[arg(long, value_delimiter = ',')]
    pub cart: Vec<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = PreviewFormat::Html)]
    pub format: PreviewFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SurfaceArg {
    List,
    Carousel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PreviewFormat {
    Html,
    Json,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration as TOML.
    Show,
    /// Validate a config file.
    Validate {
        /// Config file (default: the loaded one).
        file: Option<String>,
    },
}
