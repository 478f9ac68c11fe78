use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "househunt-lookup")]
#[command(about = "Find house hunting episodes by U.S. state or city")]
pub struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Raw episodes JSON file
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Output directory for the generated site
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate the static site
    Build,

    /// Serve the site and the search API
    Serve {
        /// Address to listen on
        #[arg(long)]
        addr: Option<SocketAddr>,

        /// Regenerate the site even if it already exists
        #[arg(long)]
        rebuild: bool,
    },

    /// Run a single search and print the results as JSON
    Search {
        query: String,

        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Write the effective configuration to the config file
    InitConfig,
}
