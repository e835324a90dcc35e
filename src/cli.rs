//! Command-line interface.

use clap::{Parser, Subcommand};

/// graphnav — directed graph service over SQLite.
#[derive(Parser, Debug)]
#[command(name = "graphnav")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server.
    Serve {
        /// SQLite database path
        #[arg(long, default_value = "graphnav.db", env = "GRAPHNAV_DB_PATH")]
        db_path: String,

        /// Host address to bind to
        #[arg(long, default_value = "0.0.0.0", env = "GRAPHNAV_HOST")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8000", env = "GRAPHNAV_PORT")]
        port: u16,
    },

    /// Seed the database with a demo graph.
    Seed {
        /// SQLite database path
        #[arg(long, default_value = "graphnav.db", env = "GRAPHNAV_DB_PATH")]
        db_path: String,
    },
}
