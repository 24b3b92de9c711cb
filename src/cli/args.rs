//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::TraversalOrder;
use crate::fixtures::Fixture;

/// Inspect and walk binary trees, including edits made mid-walk
#[derive(Parser, Debug)]
#[command(name = "livetree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .livetree.toml
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw a fixture tree
    Show {
        /// Tree to use (default from settings)
        #[arg(short, long, value_enum)]
        fixture: Option<Fixture>,
    },

    /// Print size, height, leaf count and per-depth node counts
    Stats {
        /// Tree to use (default from settings)
        #[arg(short, long, value_enum)]
        fixture: Option<Fixture>,
        /// Only count nodes at this depth (root is 0)
        #[arg(short = 'k', long, allow_negative_numbers = true)]
        depth: Option<i64>,
    },

    /// Print payloads in traversal order
    Walk {
        /// Tree to use (default from settings)
        #[arg(short, long, value_enum)]
        fixture: Option<Fixture>,
        /// Traversal order (default from settings)
        #[arg(short, long, value_enum)]
        order: Option<TraversalOrder>,
    },

    /// Walk pre-order, attach children to the pending node, finish the walk
    Grow {
        /// Tree to use (default from settings)
        #[arg(short, long, value_enum)]
        fixture: Option<Fixture>,
        /// Values to consume before attaching
        #[arg(long, default_value_t = 0)]
        after: usize,
        /// Payload for a new left child
        #[arg(long, allow_negative_numbers = true)]
        left: Option<i64>,
        /// Payload for a new right child
        #[arg(long, allow_negative_numbers = true)]
        right: Option<i64>,
    },

    /// Show effective settings as TOML
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
