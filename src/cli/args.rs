//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Compose LaTeX source from a tree of typed nodes
#[derive(Parser, Debug)]
#[command(name = "texnodes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory searched for a local .texnodes.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a document manifest to LaTeX
    Render {
        /// TOML manifest describing the node tree
        #[arg(value_hint = ValueHint::FilePath)]
        manifest: PathBuf,
        /// Output file (default: configured output_dir, else stdout)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Show the node tree of a manifest
    Outline {
        /// TOML manifest describing the node tree
        #[arg(value_hint = ValueHint::FilePath)]
        manifest: PathBuf,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
