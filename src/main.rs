#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use makepak::pak;
use std::path::PathBuf;

/// Builds a Quake-style PACK (.pak) archive from a directory tree.
///
/// The plain form `makepak <ROOT> <OUTPUT>` packs a directory; the
/// subcommands inspect an existing archive.
#[derive(Debug, Parser)]
#[command(name = "makepak", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,

    /// Root directory to pack.
    #[arg(value_name = "ROOT")]
    root: Option<PathBuf>,

    /// Output .pak path.
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Reserved prefix to skip (first path component).
    #[arg(long, default_value = pak::DEFAULT_RESERVED)]
    reserved: String,

    /// Exclude paths containing this substring (repeatable).
    #[arg(long)]
    exclude: Vec<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List entries in a pak.
    List {
        pak: PathBuf,
        /// Print offsets and lengths too.
        #[arg(long, default_value_t = false)]
        verbose: bool,
    },

    /// Extract pak contents to an output directory.
    Extract {
        pak: PathBuf,
        output: PathBuf,
        /// Only extract entries that contain this substring (repeatable).
        #[arg(long)]
        filter: Vec<String>,
    },

    /// Verify pak structure (header invariants, entry bounds).
    Verify { pak: PathBuf },
}

fn main() {
    let cli = Cli::parse();

    let res = match cli.cmd {
        Some(Command::List { pak, verbose }) => pak::list(&pak, verbose),
        Some(Command::Extract { pak, output, filter }) => pak::extract(&pak, &output, &filter),
        Some(Command::Verify { pak }) => pak::verify(&pak),
        None => match (cli.root, cli.output) {
            (Some(root), Some(output)) => {
                pak::build(&root, &output, &cli.reserved, &cli.exclude).map(|report| {
                    println!("packed {} files -> {}", report.files, output.display());
                })
            }
            _ => {
                eprintln!("usage: makepak <ROOT> <OUTPUT>  (see --help)");
                std::process::exit(2);
            }
        },
    };

    if let Err(e) = res {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
