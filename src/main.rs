use clap::{Args, Parser, Subcommand};
use fossil_navigator::commands::*;
use fossil_navigator::core::{
    error::{NavigatorError, Result},
    print_error, FilterOverrides,
};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fossil-navigator")]
#[command(about = "Workspace status, folder tree and stash browser for Fossil checkouts")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Checkout directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    workspace: Option<PathBuf>,

    /// Path to the fossil executable
    #[arg(long, global = true, value_name = "PATH")]
    fossil: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// View filters shared by every command that scans
#[derive(Args, Debug, Clone, Default)]
struct FilterArgs {
    /// Show every file as a path instead of per folder
    #[arg(long)]
    list: bool,
    /// Show files fossil does not track
    #[arg(long)]
    unknown: bool,
    /// Hide files fossil does not track
    #[arg(long)]
    no_unknown: bool,
    /// Show files matching the ignore glob
    #[arg(long)]
    ignored: bool,
    /// Hide edited, added, deleted, renamed, missing and conflicted files
    #[arg(long)]
    no_modified: bool,
    /// Hide unchanged files
    #[arg(long)]
    no_unchanged: bool,
    /// Comma separated glob patterns for ignored files
    #[arg(long, value_name = "GLOB")]
    ignore: Option<String>,
}

impl FilterArgs {
    fn overrides(&self) -> FilterOverrides {
        let unknown = if self.no_unknown {
            Some(false)
        } else if self.unknown {
            Some(true)
        } else {
            None
        };
        FilterOverrides {
            unknown,
            ignored: self.ignored.then_some(true),
            modified: self.no_modified.then_some(false),
            unchanged: self.no_unchanged.then_some(false),
            as_list: self.list.then_some(true),
            ignore_glob: self.ignore.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show numbered workspace status
    Status {
        #[command(flatten)]
        filters: FilterArgs,
        /// Folders to show (tree mode)
        #[arg(long = "dir", value_name = "PATH")]
        dirs: Vec<String>,
        /// Print the file view as JSON
        #[arg(long)]
        json: bool,
        /// Save the filters as the new defaults
        #[arg(long)]
        save: bool,
    },
    /// Show the folder tree with per-folder file counts
    Tree {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// List stashes
    Stashes {
        /// Only these stash names (default: all)
        names: Vec<String>,
    },
    /// Print the paths of selected files, one per line
    Select {
        #[command(flatten)]
        filters: FilterArgs,
        /// Row numbers from `status` (e.g., "1 3-5,8")
        indices: Vec<String>,
        /// Folders the rows come from, as given to `status --dir`
        #[arg(long = "rows-from-dir", value_name = "PATH")]
        rows_from_dirs: Vec<String>,
        /// Select every file under these folders instead
        #[arg(long = "dir", value_name = "PATH")]
        dirs: Vec<String>,
        /// Only these statuses (e.g., "edited,added", "modified", "repo")
        #[arg(long)]
        mask: Option<String>,
        /// Use every file when nothing is selected
        #[arg(long)]
        all_if_empty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let target = Target {
        workspace: cli.workspace,
        fossil: cli.fossil,
    };

    let result = match cli.command {
        Commands::Status {
            filters,
            dirs,
            json,
            save,
        } => execute_status(
            target,
            StatusArgs {
                overrides: filters.overrides(),
                dirs,
                json,
                save,
            },
        ),
        Commands::Tree { filters } => execute_tree(target, filters.overrides()),
        Commands::Stashes { names } => execute_stashes(target, names),
        Commands::Select {
            filters,
            indices,
            rows_from_dirs,
            dirs,
            mask,
            all_if_empty,
        } => execute_select(
            target,
            SelectArgs {
                overrides: filters.overrides(),
                indices,
                rows_from_dirs,
                dirs,
                mask,
                all_if_empty,
            },
        ),
    };

    if let Err(e) = result {
        match e {
            NavigatorError::RepositoryUnavailable => print_error("Not in a fossil workspace"),
            e => print_error(&e.to_string()),
        }
        std::process::exit(1);
    }

    Ok(())
}
