use crate::commands::Target;
use crate::core::{
    command_init::{FilterOverrides, WorkspaceCommandInit},
    error::Result,
    file_status::StatusMask,
    index_parser::IndexParser,
    workspace::Selection,
};

#[derive(Debug, Clone, Default)]
pub struct SelectArgs {
    pub overrides: FilterOverrides,
    /// Row numbers of `status` output, e.g. `1 3-5,8`
    pub indices: Vec<String>,
    /// Folders the rows were listed from, matching `status --dir`
    pub rows_from_dirs: Vec<String>,
    /// Select every file under these folders instead of rows
    pub dirs: Vec<String>,
    /// Status names, e.g. `edited,added` or `modified`
    pub mask: Option<String>,
    pub all_if_empty: bool,
}

/// Print the workspace-relative paths of a selection, one per line
pub fn execute_select(target: Target, args: SelectArgs) -> Result<()> {
    let mask = match &args.mask {
        Some(text) => StatusMask::parse(text)?,
        None => StatusMask::ALL,
    };

    let mut ctx = WorkspaceCommandInit::initialize(target.workspace, target.fossil, &args.overrides)?;

    let names = if args.dirs.is_empty() {
        if !args.rows_from_dirs.is_empty() {
            ctx.workspace.select_dirs(args.rows_from_dirs.iter().cloned());
            ctx.workspace.drain_events();
        }
        let row_count = ctx.workspace.project().len();
        let rows = IndexParser::parse_args(&args.indices, row_count)?;
        ctx.workspace
            .selection_filenames(Selection::Files(&rows), mask, args.all_if_empty)
    } else {
        ctx.workspace.select_dirs(args.dirs.iter().cloned());
        ctx.workspace.drain_events();
        ctx.workspace
            .selection_filenames(Selection::Folders, mask, args.all_if_empty)
    };

    log::debug!("Selected {} files", names.len());
    for name in names {
        println!("{name}");
    }

    Ok(())
}
