use crate::commands::Target;
use crate::core::{
    command_init::{FilterOverrides, WorkspaceCommandInit},
    error::Result,
    print_info, print_section_header,
};
use colored::*;

/// List the named stashes, or every stash when no name is given
pub fn execute_stashes(target: Target, names: Vec<String>) -> Result<()> {
    let overrides = FilterOverrides {
        unknown: Some(false),
        ignored: Some(false),
        ..Default::default()
    };
    let ctx = WorkspaceCommandInit::initialize(target.workspace, target.fossil, &overrides)?;
    let selected = ctx.workspace.stash_selection(&names, true);

    if selected.is_empty() {
        print_info("No stashes found.");
        return Ok(());
    }

    print_section_header("Stashes");
    for name in &selected {
        let id = ctx.workspace.stashes().find(name).unwrap_or_default();
        println!("{} {}", format!("[{id}]").cyan().bold(), name.white());
    }

    Ok(())
}
