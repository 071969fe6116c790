use crate::commands::Target;
use crate::core::{
    command_init::{FilterOverrides, WorkspaceCommandInit},
    error::Result,
    print_info, print_section_header,
    record::FileMap,
};
use colored::*;

/// Print the folder tree with the number of visible files in each folder
pub fn execute_tree(target: Target, overrides: FilterOverrides) -> Result<()> {
    let ctx = WorkspaceCommandInit::initialize(target.workspace, target.fossil, &overrides)?;
    let files = ctx.workspace.files();
    let tree = ctx.workspace.tree();

    if tree.children().is_empty() && files.is_empty() {
        print_info("No folders to show.");
        return Ok(());
    }

    print_section_header("Folders");

    let root_name = ctx.project_name.as_deref().unwrap_or("/");
    for (depth, node) in tree.walk() {
        let name = if node.is_root() { root_name } else { node.name() };
        let count = files_in(files, node.full_path());
        let count = if count > 0 {
            format!(" ({count})").bright_black().to_string()
        } else {
            String::new()
        };
        println!("{}{}{}", "  ".repeat(depth), name.white(), count);
    }

    Ok(())
}

fn files_in(files: &FileMap, dir: &str) -> usize {
    files.values().filter(|r| r.path() == dir).count()
}
