use crate::commands::Target;
use crate::core::{
    colors::format_file_line,
    command_init::{FilterOverrides, WorkspaceCommandInit},
    error::Result,
    print_info, print_success, print_warning,
    projection::display_name,
    record::StatusRecord,
};
use colored::*;
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct StatusArgs {
    pub overrides: FilterOverrides,
    /// Folders to show in tree mode; empty keeps the root
    pub dirs: Vec<String>,
    pub json: bool,
    /// Persist the filter overrides as the new defaults
    pub save: bool,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    row: usize,
    full_path: String,
    #[serde(flatten)]
    record: &'a StatusRecord,
}

pub fn execute_status(target: Target, args: StatusArgs) -> Result<()> {
    let mut ctx = WorkspaceCommandInit::initialize(target.workspace, target.fossil, &args.overrides)?;

    if !args.dirs.is_empty() {
        ctx.workspace.select_dirs(args.dirs.iter().cloned());
        ctx.workspace.drain_events();
    }

    if args.save {
        ctx.config.save()?;
        log::debug!("Saved view filters");
    }

    let rows = ctx.workspace.project();

    if args.json {
        let rows: Vec<JsonRow> = rows
            .iter()
            .enumerate()
            .map(|(i, &record)| JsonRow {
                row: i + 1,
                full_path: record.full_path(),
                record,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let project = ctx.project_name.as_deref().unwrap_or("-unnamed-");
    println!();
    println!("{} {}", "#".bright_black(), project.white().bold());
    println!(
        "{} {}",
        "#".bright_black(),
        ctx.workspace.root().display().to_string().bright_black()
    );
    println!();

    if rows.is_empty() {
        print_info("No files to show.");
    } else {
        let view = ctx.workspace.view();
        for (i, record) in rows.iter().enumerate() {
            println!(
                "{}",
                format_file_line(i + 1, record.status(), &display_name(record, view))
            );
        }
    }

    if ctx.summary.dropped > 0 {
        print_warning(&format!(
            "{} reported files vanished during the scan",
            ctx.summary.dropped
        ));
    }
    if args.save {
        print_success("View filters saved");
    }

    Ok(())
}
