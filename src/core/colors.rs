//! Status colors for terminal output.
//!
//! # Color Scheme
//! - **Edited**: Yellow
//! - **Added**: Green
//! - **Deleted / Missing**: Red
//! - **Renamed**: Blue
//! - **Conflicted**: Red bold
//! - **Unknown**: Cyan
//! - **Unchanged / Ignored**: Muted

use crate::core::file_status::FileStatus;
use colored::*;

/// Apply the color of `status` to any text
pub fn paint(status: FileStatus, text: &str) -> ColoredString {
    match status {
        FileStatus::Edited => text.yellow(),
        FileStatus::Added => text.green(),
        FileStatus::Deleted | FileStatus::Missing => text.red(),
        FileStatus::Renamed => text.blue(),
        FileStatus::Conflicted => text.red().bold(),
        FileStatus::Unknown => text.cyan(),
        FileStatus::Unchanged | FileStatus::Ignored => text.bright_black(),
    }
}

/// Status description padded to the widest one, then colored
pub fn aligned_status(status: FileStatus) -> ColoredString {
    paint(status, &format!("{:<10}", status.description()))
}

/// One numbered line of the file view
pub fn format_file_line(row: usize, status: FileStatus, name: &str) -> String {
    let row = format!("[{row}]").cyan().bold();
    format!("{row} {} {}", aligned_status(status), paint(status, name))
}
