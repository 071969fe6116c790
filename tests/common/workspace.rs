//! Temporary checkouts on disk
//!
//! Provides a working directory with real files for the scanner to walk, and a
//! stand-in `fossil` executable for CLI tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary checkout. The TempDir must be kept alive for the duration of the
/// test to prevent cleanup.
pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestWorkspace {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Creates an empty directory marked as an open checkout
pub fn setup_test_workspace() -> anyhow::Result<TestWorkspace> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().to_path_buf();
    fs::write(path.join(".fslckout"), b"")?;
    Ok(TestWorkspace { temp_dir, path })
}

/// Creates a file with parent directories at a `/`-separated relative path
pub fn create_file(root: &Path, relative_path: &str, content: &str) -> anyhow::Result<()> {
    let path = root.join(relative_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Checkout with a few tracked and untracked files:
///
/// ```text
/// README          tracked
/// src/main.c      tracked
/// src/util/str.c  tracked
/// notes.txt       untracked
/// build/out.o     untracked
/// ```
pub fn create_sample_workspace() -> anyhow::Result<TestWorkspace> {
    let ws = setup_test_workspace()?;
    create_file(&ws.path, "README", "readme")?;
    create_file(&ws.path, "src/main.c", "int main() {}")?;
    create_file(&ws.path, "src/util/str.c", "// strings")?;
    create_file(&ws.path, "notes.txt", "todo")?;
    create_file(&ws.path, "build/out.o", "\x7fELF")?;
    Ok(ws)
}

/// Writes an executable shell script that answers like `fossil` for `info`,
/// `ls -l`, `stash ls` and `settings ignore-glob`. Returns its path.
#[cfg(unix)]
pub fn create_fake_fossil(
    dir: &Path,
    project_name: &str,
    status_lines: &[&str],
    stash_lines: &[&str],
    ignore_glob: Option<&str>,
) -> anyhow::Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let echo = |lines: &[&str]| {
        lines
            .iter()
            .map(|line| format!("    echo '{line}'\n"))
            .collect::<String>()
    };

    let setting = match ignore_glob {
        Some(glob) => format!("ignore-glob          (local)  {glob}"),
        None => "ignore-glob".to_string(),
    };

    let script = format!(
        "#!/bin/sh\n\
         case \"$1\" in\n\
         info)\n    echo 'project-name: {project_name}'\n    echo 'checkout:     0123456789'\n    ;;\n\
         ls)\n{}    ;;\n\
         stash)\n{}    ;;\n\
         settings)\n{}    ;;\n\
         *)\n    echo \"unknown command $1\" >&2\n    exit 1\n    ;;\n\
         esac\n",
        echo(status_lines),
        echo(stash_lines),
        echo(&[setting.as_str()]),
    );

    let path = dir.join("fossil");
    fs::write(&path, script)?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

/// Writes a `fossil` stand-in whose `ls` hangs for five seconds while every other
/// command answers at once. Returns its path.
#[cfg(unix)]
pub fn create_slow_fossil(dir: &Path) -> anyhow::Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fossil");
    fs::write(
        &path,
        "#!/bin/sh\ncase \"$1\" in\nls) exec sleep 5 ;;\n*) echo 'project-name: slow' ;;\nesac\n",
    )?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    Ok(path)
}
