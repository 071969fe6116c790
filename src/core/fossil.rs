//! [`Bridge`] implementation that shells out to the `fossil` executable.
//!
//! Every query spawns one blocking `fossil` process in the checkout directory and
//! parses its textual output. The process is polled rather than waited on so the
//! caller's cancel flag can kill it; the kill is always followed by a wait.
//!
//! # Parsed commands
//! - `fossil info`: checkout health and project name
//! - `fossil ls -l`: `KEYWORD  path` line per tracked file
//! - `fossil stash ls`: `ID: [hash] on date` line followed by the stash comment
//! - `fossil settings ignore-glob`: the repository's ignore patterns

use crate::core::{
    bridge::{Bridge, RepoHealth, StatusLine},
    error::{NavigatorError, Result},
};
use std::cell::RefCell;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Checkout database files, either of which marks a workspace root
pub const CHECKOUT_FILES: [&str; 2] = [".fslckout", "_FOSSIL_"];

const IGNORE_GLOB_SETTING: &str = "ignore-glob";

const MSG_OLD_SCHEMA: &str = "incorrect repository schema version";
const MSG_NO_CHECKOUT: &str = "not within an open checkout";

/// Captured output of one fossil invocation
#[derive(Debug)]
pub struct FossilOutput {
    pub status: ExitStatus,
    pub stdout: Vec<String>,
    pub stderr: String,
}

pub struct FossilCli {
    fossil_path: PathBuf,
    workspace: PathBuf,
    abort: Arc<AtomicBool>,
    project_name: RefCell<Option<String>>,
}

impl FossilCli {
    pub fn new(fossil_path: impl Into<PathBuf>, workspace: impl Into<PathBuf>) -> Self {
        Self {
            fossil_path: fossil_path.into(),
            workspace: workspace.into(),
            abort: Arc::new(AtomicBool::new(false)),
            project_name: RefCell::new(None),
        }
    }

    /// Handle that aborts the running (or next) fossil process when set, usable
    /// from another thread
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort)
    }

    /// Run fossil with the given arguments in the checkout directory.
    ///
    /// The child is killed and reaped as soon as `cancel` or the bridge's own abort
    /// flag is raised. The abort flag is consumed by the run that observes it.
    pub fn run(&self, args: &[&str], cancel: &AtomicBool) -> Result<FossilOutput> {
        self.execute(args, || {
            cancel.load(Ordering::SeqCst) || self.abort.swap(false, Ordering::SeqCst)
        })
    }

    fn execute(&self, args: &[&str], should_stop: impl Fn() -> bool) -> Result<FossilOutput> {
        let command_name = args.first().copied().unwrap_or_default();
        log::debug!("Running {} {}", self.fossil_path.display(), args.join(" "));

        let mut child = Command::new(&self.fossil_path)
            .args(args)
            .current_dir(&self.workspace)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| NavigatorError::external_query_failed(command_name, e.to_string()))?;

        // Drain both pipes so a chatty process cannot block on a full buffer
        let stdout_reader = child.stdout.take().map(spawn_reader);
        let stderr_reader = child.stderr.take().map(spawn_reader);

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Lost track of fossil {command_name}: {e}");
                    reap(&mut child);
                    return Err(e.into());
                }
            }
            if should_stop() {
                log::info!("Cancelling fossil {command_name}");
                reap(&mut child);
                return Err(NavigatorError::Cancelled);
            }
            thread::sleep(POLL_INTERVAL);
        };

        let stdout = String::from_utf8_lossy(&join_reader(stdout_reader))
            .lines()
            .map(str::to_string)
            .collect();
        let stderr = String::from_utf8_lossy(&join_reader(stderr_reader))
            .trim()
            .to_string();

        Ok(FossilOutput {
            status,
            stdout,
            stderr,
        })
    }

    /// Run fossil and fail on a non-zero exit
    fn run_checked(&self, args: &[&str], cancel: &AtomicBool) -> Result<Vec<String>> {
        let output = self.run(args, cancel)?;
        if !output.status.success() {
            let message = if output.stderr.is_empty() {
                output.status.to_string()
            } else {
                output.stderr
            };
            return Err(NavigatorError::external_query_failed(
                args.join(" "),
                message,
            ));
        }
        Ok(output.stdout)
    }
}

impl Bridge for FossilCli {
    fn workspace_root(&self) -> &Path {
        &self.workspace
    }

    fn repository_health(&self) -> RepoHealth {
        // The probe is quick and must not consume a pending cancel meant for a query
        let output = match self.execute(&["info"], || false) {
            Ok(output) => output,
            Err(e) => {
                log::debug!("fossil info could not run: {e}");
                return RepoHealth::NotFound;
            }
        };

        let mut lines = output.stdout;
        lines.extend(output.stderr.lines().map(str::to_string));
        let info = parse_info(&lines);

        if info.health == RepoHealth::Ok && !output.status.success() {
            return RepoHealth::NotFound;
        }
        if info.project_name.is_some() {
            *self.project_name.borrow_mut() = info.project_name;
        }
        info.health
    }

    fn query_status(&self, cancel: &AtomicBool) -> Result<Vec<StatusLine>> {
        let lines = self.run_checked(&["ls", "-l"], cancel)?;
        Ok(parse_status_listing(&lines))
    }

    fn query_stashes(&self, cancel: &AtomicBool) -> Result<Vec<(String, String)>> {
        let lines = self.run_checked(&["stash", "ls"], cancel)?;
        Ok(parse_stash_listing(&lines))
    }

    fn query_ignore_glob(&self, cancel: &AtomicBool) -> Result<Option<String>> {
        let lines = self.run_checked(&["settings", IGNORE_GLOB_SETTING], cancel)?;
        Ok(parse_setting(&lines, IGNORE_GLOB_SETTING))
    }

    /// Project name captured by the last successful health probe
    fn project_name(&self) -> Option<String> {
        self.project_name.borrow().clone()
    }

    fn cancel_current_operation(&self) {
        self.abort.store(true, Ordering::SeqCst);
    }
}

/// Whether `path` is the root of an open fossil checkout
pub fn is_workspace(path: &Path) -> bool {
    CHECKOUT_FILES.iter().any(|name| path.join(name).is_file())
}

/// Closest directory at or above `start` that holds a checkout database
pub fn find_checkout_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| is_workspace(dir))
        .map(Path::to_path_buf)
}

fn spawn_reader<R: Read + Send + 'static>(mut source: R) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        let _ = source.read_to_end(&mut buffer);
        buffer
    })
}

/// Kill the child and wait for it. Reader threads are left to finish on their own
/// once the pipes close.
fn reap(child: &mut Child) {
    let _ = child.kill();
    if let Err(e) = child.wait() {
        log::warn!("Could not reap fossil process: {e}");
    }
}

fn join_reader(reader: Option<thread::JoinHandle<Vec<u8>>>) -> Vec<u8> {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

#[derive(Debug, PartialEq)]
pub struct InfoSummary {
    pub health: RepoHealth,
    pub project_name: Option<String>,
}

/// Interpret the `key: value` lines printed by `fossil info`
pub fn parse_info(lines: &[String]) -> InfoSummary {
    let mut project_name = None;

    for line in lines {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        if key == "fossil" && value == MSG_OLD_SCHEMA {
            return InfoSummary {
                health: RepoHealth::UnsupportedSchema,
                project_name: None,
            };
        }
        if key == "fossil" && value == MSG_NO_CHECKOUT {
            return InfoSummary {
                health: RepoHealth::NotFound,
                project_name: None,
            };
        }
        if key == "project-name" {
            project_name = Some(value.to_string());
        }
    }

    InfoSummary {
        health: RepoHealth::Ok,
        project_name,
    }
}

/// Split `fossil ls -l` output into keyword/path pairs
pub fn parse_status_listing(lines: &[String]) -> Vec<StatusLine> {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let (keyword, path) = line.split_once(char::is_whitespace)?;
            let path = path.trim();
            if path.is_empty() {
                return None;
            }
            Some(StatusLine::new(keyword, path))
        })
        .collect()
}

/// Value of one setting from `fossil settings` output.
///
/// Set values are printed as `name  (local)  value` or `name  (global)  value`,
/// optionally quoted. A bare `name` line means the setting is unset.
pub fn parse_setting(lines: &[String], name: &str) -> Option<String> {
    lines.iter().find_map(|line| {
        let (key, rest) = line.trim().split_once(char::is_whitespace)?;
        if key != name {
            return None;
        }
        let rest = rest.trim();
        let value = rest
            .strip_prefix("(local)")
            .or_else(|| rest.strip_prefix("(global)"))?
            .trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Pair each `ID: ...` header of `fossil stash ls` with the comment line after it
pub fn parse_stash_listing(lines: &[String]) -> Vec<(String, String)> {
    let mut stashes = Vec::new();
    let mut iter = lines.iter().map(|line| line.trim());

    while let Some(header) = iter.next() {
        // No stashes prints a single line without an id
        let Some((id, _)) = header.split_once(':') else {
            break;
        };
        let Some(name) = iter.next() else {
            break;
        };
        stashes.push((name.to_string(), id.trim().to_string()));
    }

    stashes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_info_ok() {
        let info = parse_info(&lines(
            "project-name: Demo Project\nrepository:   /tmp/demo.fossil\ncheckout:     abc123",
        ));
        assert_eq!(info.health, RepoHealth::Ok);
        assert_eq!(info.project_name.as_deref(), Some("Demo Project"));
    }

    #[test]
    fn test_parse_info_no_checkout() {
        let info = parse_info(&lines("fossil: not within an open checkout"));
        assert_eq!(info.health, RepoHealth::NotFound);
    }

    #[test]
    fn test_parse_info_old_schema() {
        let info = parse_info(&lines("fossil: incorrect repository schema version"));
        assert_eq!(info.health, RepoHealth::UnsupportedSchema);
    }

    #[test]
    fn test_parse_status_listing() {
        let parsed = parse_status_listing(&lines(
            "EDITED     src/main.c\nUNCHANGED  README\n\nADDED      docs/a file.txt\nBOGUS",
        ));
        assert_eq!(
            parsed,
            vec![
                StatusLine::new("EDITED", "src/main.c"),
                StatusLine::new("UNCHANGED", "README"),
                StatusLine::new("ADDED", "docs/a file.txt"),
            ]
        );
    }

    #[test]
    fn test_parse_stash_listing() {
        let parsed = parse_stash_listing(&lines(
            "   1: [5f3e2a1b] on 2024-01-02 10:00:00\n        wip parser\n   2: [9c8d7e6f] on 2024-01-01 09:00:00\n        experiment",
        ));
        assert_eq!(
            parsed,
            vec![
                ("wip parser".to_string(), "1".to_string()),
                ("experiment".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_stash_listing_empty() {
        assert!(parse_stash_listing(&lines("empty stash")).is_empty());
        assert!(parse_stash_listing(&[]).is_empty());
    }

    #[test]
    fn test_find_checkout_root() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;
        let nested = dir.path().join("src").join("core");
        std::fs::create_dir_all(&nested)?;
        assert_eq!(find_checkout_root(&nested), None);

        std::fs::write(dir.path().join(".fslckout"), "")?;
        assert!(is_workspace(dir.path()));
        assert_eq!(find_checkout_root(&nested), Some(dir.path().to_path_buf()));
        Ok(())
    }

    #[test]
    fn test_missing_binary_reports_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let bridge = FossilCli::new("/nonexistent/fossil-binary", dir.path());
        assert_eq!(bridge.repository_health(), RepoHealth::NotFound);
        assert!(matches!(
            bridge.query_status(&AtomicBool::new(false)),
            Err(NavigatorError::ExternalQueryFailed { .. })
        ));
    }

    #[test]
    fn test_parse_setting() {
        let output = lines("ignore-glob          (local)  *.o,build/*\nmanifest             (global) on");
        assert_eq!(
            parse_setting(&output, "ignore-glob").as_deref(),
            Some("*.o,build/*")
        );
        assert_eq!(parse_setting(&output, "manifest").as_deref(), Some("on"));
        assert_eq!(parse_setting(&output, "crlf-glob"), None);
    }

    #[test]
    fn test_parse_setting_unset_or_quoted() {
        assert_eq!(parse_setting(&lines("ignore-glob"), "ignore-glob"), None);
        assert_eq!(
            parse_setting(&lines("ignore-glob  (global)  \"*.tmp,*.bak\""), "ignore-glob")
                .as_deref(),
            Some("*.tmp,*.bak")
        );
    }

    /// Fake fossil whose `ls` hangs and whose other commands answer at once
    #[cfg(unix)]
    fn slow_fossil(dir: &Path) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fossil");
        std::fs::write(
            &path,
            "#!/bin/sh\ncase \"$1\" in\nls) exec sleep 5 ;;\n*) echo 'project-name: slow' ;;\nesac\n",
        )
        .unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_cancel_flag_stops_running_process() {
        let dir = tempfile::TempDir::new().unwrap();
        let bridge = FossilCli::new(slow_fossil(dir.path()), dir.path());
        let cancel = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&cancel);
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            flag.store(true, Ordering::SeqCst);
        });

        let started = std::time::Instant::now();
        let result = bridge.query_status(&cancel);
        canceller.join().unwrap();

        assert!(matches!(result, Err(NavigatorError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_cancel_handle_stops_running_process() {
        let dir = tempfile::TempDir::new().unwrap();
        let bridge = FossilCli::new(slow_fossil(dir.path()), dir.path());

        let handle = bridge.cancel_handle();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            handle.store(true, Ordering::SeqCst);
        });

        let started = std::time::Instant::now();
        let result = bridge.query_status(&AtomicBool::new(false));
        canceller.join().unwrap();

        assert!(matches!(result, Err(NavigatorError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_pending_cancel_is_consumed_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let bridge = FossilCli::new(slow_fossil(dir.path()), dir.path());

        bridge.cancel_current_operation();
        // The health probe leaves the pending cancel for the next query
        assert_eq!(bridge.repository_health(), RepoHealth::Ok);
        assert_eq!(bridge.project_name().as_deref(), Some("slow"));
        assert!(matches!(
            bridge.query_status(&AtomicBool::new(false)),
            Err(NavigatorError::Cancelled)
        ));
        assert!(!bridge.cancel_handle().load(Ordering::SeqCst));
    }
}
