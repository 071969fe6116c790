//! Fossil Navigator - workspace status, folder tree and stash browser for Fossil checkouts.
//!
//! The library is built around a workspace reconciliation engine: it asks `fossil`
//! for the status of every tracked file, walks the working directory for everything
//! else, and classifies each file exactly once. The result feeds a flat file list, a
//! folder tree and a stash list.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - [`Workspace`]: Owns one checkout's files, folders, stashes and view state
//! - [`Bridge`] / [`FossilCli`]: How the engine talks to `fossil`
//! - [`build_tree`], [`ViewMode`], [`StatusMask`]: Tree building and projections
//! - [`NavigatorError`]: Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    build_tree,
    // Bridge
    Bridge,
    // Status model
    FileInfo,
    FileMap,
    FileStatus,
    FossilCli,
    IgnoreMatcher,
    LogProgress,
    // Error handling
    NavigatorError,
    NavigatorConfig,
    NullProgress,
    PathNode,
    ProgressSink,
    RepoHealth,
    Result,
    ScanOptions,
    ScanOutcome,
    ScanSummary,
    Selection,
    StashIndex,
    StatusLine,
    StatusMask,
    StatusRecord,
    ViewMode,
    ViewState,
    // Workspace aggregate
    Workspace,
    WorkspaceEvent,
};
