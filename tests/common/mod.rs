//! Shared test utilities for fossil-navigator
//!
//! Engine tests drive a [`Workspace`](fossil_navigator::Workspace) through a
//! scripted bridge over a real temporary directory. CLI tests run the binary
//! against a stand-in `fossil` shell script.

pub mod assertions;
pub mod bridge;
pub mod workspace;
