//! Folder tree derived from the distinct directory paths of a scan.
//!
//! # Public API
//! - [`PathNode`]: One folder with its children, keyed by segment name
//! - [`build_tree`]: Pure construction from a set of `/`-separated paths
//!
//! The root node always stands for the workspace root (empty path) and exists
//! even when no path is given. Every ancestor of every input path gets exactly one
//! node. Children keep first-seen order until [`PathNode::sort`] is called.

use crate::core::record::{join_path, PATH_SEPARATOR};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathNode {
    name: String,
    full_path: String,
    children: Vec<PathNode>,
}

impl PathNode {
    pub fn root() -> Self {
        Self {
            name: String::new(),
            full_path: String::new(),
            children: Vec::new(),
        }
    }

    fn child(name: &str, parent_path: &str) -> Self {
        Self {
            name: name.to_string(),
            full_path: join_path(parent_path, name),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn children(&self) -> &[PathNode] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.full_path.is_empty()
    }

    /// Insert `path` below this node, creating every missing segment
    pub fn add_path(&mut self, path: &str) {
        let mut node = self;
        for segment in path.split(PATH_SEPARATOR).filter(|s| !s.is_empty()) {
            let existing = node.children.iter().position(|c| c.name == segment);
            let idx = match existing {
                Some(idx) => idx,
                None => {
                    let child = PathNode::child(segment, &node.full_path);
                    node.children.push(child);
                    node.children.len() - 1
                }
            };
            node = &mut node.children[idx];
        }
    }

    /// Look up a descendant (or this node) by full path
    pub fn find(&self, path: &str) -> Option<&PathNode> {
        let mut node = self;
        for segment in path.split(PATH_SEPARATOR).filter(|s| !s.is_empty()) {
            node = node.children.iter().find(|c| c.name == segment)?;
        }
        Some(node)
    }

    /// Number of nodes in this subtree, itself included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(PathNode::node_count).sum::<usize>()
    }

    /// Sort children by name at every level
    pub fn sort(&mut self) {
        self.children.sort_by(|a, b| a.name.cmp(&b.name));
        for child in &mut self.children {
            child.sort();
        }
    }

    /// Depth-first pre-order walk yielding `(depth, node)`, root at depth 0
    pub fn walk(&self) -> Vec<(usize, &PathNode)> {
        let mut out = Vec::with_capacity(self.node_count());
        let mut stack = vec![(0usize, self)];
        while let Some((depth, node)) = stack.pop() {
            out.push((depth, node));
            for child in node.children.iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        out
    }
}

/// Build the folder tree for a set of directory paths
pub fn build_tree<I, S>(paths: I) -> PathNode
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut root = PathNode::root();
    for path in paths {
        let path = path.as_ref();
        if path.is_empty() {
            continue;
        }
        root.add_path(path);
    }
    root
}
