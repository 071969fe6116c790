use fossil_navigator::{build_tree, NullProgress, ScanOptions, Workspace};
use std::sync::atomic::AtomicBool;

mod common;
use common::{bridge::MockBridge, workspace::*};

#[cfg(test)]
mod tree_tests {
    use super::*;

    #[test]
    fn test_tree_from_scanned_workspace() -> anyhow::Result<()> {
        let ws = create_sample_workspace()?;
        let (bridge, _script) = MockBridge::new(ws.path());
        let mut workspace = Workspace::new(Box::new(bridge));
        workspace.scan_workspace(&ScanOptions::default(), &mut NullProgress, &AtomicBool::new(false))?;

        let tree = workspace.tree();
        let walked: Vec<(usize, &str)> = tree
            .walk()
            .into_iter()
            .map(|(depth, node)| (depth, node.full_path()))
            .collect();

        assert_eq!(
            walked,
            vec![(0, ""), (1, "build"), (1, "src"), (2, "src/util")]
        );
        Ok(())
    }

    #[test]
    fn test_every_path_has_a_node_with_its_ancestors() {
        let paths = ["x/y/z", "a", "x/q", "a/b/c/d"];
        let tree = build_tree(paths);

        for path in paths {
            assert!(tree.find(path).is_some(), "missing {path}");
        }
        for ancestor in ["x", "x/y", "a/b", "a/b/c"] {
            assert!(tree.find(ancestor).is_some(), "missing {ancestor}");
        }
        // root + x, x/y, x/y/z, x/q, a, a/b, a/b/c, a/b/c/d
        assert_eq!(tree.node_count(), 9);
    }

    #[test]
    fn test_shared_prefixes_are_not_duplicated() {
        let tree = build_tree(["lib/core", "lib/core", "lib/core/io", "lib"]);

        assert_eq!(tree.children().len(), 1);
        let lib = &tree.children()[0];
        assert_eq!(lib.name(), "lib");
        assert_eq!(lib.children().len(), 1);
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_input_order_does_not_change_sorted_shape() {
        let mut forward = build_tree(["a/b", "a/c", "d"]);
        let mut backward = build_tree(["d", "a/c", "a/b"]);
        forward.sort();
        backward.sort();

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_root_only_for_empty_and_root_paths() {
        let tree = build_tree(["", ""]);
        assert!(tree.is_root());
        assert_eq!(tree.node_count(), 1);
    }
}
