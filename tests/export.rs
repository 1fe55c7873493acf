use kdthree::{Axis, KdTree, NodeSnapshot, TreeExport};

fn collect_ranks(node: &NodeSnapshot, out: &mut Vec<usize>) {
    if let Some(left) = &node.left {
        collect_ranks(left, out);
    }
    out.push(node.inorder_pos);
    if let Some(right) = &node.right {
        collect_ranks(right, out);
    }
}

fn check_levels(node: &NodeSnapshot, depth: i64) {
    assert_eq!(node.depth, depth);
    let expected = match (-depth) % 3 {
        0 => Axis::X,
        1 => Axis::Y,
        _ => Axis::Z,
    };
    assert_eq!(node.level, expected);
    for child in [&node.left, &node.right].into_iter().flatten() {
        check_levels(child, depth - 1);
    }
}

#[test]
fn test_sample_export_reads_back() {
    let tree = KdTree::sample();
    let json = tree.to_json().expect("Export should succeed");

    let export: TreeExport = serde_json::from_str(&json).expect("Export should parse");
    let root = export.tree_structure.expect("Sample tree is not empty");
    assert_eq!(root.count(), tree.len());
    assert_eq!((root.x, root.y, root.z), (50.0, 50.0, 50.0));
    check_levels(&root, 0);
}

#[test]
fn test_exported_ranks_are_contiguous_inorder() {
    let mut tree = KdTree::new();
    tree.random_points_seeded(250, 99);
    let root = tree.snapshot().unwrap();

    let mut ranks = Vec::new();
    collect_ranks(&root, &mut ranks);
    let expected: Vec<usize> = (0..tree.len()).collect();
    assert_eq!(ranks, expected);
}

#[test]
fn test_ranks_refresh_after_insertion() {
    let mut tree = KdTree::from_points([[50.0, 50.0, 50.0], [75.0, 75.0, 75.0]]).unwrap();
    assert_eq!(tree.snapshot().unwrap().inorder_pos, 0);

    tree.add([10.0, 10.0, 10.0]).unwrap();
    let root = tree.snapshot().unwrap();
    assert_eq!(root.inorder_pos, 1);
    assert_eq!(root.right.as_ref().unwrap().inorder_pos, 2);
}

#[test]
fn test_json_uses_viewer_field_names() {
    let json = KdTree::sample().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let root = &value["tree_structure"];
    for key in ["x", "y", "z", "inorder_pos", "depth", "level", "left", "right"] {
        assert!(root.get(key).is_some(), "Missing field {}", key);
    }
    assert_eq!(root["level"], "X");
    assert_eq!(root["left"]["depth"], -1);
}
