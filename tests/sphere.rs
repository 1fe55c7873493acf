use kdthree::{cmp_points, distance, KdTree, Point};
use rand::Rng;
use std::collections::HashSet;

fn brute_force(tree: &KdTree, center: Point, radius: f64) -> Vec<Point> {
    let mut expected: Vec<Point> = tree
        .nodes()
        .iter()
        .map(|n| n.point())
        .filter(|p| {
            let d = distance(p, &center);
            d > 0.0 && d <= radius
        })
        .collect();
    expected.sort_by(cmp_points);
    expected
}

/// A node is reachable when every edge above it is either on the near side of
/// the center or passes the crossing test.
fn reachable(tree: &KdTree, index: usize, center: Point, radius: f64) -> bool {
    let mut child = index;
    while let Some(parent_idx) = tree.nodes()[child].parent() {
        let parent = &tree.nodes()[parent_idx];
        let a = parent.axis().index();
        let diff = center[a] - parent.point()[a];
        let near = if diff < 0.0 { parent.left() } else { parent.right() };
        if near != Some(child) && diff.abs() > radius {
            return false;
        }
        child = parent_idx;
    }
    true
}

fn random_point(rng: &mut impl Rng) -> Point {
    [rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)]
}

#[test]
fn test_sphere_example_from_three_points() {
    let tree = KdTree::from_points([[50.0, 50.0, 50.0], [25.0, 25.0, 25.0], [75.0, 75.0, 75.0]]).unwrap();
    let q = tree.find_sphere_neighbors([50.0, 50.0, 50.0], 50.0).unwrap();
    assert!(q.center_found);
    assert!(q.neighbors.contains(&[25.0, 25.0, 25.0]));
    assert!(q.neighbors.contains(&[75.0, 75.0, 75.0]));
    assert_eq!(q.neighbors.len(), 2);
}

#[test]
fn test_sphere_matches_brute_force() {
    let mut rng = rand::thread_rng();
    let mut tree = KdTree::new();
    tree.random_points_seeded(500, 11);

    for _ in 0..200 {
        let center = random_point(&mut rng);
        let radius = rng.gen_range(0.0..40.0);
        let q = tree.find_sphere_neighbors(center, radius).unwrap();
        assert_eq!(q.neighbors, brute_force(&tree, center, radius), "Mismatch at {:?} r={}", center, radius);
    }
}

#[test]
fn test_sphere_centered_on_tree_point() {
    let mut rng = rand::thread_rng();
    let mut tree = KdTree::new();
    tree.random_points_seeded(300, 5);

    for _ in 0..50 {
        let idx = rng.gen_range(0..tree.len());
        let center = tree.nodes()[idx].point();
        let radius = rng.gen_range(0.0..30.0);
        let q = tree.find_sphere_neighbors(center, radius).unwrap();
        assert!(q.center_found);
        assert!(!q.neighbors.contains(&center), "Center must not be its own neighbor");
        assert_eq!(q.neighbors, brute_force(&tree, center, radius));

        let zero = tree.find_sphere_neighbors(center, 0.0).unwrap();
        assert!(zero.neighbors.is_empty());
        assert!(zero.center_found);
    }
}

#[test]
fn test_trace_visits_exactly_the_unpruned_nodes() {
    let mut rng = rand::thread_rng();
    let mut tree = KdTree::new();
    tree.random_points_seeded(400, 23);
    let layout = tree.layout();

    for _ in 0..50 {
        let center = random_point(&mut rng);
        let radius = rng.gen_range(0.0..25.0);
        let q = tree.find_sphere_neighbors(center, radius).unwrap();

        let visited: Vec<usize> = q.trace.iter().map(|s| s.coord.rank).collect();
        let unique: HashSet<usize> = visited.iter().copied().collect();
        assert_eq!(unique.len(), visited.len(), "A node was visited twice");

        let expected: HashSet<usize> = (0..tree.len())
            .filter(|&i| reachable(&tree, i, center, radius))
            .map(|i| layout.coord(i).rank)
            .collect();
        assert_eq!(unique, expected);
    }
}

#[test]
fn test_membership_parallels_trace() {
    let tree = KdTree::sample();
    let center = [30.0, 20.0, 15.0];
    let radius = 25.0;
    let q = tree.find_sphere_neighbors(center, radius).unwrap();

    assert_eq!(q.membership.len(), q.trace.len() + 1);
    assert_eq!(q.membership[0], None);
    for (step, member) in q.trace.iter().zip(&q.membership[1..]) {
        if distance(&step.point, &center) <= radius {
            assert_eq!(*member, Some(step.coord));
        } else {
            assert_eq!(*member, None);
        }
    }
    assert_eq!(q.hits(), q.neighbors.len() + usize::from(q.center_found));
}

#[test]
fn test_huge_radius_visits_everything() {
    let tree = KdTree::sample();
    let q = tree.find_sphere_neighbors([0.0, 0.0, 0.0], f64::INFINITY).unwrap();
    assert_eq!(q.trace.len(), tree.len());
    assert_eq!(q.neighbors.len(), tree.len());
}
