//! Planar Delaunay triangulation and Euclidean minimum spanning tree over integer points.
//!
//! Points in, triangulation out, and a spanning tree extracted from the triangulation
//! edges. All predicates run in exact integer arithmetic, so the same input always
//! yields the same edges in the same order.

mod delaunay;
mod mst;

use std::collections::BTreeSet;

use tracing::debug;

pub use mst::DisjointSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(self, other: Self) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }
}

/// One spanning-tree edge. `origin` is always the endpoint that sorts first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    origin: Point,
    destination: Point,
}

impl Edge {
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn destination(&self) -> Point {
        self.destination
    }

    pub fn length_squared(&self) -> i64 {
        self.origin.distance_squared(self.destination)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Triangulation {
    points: Vec<Point>,
    triangles: Vec<[usize; 3]>,
    edges: Vec<(usize, usize)>,
}

impl Triangulation {
    /// Input points, sorted and deduplicated. Triangle and edge indices refer to this slice.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Triangles whose three corners are all input points, counter-clockwise.
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Unique undirected edges `(low, high)` in ascending order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn minimum_spanning_tree(&self) -> Vec<Edge> {
        let mut tree = mst::kruskal(&self.points, &self.edges);
        if tree.len() + 1 < self.points.len() {
            // Degenerate inputs (collinear runs) can leave the triangulation disconnected.
            debug!(
                points = self.points.len(),
                tree_edges = tree.len(),
                "triangulation does not span input, falling back to complete graph"
            );
            tree = mst::kruskal(&self.points, &complete_graph(self.points.len()));
        }
        tree.into_iter()
            .map(|(a, b)| Edge { origin: self.points[a], destination: self.points[b] })
            .collect()
    }
}

pub fn triangulate(points: &[Point]) -> Triangulation {
    let points: Vec<Point> = points.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
    if points.len() < 2 {
        return Triangulation { points, triangles: Vec::new(), edges: Vec::new() };
    }

    let all_triangles = delaunay::bowyer_watson(&points);
    let real = points.len();

    let mut edges = BTreeSet::new();
    let mut triangles = Vec::new();
    for triangle in &all_triangles {
        for (a, b) in [(triangle[0], triangle[1]), (triangle[1], triangle[2]), (triangle[2], triangle[0])]
        {
            if a < real && b < real {
                edges.insert((a.min(b), a.max(b)));
            }
        }
        if triangle.iter().all(|&vertex| vertex < real) {
            triangles.push(*triangle);
        }
    }
    triangles.sort_unstable();

    debug!(points = real, triangles = triangles.len(), edges = edges.len(), "triangulated");
    Triangulation { points, triangles, edges: edges.into_iter().collect() }
}

fn complete_graph(count: usize) -> Vec<(usize, usize)> {
    let mut edges = Vec::with_capacity(count * count.saturating_sub(1) / 2);
    for a in 0..count {
        for b in (a + 1)..count {
            edges.push((a, b));
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn tree_weight(edges: &[Edge]) -> f64 {
        edges.iter().map(|edge| (edge.length_squared() as f64).sqrt()).sum()
    }

    fn prim_weight(points: &[Point]) -> f64 {
        let n = points.len();
        if n < 2 {
            return 0.0;
        }
        let mut in_tree = vec![false; n];
        let mut best = vec![f64::INFINITY; n];
        best[0] = 0.0;
        let mut total = 0.0;
        for _ in 0..n {
            let next = (0..n)
                .filter(|&i| !in_tree[i])
                .min_by(|&a, &b| best[a].total_cmp(&best[b]))
                .unwrap();
            in_tree[next] = true;
            total += best[next];
            for other in 0..n {
                if !in_tree[other] {
                    let d = (points[next].distance_squared(points[other]) as f64).sqrt();
                    if d < best[other] {
                        best[other] = d;
                    }
                }
            }
        }
        total
    }

    #[test]
    fn fewer_than_two_points_have_no_edges() {
        assert!(triangulate(&[]).minimum_spanning_tree().is_empty());
        let single = triangulate(&[Point::new(3, 4)]);
        assert!(single.edges().is_empty());
        assert!(single.minimum_spanning_tree().is_empty());
    }

    #[test]
    fn duplicate_points_are_ignored() {
        let tri = triangulate(&[Point::new(1, 1), Point::new(1, 1), Point::new(5, 1)]);
        assert_eq!(tri.points(), &[Point::new(1, 1), Point::new(5, 1)]);
        assert_eq!(tri.minimum_spanning_tree().len(), 1);
    }

    #[test]
    fn two_points_yield_one_edge_from_lower_to_higher() {
        let tree = triangulate(&[Point::new(10, 0), Point::new(0, 0)]).minimum_spanning_tree();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].origin(), Point::new(0, 0));
        assert_eq!(tree[0].destination(), Point::new(10, 0));
    }

    #[test]
    fn square_triangulates_into_two_triangles() {
        let tri = triangulate(&[
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(0, 4),
            Point::new(4, 4),
        ]);
        assert_eq!(tri.triangles().len(), 2);
        // Four sides plus one diagonal.
        assert_eq!(tri.edges().len(), 5);
        assert_eq!(tri.minimum_spanning_tree().len(), 3);
    }

    #[test]
    fn collinear_points_chain_in_order() {
        let points: Vec<Point> = (0..6).map(|i| Point::new(i * 3, 7)).collect();
        let tree = triangulate(&points).minimum_spanning_tree();
        assert_eq!(tree.len(), 5);
        for edge in &tree {
            assert_eq!(edge.length_squared(), 9);
        }
    }

    #[test]
    fn spanning_tree_matches_brute_force_weight_on_fixed_cloud() {
        let points = [
            Point::new(0, 0),
            Point::new(12, 3),
            Point::new(-7, 9),
            Point::new(4, -11),
            Point::new(20, 20),
            Point::new(-15, -2),
            Point::new(6, 14),
        ];
        let tree = triangulate(&points).minimum_spanning_tree();
        assert_eq!(tree.len(), points.len() - 1);
        assert!((tree_weight(&tree) - prim_weight(&points)).abs() < 1e-9);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn spanning_tree_is_minimal_and_spanning(
            raw in proptest::collection::vec((-40_i32..40, -40_i32..40), 0..40)
        ) {
            let points: Vec<Point> = raw.into_iter().map(|(x, y)| Point::new(x, y)).collect();
            let tri = triangulate(&points);
            let unique = tri.points().to_vec();
            let tree = tri.minimum_spanning_tree();

            prop_assert_eq!(tree.len(), unique.len().saturating_sub(1));

            let mut forest = DisjointSet::new(unique.len());
            for edge in &tree {
                let a = unique.binary_search(&edge.origin()).unwrap();
                let b = unique.binary_search(&edge.destination()).unwrap();
                prop_assert!(a < b, "origin must sort before destination");
                prop_assert!(forest.union(a, b), "spanning tree must not contain a cycle");
            }

            prop_assert!((tree_weight(&tree) - prim_weight(&unique)).abs() < 1e-6);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        #[test]
        fn spanning_tree_stays_minimal_on_wide_clouds(
            raw in proptest::collection::vec((-20_000_i32..20_000, -20_000_i32..20_000), 2..60)
        ) {
            let points: Vec<Point> = raw.into_iter().map(|(x, y)| Point::new(x, y)).collect();
            let tri = triangulate(&points);
            let tree = tri.minimum_spanning_tree();

            prop_assert_eq!(tree.len(), tri.points().len() - 1);
            prop_assert!((tree_weight(&tree) - prim_weight(tri.points())).abs() < 1e-6);
        }
    }
}
