//! Kruskal's algorithm over an explicit edge list.

use std::mem;

use super::Point;

/// Union-find with path halving and union by size.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    pub fn new(count: usize) -> Self {
        Self { parent: (0..count).collect(), size: vec![1; count] }
    }

    pub fn find(&mut self, mut item: usize) -> usize {
        while self.parent[item] != item {
            self.parent[item] = self.parent[self.parent[item]];
            item = self.parent[item];
        }
        item
    }

    /// Returns `false` when both items were already in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut root_a, mut root_b) = (self.find(a), self.find(b));
        if root_a == root_b {
            return false;
        }
        if self.size[root_a] < self.size[root_b] {
            mem::swap(&mut root_a, &mut root_b);
        }
        self.parent[root_b] = root_a;
        self.size[root_a] += self.size[root_b];
        true
    }
}

/// Ties on length are broken by the endpoint indices, so the result only depends on
/// point order.
pub(super) fn kruskal(points: &[Point], edges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut ordered: Vec<(i64, usize, usize)> = edges
        .iter()
        .map(|&(a, b)| {
            let (low, high) = (a.min(b), a.max(b));
            (points[low].distance_squared(points[high]), low, high)
        })
        .collect();
    ordered.sort_unstable();

    let mut forest = DisjointSet::new(points.len());
    let mut tree = Vec::with_capacity(points.len().saturating_sub(1));
    for (_, low, high) in ordered {
        if tree.len() + 1 >= points.len() {
            break;
        }
        if forest.union(low, high) {
            tree.push((low, high));
        }
    }
    tree
}
