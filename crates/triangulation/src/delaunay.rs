//! Bowyer–Watson insertion with exact integer predicates.

use std::collections::BTreeMap;

use super::Point;

/// Keeps the in-circle determinant inside `i128` range: with super vertices at most
/// `6 × 2^26` apart its largest term stays below `2^120`.
const MAX_SUPER_MARGIN: i64 = 1 << 26;

/// Triangulates `points` (sorted, unique, at least two) together with three enclosing
/// super-triangle vertices stored at indices `points.len()..points.len() + 3`.
///
/// Triangles touching the super vertices are kept so callers can recover hull edges.
pub(super) fn bowyer_watson(points: &[Point]) -> Vec<[usize; 3]> {
    let mut vertices: Vec<(i64, i64)> =
        points.iter().map(|point| (i64::from(point.x), i64::from(point.y))).collect();
    let real = vertices.len();
    vertices.extend(super_triangle(&vertices));

    let mut triangles = vec![counter_clockwise(&vertices, [real, real + 1, real + 2])];

    for inserted in 0..real {
        let point = vertices[inserted];
        let (bad, good): (Vec<[usize; 3]>, Vec<[usize; 3]>) = triangles
            .into_iter()
            .partition(|triangle| in_circumcircle(&vertices, *triangle, point));
        triangles = good;

        // Cavity boundary: edges owned by exactly one bad triangle.
        let mut edge_owners: BTreeMap<(usize, usize), (usize, usize, u8)> = BTreeMap::new();
        for triangle in &bad {
            for (a, b) in [
                (triangle[0], triangle[1]),
                (triangle[1], triangle[2]),
                (triangle[2], triangle[0]),
            ] {
                edge_owners.entry((a.min(b), a.max(b))).or_insert((a, b, 0)).2 += 1;
            }
        }

        for (a, b, owners) in edge_owners.into_values() {
            if owners == 1 {
                triangles.push(counter_clockwise(&vertices, [a, b, inserted]));
            }
        }
    }

    triangles
}

fn super_triangle(vertices: &[(i64, i64)]) -> [(i64, i64); 3] {
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (i64::MAX, i64::MAX, i64::MIN, i64::MIN);
    for &(x, y) in vertices {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    let span = (max_x - min_x).max(max_y - min_y).max(1);
    let mid_x = (min_x + max_x) / 2;
    let mid_y = (min_y + max_y) / 2;

    // Small inputs get a cubic margin, so hull triangles match the unbounded
    // triangulation. Once the clamp applies the margin is still many spans wide: no
    // super vertex enters the diametral circle of two input points, so every Gabriel
    // edge survives, and with it every spanning-tree edge.
    let margin = span.saturating_mul(span).saturating_mul(span).saturating_mul(4).saturating_add(16);
    let margin = margin.min(MAX_SUPER_MARGIN);

    [
        (mid_x - 3 * margin, mid_y - margin),
        (mid_x + 3 * margin, mid_y - margin),
        (mid_x, mid_y + 3 * margin),
    ]
}

fn orientation(vertices: &[(i64, i64)], a: usize, b: usize, c: usize) -> i128 {
    let (ax, ay) = vertices[a];
    let (bx, by) = vertices[b];
    let (cx, cy) = vertices[c];
    i128::from(bx - ax) * i128::from(cy - ay) - i128::from(by - ay) * i128::from(cx - ax)
}

fn counter_clockwise(vertices: &[(i64, i64)], triangle: [usize; 3]) -> [usize; 3] {
    let [a, b, c] = triangle;
    if orientation(vertices, a, b, c) < 0 { [a, c, b] } else { [a, b, c] }
}

/// Strictly inside; cocircular points are left outside.
fn in_circumcircle(vertices: &[(i64, i64)], triangle: [usize; 3], point: (i64, i64)) -> bool {
    let [a, b, c] = triangle.map(|index| {
        let (x, y) = vertices[index];
        let dx = i128::from(x - point.0);
        let dy = i128::from(y - point.1);
        (dx, dy, dx * dx + dy * dy)
    });

    let determinant = a.0 * (b.1 * c.2 - b.2 * c.1) - a.1 * (b.0 * c.2 - b.2 * c.0)
        + a.2 * (b.0 * c.1 - b.1 * c.0);
    determinant > 0
}
