//! Polygon splitting for the face assembler.
//!
//! Both methods return triangles as triples of corner positions within the
//! polygon (not attribute indices) and always produce `n - 2` triangles.

use glam::{Vec2, Vec3};

use crate::config::TriangulationMethod;

const EPS: f32 = 1e-12;

/// Triangulate an `n`-corner polygon. `positions` holds the corner positions in
/// order; it is only consulted by [`TriangulationMethod::EarClip`] and may be
/// `None` when a position could not be looked up, in which case the fan is used.
pub fn triangulate(
    method: TriangulationMethod,
    n: usize,
    positions: Option<&[Vec3]>,
) -> Vec<[usize; 3]> {
    match (method, positions) {
        (TriangulationMethod::EarClip, Some(points)) if points.len() == n && n > 3 => {
            ear_clip(points)
        }
        _ => fan(n).collect(),
    }
}

/// `(0, i, i + 1)` for `i` in `1..n - 1`.
pub fn fan(n: usize) -> impl Iterator<Item = [usize; 3]> {
    (1..n.saturating_sub(1)).map(|i| [0, i, i + 1])
}

/// Ear clipping in the plane of the polygon's Newell normal.
pub fn ear_clip(points: &[Vec3]) -> Vec<[usize; 3]> {
    let n = points.len();
    let normal = newell_normal(points);
    if normal.length_squared() <= EPS {
        log::trace!("degenerate {n}-gon, using fan");
        return fan(n).collect();
    }

    let (u, v) = plane_basis(normal.normalize());
    let flat: Vec<Vec2> = points.iter().map(|p| Vec2::new(p.dot(u), p.dot(v))).collect();

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);

    while remaining.len() > 3 {
        let m = remaining.len();
        let ear = (0..m).find(|&i| {
            let a = remaining[(i + m - 1) % m];
            let b = remaining[i];
            let c = remaining[(i + 1) % m];
            is_ear(&flat, &remaining, a, b, c)
        });

        match ear {
            Some(i) => {
                let a = remaining[(i + m - 1) % m];
                let b = remaining[i];
                let c = remaining[(i + 1) % m];
                triangles.push([a, b, c]);
                remaining.remove(i);
            }
            None => {
                // No clean ear left (self-intersecting or duplicated corners).
                log::trace!("ear clipping stalled with {m} corners left, finishing with fan");
                let base = remaining[0];
                for w in remaining[1..].windows(2) {
                    triangles.push([base, w[0], w[1]]);
                }
                return triangles;
            }
        }
    }

    triangles.push([remaining[0], remaining[1], remaining[2]]);
    triangles
}

fn newell_normal(points: &[Vec3]) -> Vec3 {
    let n = points.len();
    (0..n).fold(Vec3::ZERO, |acc, i| acc + points[i].cross(points[(i + 1) % n]))
}

/// Orthonormal `(u, v)` with `u x v = normal`.
fn plane_basis(normal: Vec3) -> (Vec3, Vec3) {
    let (u, _) = normal.any_orthonormal_pair();
    (u, normal.cross(u))
}

fn cross2(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

fn is_ear(flat: &[Vec2], remaining: &[usize], a: usize, b: usize, c: usize) -> bool {
    let (pa, pb, pc) = (flat[a], flat[b], flat[c]);
    if cross2(pb - pa, pc - pb) <= EPS {
        return false;
    }
    !remaining
        .iter()
        .filter(|&&k| k != a && k != b && k != c)
        .any(|&k| in_triangle(flat[k], pa, pb, pc))
}

/// Inclusive of the boundary.
fn in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = cross2(b - a, p - a);
    let d2 = cross2(c - b, p - b);
    let d3 = cross2(a - c, p - c);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}
