//! Divide-and-conquer Delaunay triangulation of a 2D point set, after Guibas
//! & Stolfi. The public surface is a single function: [`triangulate`] takes
//! the points and returns every edge of their Delaunay triangulation.

use glam::DVec2;

mod driver;
mod environment;
mod hull;
mod types;
mod util;

pub use types::IdEdge;
pub use util::{angular_rank, in_circle, in_circle_oriented, orientation, Orientation};

use environment::Environment;
use hull::HullArena;

/// Computes the Delaunay triangulation of `points` and returns its edges,
/// each as the pair of zero-based indices into `points` (after an internal
/// sort), lower index first, with no duplicate and no self edge.
///
/// # Panics
///
/// Panics if `points` has fewer than two elements.
pub fn triangulate(points: Vec<DVec2>) -> Vec<IdEdge> {
    assert!(points.len() >= 2, "triangulate requires at least two points");

    let mut sorted = points;
    sorted.sort_unstable_by(|a, b| a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y)));

    let n = sorted.len();
    let mut env = Environment::new(n);
    let mut arena = HullArena::new();

    let root = driver::recurse(&sorted, &mut env, &mut arena, 0, n);
    root.destruct();

    env.all_edges()
}
