use glam::DVec2;

use crate::environment::Environment;
use crate::hull::{Hull, HullArena};
use crate::types::PointId;
use crate::util::{angular_rank, in_circle, in_circle_oriented, orientation, Orientation};

/// Recursively triangulates `points[i..j]` (already sorted by x, then y),
/// registering every edge it creates in `env` and returning the hull of the
/// region. Mirrors `DivideAndConquer::Triangulate` in the divide-and-conquer
/// source this crate is ported from: split in half, recurse on both halves,
/// merge.
pub(crate) fn recurse(
    points: &[DVec2],
    env: &mut Environment,
    arena: &mut HullArena,
    i: usize,
    j: usize,
) -> Hull {
    debug_assert!(j - i >= 2, "cannot triangulate fewer than two points");
    match j - i {
        2 => base_case_two(points, env, arena, i),
        3 => base_case_three(points, env, arena, i),
        n => {
            let mid = i + n / 2;
            let left = recurse(points, env, arena, i, mid);
            let right = recurse(points, env, arena, mid, j);
            divide_recurse(points, env, arena, left, right)
        }
    }
}

fn base_case_two(points: &[DVec2], env: &mut Environment, arena: &mut HullArena, i: usize) -> Hull {
    let p1 = PointId(i);
    let p2 = PointId(i + 1);
    let added = env.add(p1, p2);
    debug_assert!(added, "base case re-added an existing edge");
    if cfg!(debug_assertions) {
        eprintln!("[delaunay] base(2): edge ({}, {})", *p1, *p2);
    }
    Hull::from_two(arena, points, p1, p2)
}

fn base_case_three(points: &[DVec2], env: &mut Environment, arena: &mut HullArena, i: usize) -> Hull {
    let p1 = PointId(i);
    let p2 = PointId(i + 1);
    let p3 = PointId(i + 2);
    env.add(p1, p2);
    env.add(p2, p3);
    env.add(p1, p3);
    if cfg!(debug_assertions) {
        eprintln!("[delaunay] base(3): triangle ({}, {}, {})", *p1, *p2, *p3);
    }
    Hull::from_three(arena, points, p1, p2, p3)
}

fn divide_recurse(
    points: &[DVec2],
    env: &mut Environment,
    arena: &mut HullArena,
    left: Hull,
    right: Hull,
) -> Hull {
    let (merged, bottom, top) = Hull::merge(arena, points, left, right);
    if cfg!(debug_assertions) {
        eprintln!(
            "[delaunay] merge: bottom ({}, {}) top ({}, {})",
            *bottom.0, *bottom.1, *top.0, *top.1
        );
    }
    let added = env.add(bottom.0, bottom.1);
    debug_assert!(added, "bottom tangent edge already present in environment");
    // `top` bounds the seam from above but is not itself asserted against the
    // zipper's final edge: the zipper can legitimately finish one step short
    // of it when the last candidate pair is already linked by a hull edge.
    let _ = top;
    zipper(points, env, bottom);
    merged
}

/// Advances the base edge from `base` upward through the merge seam,
/// gathering candidates on both sides at each step, until no valid candidate
/// remains on either side.
fn zipper(points: &[DVec2], env: &mut Environment, base: (PointId, PointId)) {
    let (mut left, mut right) = base;
    loop {
        let lc = get_left_candidate(points, env, left, right);
        let rc = get_right_candidate(points, env, left, right);
        match debate_candidates(points, left, right, lc, rc) {
            None => break,
            Some((next_left, next_right)) => {
                let added = env.add(next_left, next_right);
                debug_assert!(added, "seam edge already present in environment");
                left = next_left;
                right = next_right;
            }
        }
    }
}

fn get_left_candidate(
    points: &[DVec2],
    env: &mut Environment,
    left: PointId,
    right: PointId,
) -> Option<PointId> {
    let candidates = gather_candidates(points, env, left, right, Orientation::CounterClockwise);
    select_candidate(env, points, left, right, Orientation::CounterClockwise, &candidates)
}

fn get_right_candidate(
    points: &[DVec2],
    env: &mut Environment,
    left: PointId,
    right: PointId,
) -> Option<PointId> {
    let candidates = gather_candidates(points, env, right, left, Orientation::Clockwise);
    select_candidate(env, points, right, left, Orientation::Clockwise, &candidates)
}

/// Points adjacent to `pa` (other than `pb`) on the `o` side of edge `pa ->
/// pb`, sorted by decreasing angular proximity to `pb - pa`, anchored at
/// `pa` — the candidate's neighbor closest to the base edge comes first.
fn gather_candidates(
    points: &[DVec2],
    env: &Environment,
    pa: PointId,
    pb: PointId,
    o: Orientation,
) -> Vec<PointId> {
    let mut candidates: Vec<PointId> = env
        .neighbors(pa)
        .iter()
        .copied()
        .filter(|&p| p != pb && orientation(points[pa], points[pb], points[p]) == o)
        .collect();

    let reference = points[pb] - points[pa];
    candidates.sort_by(|&p1, &p2| {
        let r1 = angular_rank(points[p1], reference, points[pa]);
        let r2 = angular_rank(points[p2], reference, points[pa]);
        r2.total_cmp(&r1)
    });
    candidates
}

/// Walks `candidates` in angular order, rejecting (and unlinking from `env`)
/// every candidate whose circumcircle with `pa, pb` contains the next one in
/// line, until a candidate survives the test against its successor or the
/// list is exhausted.
fn select_candidate(
    env: &mut Environment,
    points: &[DVec2],
    pa: PointId,
    pb: PointId,
    o: Orientation,
    candidates: &[PointId],
) -> Option<PointId> {
    if candidates.is_empty() {
        return None;
    }
    for w in candidates.windows(2) {
        let (cur, next) = (w[0], w[1]);
        if in_circle_oriented(points[pa], points[pb], points[cur], points[next], o) {
            let removed = env.remove(pa, cur);
            debug_assert!(removed, "expected to remove a rejected candidate edge");
        } else {
            return Some(cur);
        }
    }
    Some(*candidates.last().unwrap())
}

/// Picks the next seam edge from the left and right candidates, or `None` to
/// stop the zipper. When both candidates are viable, the one whose
/// circumcircle excludes the other wins; if all four points are exactly
/// cocircular, ties resolve toward the left candidate rather than asserting
/// (`spec.md` §9 Open Questions).
fn debate_candidates(
    points: &[DVec2],
    left: PointId,
    right: PointId,
    lc: Option<PointId>,
    rc: Option<PointId>,
) -> Option<(PointId, PointId)> {
    match (lc, rc) {
        (None, None) => None,
        (Some(lc), None) => Some((lc, right)),
        (None, Some(rc)) => Some((left, rc)),
        (Some(lc), Some(rc)) => {
            if !in_circle(points[left], points[right], points[lc], points[rc]) {
                Some((lc, right))
            } else if !in_circle(points[left], points[right], points[rc], points[lc]) {
                Some((left, rc))
            } else {
                // Both circles contain the other candidate: all four points
                // are exactly cocircular. Break toward the left candidate
                // instead of asserting (spec.md §9 Open Questions).
                Some((lc, right))
            }
        }
    }
}
