use glam::DVec2;

use crate::types::{NodeId, PointId};
use crate::util::{orientation, Orientation};

/// One vertex of a hull ring. `prev`/`next` are arena indices rather than
/// pointers (`spec.md` §9's arena recommendation): releasing a node is
/// unlinking it, not deallocating it — the whole arena is freed in bulk when
/// the driver that owns it is dropped.
#[derive(Debug, Clone, Copy)]
struct HullNode {
    point: PointId,
    prev: NodeId,
    next: NodeId,
    /// Cleared when the node is released between two merge tangents. Dead
    /// nodes stay in the arena (it is freed in bulk, not node by node) but
    /// must never be reachable from a live ring again.
    alive: bool,
}

/// Owns every hull node created during one triangulation call. A `Hull`
/// value only makes sense against the arena that produced it.
#[derive(Debug, Default)]
pub struct HullArena {
    nodes: Vec<HullNode>,
}

impl HullArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn push(&mut self, point: PointId) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(HullNode {
            point,
            prev: id,
            next: id,
            alive: true,
        });
        id
    }

    fn link(&mut self, a: NodeId, b: NodeId) {
        debug_assert!(self.nodes[a].alive && self.nodes[b].alive, "linked a released hull node");
        self.nodes[a].next = b;
        self.nodes[b].prev = a;
    }

    fn pid(&self, n: NodeId) -> PointId {
        debug_assert!(self.nodes[n].alive, "read point id of a released hull node");
        self.nodes[n].point
    }

    fn prev(&self, n: NodeId) -> NodeId {
        debug_assert!(self.nodes[n].alive, "read prev of a released hull node");
        self.nodes[n].prev
    }

    fn next(&self, n: NodeId) -> NodeId {
        debug_assert!(self.nodes[n].alive, "read next of a released hull node");
        self.nodes[n].next
    }

    fn coord(&self, n: NodeId, points: &[DVec2]) -> DVec2 {
        points[*self.pid(n)]
    }

    /// Unlinks every node strictly between `back` and `front` going forward
    /// (neither endpoint included) and marks them dead. A no-op when `back`
    /// and `front` are already adjacent.
    fn release_between(&mut self, back: NodeId, front: NodeId) {
        let mut cur = self.next(back);
        while cur != front {
            let next = self.next(cur);
            self.nodes[cur].alive = false;
            cur = next;
        }
    }
}

/// A convex hull in its `valid` lifecycle state: a cyclic, counter-clockwise
/// doubly-linked sequence of nodes, identified only by its extremal handles.
/// `Hull` is intentionally not `Copy`/`Clone`: `merge` consumes both source
/// hulls by value, so "valid -> invalidated" (`spec.md` §3/§4.C) is a plain
/// Rust move rather than a runtime null-handle check.
#[derive(Debug)]
pub struct Hull {
    left_most: NodeId,
    right_most: NodeId,
}

impl Hull {
    pub fn left_most(&self) -> NodeId {
        self.left_most
    }

    pub fn right_most(&self) -> NodeId {
        self.right_most
    }

    /// Builds a degenerate two-node ring. `left_most` is always the
    /// smaller-x (tie: smaller-y) point, regardless of argument order —
    /// resolving the Open Question about the source's dead swap branch.
    pub fn from_two(arena: &mut HullArena, points: &[DVec2], p1: PointId, p2: PointId) -> Self {
        let n1 = arena.push(p1);
        let n2 = arena.push(p2);
        arena.link(n1, n2);
        arena.link(n2, n1);

        let (left_most, right_most) = if is_left_of(points[p1], points[p2]) {
            (n1, n2)
        } else {
            (n2, n1)
        };
        Self {
            left_most,
            right_most,
        }
    }

    /// Builds a three-node ring, oriented counter-clockwise.
    pub fn from_three(
        arena: &mut HullArena,
        points: &[DVec2],
        p1: PointId,
        p2: PointId,
        p3: PointId,
    ) -> Self {
        let n1 = arena.push(p1);
        let n2 = arena.push(p2);
        let n3 = arena.push(p3);

        match orientation(points[p1], points[p2], points[p3]) {
            Orientation::CounterClockwise => {
                arena.link(n1, n2);
                arena.link(n2, n3);
                arena.link(n3, n1);
            }
            _ => {
                arena.link(n1, n3);
                arena.link(n3, n2);
                arena.link(n2, n1);
            }
        }

        let nodes = [n1, n2, n3];
        let left_most = *nodes
            .iter()
            .min_by(|&&a, &&b| cmp_left_to_right(arena.coord(a, points), arena.coord(b, points)))
            .unwrap();
        let right_most = *nodes
            .iter()
            .max_by(|&&a, &&b| cmp_left_to_right(arena.coord(a, points), arena.coord(b, points)))
            .unwrap();

        Self {
            left_most,
            right_most,
        }
    }

    /// Merges two disjoint hulls where every point of `left` has x strictly
    /// less than every point of `right`. Returns the merged hull plus the
    /// bottom and top tangent edges (as point ids, left endpoint first).
    pub fn merge(
        arena: &mut HullArena,
        points: &[DVec2],
        left: Hull,
        right: Hull,
    ) -> (Hull, (PointId, PointId), (PointId, PointId)) {
        let (bot_left, bot_right) =
            find_bottom_tangent(arena, points, left.right_most, right.left_most);
        let (top_left, top_right) =
            find_top_tangent(arena, points, left.right_most, right.left_most);

        let merged = Hull {
            left_most: left.left_most,
            right_most: right.right_most,
        };

        arena.release_between(bot_left, top_left);
        arena.release_between(top_right, bot_right);

        arena.link(bot_left, bot_right);
        arena.link(top_right, top_left);

        let bottom = (arena.pid(bot_left), arena.pid(bot_right));
        let top = (arena.pid(top_left), arena.pid(top_right));
        (merged, bottom, top)
    }

    /// Releases the hull. The arena design frees every node in bulk when it
    /// is dropped, so this just consumes the handle — the move makes reuse a
    /// compile error, standing in for the source's runtime null-handle check
    /// on an already-destructed hull.
    pub fn destruct(self) {}

    /// Walks the ring from `left_most` along `next`, invoking `f` for every
    /// consecutive pair of point ids exactly once.
    pub fn traverse_edges(&self, arena: &HullArena, mut f: impl FnMut(PointId, PointId)) {
        let start = self.left_most;
        let mut cur = start;
        loop {
            let nxt = arena.next(cur);
            f(arena.pid(cur), arena.pid(nxt));
            cur = nxt;
            if cur == start {
                break;
            }
        }
    }
}

fn is_left_of(a: DVec2, b: DVec2) -> bool {
    cmp_left_to_right(a, b) == std::cmp::Ordering::Less
}

fn cmp_left_to_right(a: DVec2, b: DVec2) -> std::cmp::Ordering {
    a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
}

/// Walks `n` backward (`prev`) while the triple `(n, nref, n.prev)` has
/// orientation `o`.
fn trace_back_while(arena: &HullArena, points: &[DVec2], mut n: NodeId, nref: NodeId, o: Orientation) -> NodeId {
    loop {
        let prev = arena.prev(n);
        if orientation(arena.coord(n, points), arena.coord(nref, points), arena.coord(prev, points)) == o {
            n = prev;
        } else {
            return n;
        }
    }
}

/// Walks `n` forward (`next`) while the triple `(n, nref, n.next)` has
/// orientation `o`.
fn trace_forward_while(arena: &HullArena, points: &[DVec2], mut n: NodeId, nref: NodeId, o: Orientation) -> NodeId {
    loop {
        let next = arena.next(n);
        if orientation(arena.coord(n, points), arena.coord(nref, points), arena.coord(next, points)) == o {
            n = next;
        } else {
            return n;
        }
    }
}

fn find_bottom_tangent(
    arena: &HullArena,
    points: &[DVec2],
    mut left: NodeId,
    mut right: NodeId,
) -> (NodeId, NodeId) {
    loop {
        let new_left = trace_back_while(arena, points, left, right, Orientation::Clockwise);
        let left_changed = new_left != left;
        left = new_left;

        let new_right = trace_forward_while(arena, points, right, left, Orientation::CounterClockwise);
        let right_changed = new_right != right;
        right = new_right;

        if !left_changed && !right_changed {
            return (left, right);
        }
    }
}

fn find_top_tangent(
    arena: &HullArena,
    points: &[DVec2],
    left: NodeId,
    right: NodeId,
) -> (NodeId, NodeId) {
    let (r, l) = find_bottom_tangent(arena, points, right, left);
    (l, r)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<DVec2> {
        coords.iter().map(|&(x, y)| DVec2::new(x, y)).collect()
    }

    #[test]
    fn from_two_orders_left_most_by_x() {
        let points = pts(&[(1.0, 0.0), (0.0, 0.0)]);
        let mut arena = HullArena::new();
        let hull = Hull::from_two(&mut arena, &points, PointId(0), PointId(1));
        assert_eq!(arena.pid(hull.left_most()), PointId(1));
        assert_eq!(arena.pid(hull.right_most()), PointId(0));
    }

    #[test]
    fn from_three_is_counter_clockwise_and_traverses_all_edges() {
        // clockwise input order; from_three must reorder it
        let points = pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 0.0)]);
        let mut arena = HullArena::new();
        let hull = Hull::from_three(&mut arena, &points, PointId(0), PointId(1), PointId(2));
        let mut edges = Vec::new();
        hull.traverse_edges(&arena, |a, b| edges.push((*a, *b)));
        assert_eq!(edges.len(), 3);
        let mut ids: Vec<usize> = edges.iter().map(|e| e.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn merge_of_two_squares_diagonal_free_tangents() {
        // left hull: unit square at x in [0,1]; right hull: unit square at x in [2,3]
        let points = pts(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (2.0, 0.0),
            (3.0, 0.0),
            (3.0, 1.0),
            (2.0, 1.0),
        ]);
        let mut arena = HullArena::new();
        // left square counter-clockwise starting bottom-left
        let n0 = arena.push(PointId(0));
        let n1 = arena.push(PointId(1));
        let n2 = arena.push(PointId(2));
        let n3 = arena.push(PointId(3));
        arena.link(n0, n1);
        arena.link(n1, n2);
        arena.link(n2, n3);
        arena.link(n3, n0);
        let left = Hull {
            left_most: n0,
            right_most: n1,
        };

        let n4 = arena.push(PointId(4));
        let n5 = arena.push(PointId(5));
        let n6 = arena.push(PointId(6));
        let n7 = arena.push(PointId(7));
        arena.link(n4, n5);
        arena.link(n5, n6);
        arena.link(n6, n7);
        arena.link(n7, n4);
        let right = Hull {
            left_most: n4,
            right_most: n5,
        };

        let (merged, bottom, top) = Hull::merge(&mut arena, &points, left, right);
        // The two squares' bottom/top edges are collinear (both flat at
        // y = 0 and y = 1), so the tangent search stops at the first
        // adjacent pair rather than skipping to the outermost corners —
        // still a valid tangent, just not the only possible one.
        assert_eq!(bottom, (PointId(1), PointId(4)));
        assert_eq!(top, (PointId(2), PointId(7)));

        // No interior nodes were released (both tangents were already
        // adjacent in their source rings), so all 8 nodes survive in one
        // cycle.
        let mut edges = Vec::new();
        merged.traverse_edges(&arena, |a, b| edges.push((*a, *b)));
        assert_eq!(edges.len(), 8);
    }
}
