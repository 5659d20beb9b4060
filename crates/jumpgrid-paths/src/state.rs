//! Open/closed bookkeeping for a single search.
//!
//! Node records form a scratch arena indexed like the grid's cell table.
//! Each search bumps a generation counter so records from earlier searches
//! are ignored without being cleared.

use std::collections::BinaryHeap;

use jumpgrid_core::Point;

use crate::config::CostModel;
use crate::distance;
use crate::error::SearchError;
use crate::grid::GridMap;

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) g: i64,
    pub(crate) h: i64,
    pub(crate) f: i64,
    pub(crate) parent: Option<Point>,
    pub(crate) generation: u32,
    pub(crate) open: bool,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            f: 0,
            parent: None,
            generation: 0,
            open: false,
            closed: false,
        }
    }
}

/// Heap entry ordered by `f`, then by insertion order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) pos: Point,
    pub(crate) f: i64,
    pub(crate) seq: u32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first.
        other.f.cmp(&self.f).then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Open set, closed set and per-cell costs of the search in progress.
#[derive(Debug, Default)]
pub struct SearchState {
    nodes: Vec<Node>,
    generation: u32,
    heap: BinaryHeap<NodeRef>,
    open_len: usize,
    seq: u32,
    goal: Point,
    cost_model: CostModel,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous search and seed `start` with `G = 0`.
    ///
    /// The start cell is neither open nor closed afterwards.
    pub fn reset(
        &mut self,
        grid: &GridMap,
        start: Point,
        goal: Point,
        cost_model: CostModel,
    ) -> Result<(), SearchError> {
        if self.nodes.len() != grid.len() {
            self.nodes.clear();
            self.nodes.resize(grid.len(), Node::default());
            self.generation = 0;
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
        self.heap.clear();
        self.open_len = 0;
        self.seq = 0;
        self.goal = goal;
        self.cost_model = cost_model;

        let si = grid.idx(start).ok_or(SearchError::NotInMap(start))?;
        let h = distance::weighted(cost_model, start, goal);
        self.nodes[si] = Node {
            g: 0,
            h,
            f: h,
            parent: None,
            generation: self.generation,
            open: false,
            closed: false,
        };
        Ok(())
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    #[inline]
    pub fn cost_model(&self) -> CostModel {
        self.cost_model
    }

    /// Number of cells currently in the open set.
    #[inline]
    pub fn open_len(&self) -> usize {
        self.open_len
    }

    fn current(&self, grid: &GridMap, p: Point) -> Option<&Node> {
        let i = grid.idx(p)?;
        let n = &self.nodes[i];
        (n.generation == self.generation).then_some(n)
    }

    /// Cost from the start, if `p` has been reached in this search.
    pub fn g(&self, grid: &GridMap, p: Point) -> Option<i64> {
        self.current(grid, p).map(|n| n.g)
    }

    /// Heuristic estimate from `p` to the goal, if `p` has been reached.
    pub fn h(&self, grid: &GridMap, p: Point) -> Option<i64> {
        self.current(grid, p).map(|n| n.h)
    }

    /// Estimated total cost through `p`, if `p` has been reached.
    pub fn f(&self, grid: &GridMap, p: Point) -> Option<i64> {
        self.current(grid, p).map(|n| n.f)
    }

    /// The cell `p` was reached from. `None` for the start cell and for
    /// cells not reached in this search.
    pub fn parent(&self, grid: &GridMap, p: Point) -> Option<Point> {
        self.current(grid, p).and_then(|n| n.parent)
    }

    pub fn is_open(&self, grid: &GridMap, p: Point) -> bool {
        self.current(grid, p).is_some_and(|n| n.open)
    }

    /// Closed in this search, or a fixed obstacle of the grid.
    pub fn is_closed(&self, grid: &GridMap, p: Point) -> bool {
        grid.is_fixed_obstacle(p) || self.current(grid, p).is_some_and(|n| n.closed)
    }

    /// Open `p` as reached from `parent`.
    ///
    /// A cell already open keeps its current parent unless going through
    /// `parent` gives a strictly lower `F`.
    pub fn try_open(&mut self, grid: &GridMap, p: Point, parent: Point) -> Result<(), SearchError> {
        let ni = grid.idx(p).ok_or(SearchError::NotInMap(p))?;
        let parent_g = self
            .current(grid, parent)
            .map(|n| n.g)
            .ok_or(SearchError::NotInMap(parent))?;
        let g = parent_g + distance::weighted(self.cost_model, parent, p);
        let h = distance::weighted(self.cost_model, p, self.goal);
        let f = g + h;
        let cur_gen = self.generation;

        let n = &mut self.nodes[ni];
        if n.generation == cur_gen {
            if n.closed {
                return Err(SearchError::AlreadyClosed(p));
            }
            if n.open {
                if f < n.f {
                    n.g = g;
                    n.h = h;
                    n.f = f;
                    n.parent = Some(parent);
                    self.seq = self.seq.wrapping_add(1);
                    self.heap.push(NodeRef {
                        idx: ni,
                        pos: p,
                        f,
                        seq: self.seq,
                    });
                }
                return Ok(());
            }
        }

        *n = Node {
            g,
            h,
            f,
            parent: Some(parent),
            generation: cur_gen,
            open: true,
            closed: false,
        };
        self.open_len += 1;
        self.seq = self.seq.wrapping_add(1);
        self.heap.push(NodeRef {
            idx: ni,
            pos: p,
            f,
            seq: self.seq,
        });
        Ok(())
    }

    /// Remove and return the open cell with the lowest `F`.
    pub fn pop_min(&mut self) -> Option<Point> {
        while let Some(r) = self.heap.pop() {
            let n = &mut self.nodes[r.idx];
            // Skip stale entries.
            if n.generation != self.generation || !n.open || n.f != r.f {
                continue;
            }
            n.open = false;
            self.open_len -= 1;
            return Some(r.pos);
        }
        None
    }

    /// Take `p` out of the open set without expanding the heap.
    pub fn remove(&mut self, grid: &GridMap, p: Point) -> Result<(), SearchError> {
        let i = grid.idx(p).ok_or(SearchError::NotInMap(p))?;
        let n = &mut self.nodes[i];
        if n.generation != self.generation || !n.open {
            return Err(SearchError::NotOpen(p));
        }
        n.open = false;
        self.open_len -= 1;
        Ok(())
    }

    /// Add `p` to the closed set. Each cell may be closed once per search.
    pub fn close(&mut self, grid: &GridMap, p: Point) -> Result<(), SearchError> {
        let i = grid.idx(p).ok_or(SearchError::NotInMap(p))?;
        let cur_gen = self.generation;
        let n = &mut self.nodes[i];
        if n.generation != cur_gen {
            *n = Node {
                generation: cur_gen,
                ..Node::default()
            };
        }
        if n.closed {
            return Err(SearchError::AlreadyClosed(p));
        }
        if n.open {
            n.open = false;
            self.open_len -= 1;
        }
        n.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapDescriptor;
    use jumpgrid_core::{Size, Vec2};

    fn grid(w: f64, h: f64) -> GridMap {
        GridMap::new(&MapDescriptor::new(Vec2::ZERO, Size::new(w, h), 1.0)).unwrap()
    }

    fn state(g: &GridMap, start: Point, goal: Point) -> SearchState {
        let mut s = SearchState::new();
        s.reset(g, start, goal, CostModel::Manhattan).unwrap();
        s
    }

    #[test]
    fn open_computes_legacy_costs() {
        let g = grid(10.0, 10.0);
        let start = Point::new(0, 0);
        let mut s = state(&g, start, Point::new(9, 9));
        s.try_open(&g, Point::new(3, 3), start).unwrap();
        assert_eq!(s.g(&g, Point::new(3, 3)), Some(60));
        assert_eq!(s.h(&g, Point::new(3, 3)), Some(120));
        assert_eq!(s.f(&g, Point::new(3, 3)), Some(60 + 120));
        assert_eq!(s.h(&g, start), Some(180));
        assert_eq!(s.h(&g, Point::new(5, 5)), None);
        assert_eq!(s.parent(&g, Point::new(3, 3)), Some(start));
        assert_eq!(s.open_len(), 1);
    }

    #[test]
    fn octile_costs() {
        let g = grid(10.0, 10.0);
        let start = Point::new(0, 0);
        let mut s = SearchState::new();
        s.reset(&g, start, Point::new(5, 3), CostModel::Octile).unwrap();
        s.try_open(&g, Point::new(2, 2), start).unwrap();
        assert_eq!(s.g(&g, Point::new(2, 2)), Some(28));
        assert_eq!(s.h(&g, Point::new(2, 2)), Some(34));
        assert_eq!(s.f(&g, Point::new(2, 2)), Some(28 + 14 + 20));
    }

    #[test]
    fn reparent_only_on_strictly_lower_f() {
        let g = grid(10.0, 10.0);
        let start = Point::new(0, 0);
        let goal = Point::new(9, 0);
        let mut s = state(&g, start, goal);
        let a = Point::new(0, 4);
        let b = Point::new(4, 0);
        s.try_open(&g, a, start).unwrap();
        s.try_open(&g, b, start).unwrap();
        s.close(&g, a).unwrap();
        s.close(&g, b).unwrap();

        let target = Point::new(4, 4);
        s.try_open(&g, target, a).unwrap();
        let f = s.f(&g, target).unwrap();
        // Same G through b, same F: keep a.
        s.try_open(&g, target, b).unwrap();
        assert_eq!(s.parent(&g, target), Some(a));
        assert_eq!(s.f(&g, target), Some(f));

        // A closer parent with an equal resulting F does not win either.
        let c = Point::new(3, 4);
        s.try_open(&g, c, start).unwrap();
        s.close(&g, c).unwrap();
        s.try_open(&g, target, c).unwrap();
        assert_eq!(s.parent(&g, target), Some(a));
        assert_eq!(s.open_len(), 1);
    }

    #[test]
    fn strictly_lower_f_replaces_parent() {
        let g = grid(10.0, 10.0);
        let start = Point::new(0, 0);
        let mut s = state(&g, start, Point::new(9, 9));
        let far = Point::new(0, 8);
        s.try_open(&g, far, start).unwrap();
        s.close(&g, far).unwrap();
        let target = Point::new(2, 2);
        s.try_open(&g, target, far).unwrap();
        assert_eq!(s.g(&g, target), Some(80 + 80));
        s.try_open(&g, target, start).unwrap();
        assert_eq!(s.parent(&g, target), Some(start));
        assert_eq!(s.g(&g, target), Some(40));
        // The stale heap entry is skipped.
        assert_eq!(s.pop_min(), Some(target));
        assert_eq!(s.pop_min(), None);
    }

    #[test]
    fn pop_min_orders_by_f_then_insertion() {
        let g = grid(10.0, 10.0);
        let start = Point::new(5, 5);
        let mut s = state(&g, start, Point::new(9, 5));
        s.try_open(&g, Point::new(1, 5), start).unwrap();
        s.try_open(&g, Point::new(7, 5), start).unwrap();
        s.try_open(&g, Point::new(5, 7), start).unwrap();
        s.try_open(&g, Point::new(5, 3), start).unwrap();
        assert_eq!(s.pop_min(), Some(Point::new(7, 5)));
        assert_eq!(s.pop_min(), Some(Point::new(5, 7)));
        assert_eq!(s.pop_min(), Some(Point::new(5, 3)));
        assert_eq!(s.pop_min(), Some(Point::new(1, 5)));
        assert_eq!(s.pop_min(), None);
        assert_eq!(s.open_len(), 0);
    }

    #[test]
    fn invariant_violations_are_errors() {
        let g = grid(4.0, 4.0);
        let start = Point::new(0, 0);
        let mut s = state(&g, start, Point::new(3, 3));
        let off = Point::new(4, 0);
        assert_eq!(s.try_open(&g, off, start), Err(SearchError::NotInMap(off)));
        assert_eq!(s.close(&g, off), Err(SearchError::NotInMap(off)));
        s.close(&g, start).unwrap();
        assert_eq!(s.close(&g, start), Err(SearchError::AlreadyClosed(start)));
        assert_eq!(
            s.try_open(&g, start, Point::new(1, 1)),
            Err(SearchError::NotInMap(Point::new(1, 1)))
        );
        assert_eq!(
            s.remove(&g, Point::new(2, 2)),
            Err(SearchError::NotOpen(Point::new(2, 2)))
        );
    }

    #[test]
    fn fixed_obstacles_count_as_closed() {
        let mut g = grid(4.0, 4.0);
        g.mark_cells([Point::new(2, 2)]);
        let s = state(&g, Point::new(0, 0), Point::new(3, 3));
        assert!(s.is_closed(&g, Point::new(2, 2)));
        assert!(!s.is_closed(&g, Point::new(1, 1)));
    }

    #[test]
    fn reset_forgets_previous_search() {
        let g = grid(4.0, 4.0);
        let start = Point::new(0, 0);
        let mut s = state(&g, start, Point::new(3, 3));
        s.close(&g, start).unwrap();
        s.try_open(&g, Point::new(1, 1), start).unwrap();
        s.reset(&g, start, Point::new(3, 0), CostModel::Manhattan).unwrap();
        assert!(!s.is_closed(&g, start));
        assert!(!s.is_open(&g, Point::new(1, 1)));
        assert_eq!(s.parent(&g, Point::new(1, 1)), None);
        assert_eq!(s.g(&g, start), Some(0));
        assert_eq!(s.pop_min(), None);
        assert_eq!(s.goal(), Point::new(3, 0));
    }

    #[test]
    fn remove_takes_cell_out_of_open_set() {
        let g = grid(4.0, 4.0);
        let start = Point::new(0, 0);
        let mut s = state(&g, start, Point::new(3, 3));
        s.try_open(&g, Point::new(2, 2), start).unwrap();
        s.remove(&g, Point::new(2, 2)).unwrap();
        assert_eq!(s.open_len(), 0);
        assert_eq!(s.pop_min(), None);
    }
}
