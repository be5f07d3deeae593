//! Breadth-first search of the occupied cells closest to a point.
//!
//! On a 4-connected grid with unit steps, visiting cells breadth-first visits them by
//! non-decreasing Manhattan distance. Cells at the same distance come out in discovery
//! order, which is fixed by the order of [`Grid::available_moves`].

use crate::error::GridError;
use crate::grid::{EventHandle, Grid};
use fnv::FnvHashSet;
use mint::Point2;
use std::collections::VecDeque;

/// Positions of the (at most) `k` occupied cells closest to `pos`, closest first.
///
/// Fewer than `k` positions are returned only when the grid has fewer than `k`
/// occupied cells. Asking for `k == 0` returns nothing without exploring the grid.
///
/// # Example
/// ```rust
/// use grid_events::{nearest, Event, Grid};
///
/// let mut g = Grid::new(10);
/// for (id, pos) in [[0, 0], [0, 2], [2, 1], [-2, -1]].into_iter().enumerate() {
///     g.register(Event::new(id as u64, vec![]).unwrap(), pos).unwrap();
/// }
///
/// let found: Vec<_> = nearest(&g, [2, 2], 10).unwrap().into_iter().map(|p| [p.x, p.y]).collect();
/// assert_eq!(found, vec![[2, 1], [0, 2], [0, 0], [-2, -1]]);
/// ```
pub fn nearest(
    grid: &Grid,
    pos: impl Into<Point2<i32>>,
    k: usize,
) -> Result<Vec<Point2<i32>>, GridError> {
    let iter = NearestIter::new(grid, pos)?;
    if k == 0 {
        return Ok(Vec::new());
    }
    Ok(iter.take(k).map(|(_, pos)| pos).collect())
}

/// Iterator over the occupied cells of a grid by increasing distance to an origin.
///
/// Yields the handle of each event along with its (signed) position. The traversal is lazy:
/// a cell is only explored when the next item is asked for, and the iterator is exhausted
/// once every cell of the grid has been visited.
///
/// # Example
/// ```rust
/// use grid_events::{Event, Grid};
///
/// let mut g = Grid::new(3);
/// let a = g.register(Event::new(0, vec![]).unwrap(), [3, 3]).unwrap();
/// let b = g.register(Event::new(1, vec![]).unwrap(), [-1, 0]).unwrap();
///
/// let order: Vec<_> = g.nearest_iter([0, 0]).unwrap().map(|(h, _)| h).collect();
/// assert_eq!(order, vec![b, a]);
/// ```
#[derive(Debug, Clone)]
pub struct NearestIter<'g> {
    grid: &'g Grid,
    // Cells already visited or waiting in the queue, by index space coordinates
    seen: FnvHashSet<(i32, i32)>,
    queue: VecDeque<Point2<i32>>,
}

impl<'g> NearestIter<'g> {
    /// Starts a search around `pos`, failing if it lies outside the grid.
    pub fn new(grid: &'g Grid, pos: impl Into<Point2<i32>>) -> Result<Self, GridError> {
        let pos = pos.into();
        if !grid.contains(pos) {
            let r = i32::from(grid.radius());
            return Err(GridError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                min: -r,
                max: r,
            });
        }
        tracing::trace!(x = pos.x, y = pos.y, "starting nearest search");

        let start = grid.to_index_space(pos);
        let mut seen = FnvHashSet::default();
        seen.insert((start.x, start.y));
        let mut queue = VecDeque::new();
        queue.push_back(start);

        Ok(Self { grid, seen, queue })
    }

    /// Number of cells discovered so far, including the ones not visited yet.
    pub fn discovered(&self) -> usize {
        self.seen.len()
    }
}

impl<'g> Iterator for NearestIter<'g> {
    type Item = (EventHandle, Point2<i32>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(cur) = self.queue.pop_front() {
            // Only in-range cells are ever queued
            for m in self.grid.neighbors_unchecked(cur) {
                if self.seen.insert((m.x, m.y)) {
                    self.queue.push_back(m);
                }
            }

            if let Some(handle) = self.grid.handle_at_index(cur) {
                return Some((handle, self.grid.to_signed_space(cur)));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{nearest, NearestIter};
    use crate::{Event, Grid, GridError};
    use mint::Point2;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn p(x: i32, y: i32) -> Point2<i32> {
        Point2 { x, y }
    }

    fn scenario() -> Grid {
        let mut g = Grid::new(10);
        g.register(Event::new(0, vec![]).unwrap(), [0, 0]).unwrap();
        g.register(Event::new(1, vec![5.0]).unwrap(), [0, 2]).unwrap();
        g.register(Event::new(2, vec![7.5, 3.25]).unwrap(), [2, 1]).unwrap();
        g.register(Event::new(3, vec![40.0]).unwrap(), [-2, -1]).unwrap();
        g
    }

    #[test]
    fn test_scenario() {
        let g = scenario();
        assert_eq!(nearest(&g, [0, 0], 3).unwrap(), vec![p(0, 0), p(0, 2), p(2, 1)]);
        assert_eq!(
            nearest(&g, [2, 2], 10).unwrap(),
            vec![p(2, 1), p(0, 2), p(0, 0), p(-2, -1)]
        );
        assert_eq!(g.nearest([0, 0], 1).unwrap(), vec![p(0, 0)]);
    }

    #[test]
    fn test_zero() {
        let g = scenario();
        assert!(nearest(&g, [0, 0], 0).unwrap().is_empty());
        assert!(nearest(&Grid::new(0), [0, 0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_bounds() {
        let g = scenario();
        assert_eq!(
            nearest(&g, [0, 11], 3),
            Err(GridError::OutOfBounds {
                x: 0,
                y: 11,
                min: -10,
                max: 10
            })
        );
        // Checked even when nothing is asked for
        assert!(nearest(&g, [-11, 0], 0).is_err());
        assert!(NearestIter::new(&g, [20, 20]).is_err());
    }

    #[test]
    fn test_empty_grid() {
        let g = Grid::new(4);
        let mut it = g.nearest_iter([4, -4]).unwrap();
        assert_eq!(it.next(), None);
        assert_eq!(it.discovered(), g.cell_count());
        assert!(nearest(&g, [0, 0], 5).unwrap().is_empty());
    }

    #[test]
    fn test_undersupply() {
        let g = scenario();
        assert_eq!(nearest(&g, [-10, 10], 100).unwrap().len(), 4);
    }

    #[test]
    fn test_tie_break_order() {
        let mut g = Grid::new(2);
        // All four neighbors of the origin, registered in scrambled order
        for (id, pos) in [[0, -1], [-1, 0], [1, 0], [0, 1]].into_iter().enumerate() {
            g.register(Event::new(id as u64, vec![]).unwrap(), pos).unwrap();
        }
        assert_eq!(
            nearest(&g, [0, 0], 4).unwrap(),
            vec![p(1, 0), p(0, 1), p(-1, 0), p(0, -1)]
        );
    }

    #[test]
    fn test_corner_query() {
        let mut g = Grid::new(1);
        g.register(Event::new(0, vec![]).unwrap(), [1, 1]).unwrap();
        g.register(Event::new(1, vec![]).unwrap(), [-1, 0]).unwrap();
        assert_eq!(nearest(&g, [-1, -1], 5).unwrap(), vec![p(-1, 0), p(1, 1)]);
    }

    #[test]
    fn test_random_grids_against_brute_force() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let radius = rng.gen_range(0..6u16);
            let r = radius as i32;
            let mut g = Grid::new(radius);
            for id in 0..rng.gen_range(0..30u64) {
                let pos = [rng.gen_range(-r..=r), rng.gen_range(-r..=r)];
                g.register(Event::new(id, vec![]).unwrap(), pos).unwrap();
            }
            let origin = [rng.gen_range(-r..=r), rng.gen_range(-r..=r)];
            let k = rng.gen_range(0..40usize);

            let found = nearest(&g, origin, k).unwrap();
            assert_eq!(found.len(), k.min(g.len()));

            let dists: Vec<u64> = found
                .iter()
                .map(|&q| Grid::manhattan_distance(origin, q))
                .collect();
            assert!(dists.windows(2).all(|w| w[0] <= w[1]));

            let mut unique = found.iter().map(|q| (q.x, q.y)).collect::<Vec<_>>();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), found.len());

            for &q in &found {
                assert!(g.get(q).unwrap().is_some());
            }

            // The k-th distance is the k-th smallest of all occupied distances
            let mut all: Vec<u64> = g
                .occupied()
                .map(|(q, _)| Grid::manhattan_distance(origin, q))
                .collect();
            all.sort_unstable();
            all.truncate(k);
            assert_eq!(dists, all);
        }
    }
}
