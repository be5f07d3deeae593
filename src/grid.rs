use crate::error::GridError;
use crate::event::{id_width, Event};
use crate::nearest::{nearest, NearestIter};
use mint::Point2;
use slotmapd::new_key_type;
use slotmapd::SlotMap;
use std::fmt;

new_key_type! {
    /// Stable handle to an event owned by a grid.
    /// It is returned by the _register_ method of a Grid.
    pub struct EventHandle;
}

/// Unit steps explored around a cell: right, down, left, up.
/// Nearest queries break distance ties in this order.
const MOVES: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Grid is a bounded square of cells spanning `[-radius, radius]` on both axes, each cell
/// holding at most one [`Event`].
///
/// ## Storage
/// Cells are stored densely in a single Vec, row-major, addressed by `(x + radius, y + radius)`.
/// Those non-negative coordinates are called the index space, as opposed to the signed
/// coordinates used by the public API.
///
/// Events themselves live in a SlotMap and cells only keep a handle, so an event can be
/// looked up either by position or by the handle given by _register_.
///
/// ## Overwriting
/// Registering an event on an occupied cell silently replaces (and drops) the previous one.
/// Identifier uniqueness is not checked here, see [`crate::Populator`] for that.
///
/// ## Examples
/// ```rust
/// use grid_events::{Event, Grid};
///
/// let mut g = Grid::new(10); // Cells from -10 to 10 on both axes
/// g.register(Event::new(0, vec![]).unwrap(), [0, 0]).unwrap();
/// g.register(Event::new(1, vec![12.5]).unwrap(), [0, 2]).unwrap();
/// g.register(Event::new(2, vec![8.0, 3.0]).unwrap(), [2, 1]).unwrap();
///
/// assert_eq!(g.get([2, 1]).unwrap().map(|e| e.identifier()), Some(2));
/// assert_eq!(g.get([1, 1]).unwrap(), None);
/// assert!(g.get([11, 0]).is_err()); // Out of bounds
///
/// let closest: Vec<_> = g.nearest([0, 0], 2).unwrap().into_iter().map(|p| [p.x, p.y]).collect();
/// assert_eq!(closest, vec![[0, 0], [0, 2]]);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr")
)]
pub struct Grid {
    radius: u16,
    side: usize,
    cells: Vec<Option<EventHandle>>,
    events: SlotMap<EventHandle, Event>,
}

impl Grid {
    /// Creates a grid of `(2 * radius + 1)²` empty cells.
    pub fn new(radius: u16) -> Self {
        let side = 2 * radius as usize + 1;
        tracing::debug!(radius, cells = side * side, "allocating grid");
        Self {
            radius,
            side,
            cells: vec![None; side * side],
            events: SlotMap::with_key(),
        }
    }

    pub fn radius(&self) -> u16 {
        self.radius
    }

    /// Number of cells along one axis.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Total number of cells, occupied or not.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Checks if no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn max_index(&self) -> i32 {
        2 * i32::from(self.radius)
    }

    /// Translates signed coordinates to index space, without bounds checking.
    pub(crate) fn to_index_space(&self, pos: impl Into<Point2<i32>>) -> Point2<i32> {
        let pos = pos.into();
        let r = i32::from(self.radius);
        Point2 {
            x: pos.x + r,
            y: pos.y + r,
        }
    }

    /// Translates index space coordinates back to signed coordinates.
    pub(crate) fn to_signed_space(&self, idx: impl Into<Point2<i32>>) -> Point2<i32> {
        let idx = idx.into();
        let r = i32::from(self.radius);
        Point2 {
            x: idx.x - r,
            y: idx.y - r,
        }
    }

    /// Checks if signed coordinates lie inside the grid.
    pub fn contains(&self, pos: impl Into<Point2<i32>>) -> bool {
        let pos = pos.into();
        let r = i32::from(self.radius);
        (-r..=r).contains(&pos.x) && (-r..=r).contains(&pos.y)
    }

    fn in_index_space(&self, idx: Point2<i32>) -> bool {
        let max = self.max_index();
        (0..=max).contains(&idx.x) && (0..=max).contains(&idx.y)
    }

    /// Position in the cell Vec of signed coordinates.
    fn cell_id(&self, pos: Point2<i32>) -> Result<usize, GridError> {
        if !self.contains(pos) {
            let r = i32::from(self.radius);
            return Err(GridError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                min: -r,
                max: r,
            });
        }
        Ok(self.cell_id_unchecked(self.to_index_space(pos)))
    }

    /// Position in the cell Vec of index space coordinates assumed to be in range.
    fn cell_id_unchecked(&self, idx: Point2<i32>) -> usize {
        idx.y as usize * self.side + idx.x as usize
    }

    /// Handle of the event at index space coordinates assumed to be in range.
    pub(crate) fn handle_at_index(&self, idx: Point2<i32>) -> Option<EventHandle> {
        self.cells
            .get(self.cell_id_unchecked(idx))
            .copied()
            .flatten()
    }

    /// Returns the event at a position, or None if the cell is empty.
    ///
    /// # Example
    /// ```rust
    /// use grid_events::{Event, Grid};
    /// let mut g = Grid::new(1);
    /// assert_eq!(g.get([1, -1]), Ok(None));
    /// g.register(Event::new(4, vec![1.5]).unwrap(), [1, -1]).unwrap();
    /// assert_eq!(g.get([1, -1]).unwrap().unwrap().identifier(), 4);
    /// ```
    pub fn get(&self, pos: impl Into<Point2<i32>>) -> Result<Option<&Event>, GridError> {
        Ok(self.get_handle(pos)?.and_then(|h| self.events.get(h)))
    }

    /// Returns the handle of the event at a position, or None if the cell is empty.
    pub fn get_handle(
        &self,
        pos: impl Into<Point2<i32>>,
    ) -> Result<Option<EventHandle>, GridError> {
        let id = self.cell_id(pos.into())?;
        Ok(self.cells.get(id).copied().flatten())
    }

    /// Stores an event at a position, replacing any previous occupant.
    /// Nothing is modified when the position is out of bounds.
    pub fn register(
        &mut self,
        event: Event,
        pos: impl Into<Point2<i32>>,
    ) -> Result<EventHandle, GridError> {
        let pos = pos.into();
        let id = self.cell_id(pos)?;

        let handle = self.events.insert(event);
        if let Some(old) = self.cells[id].replace(handle) {
            if let Some(previous) = self.events.remove(old) {
                tracing::trace!(
                    x = pos.x,
                    y = pos.y,
                    replaced = previous.identifier(),
                    "overwriting occupied cell"
                );
            }
        }
        Ok(handle)
    }

    /// Returns a reference to an event using its handle.
    pub fn event(&self, handle: EventHandle) -> Option<&Event> {
        self.events.get(handle)
    }

    /// Iterate over all handles
    pub fn handles(&self) -> impl Iterator<Item = EventHandle> + '_ {
        self.events.keys()
    }

    /// Iterate over all events
    pub fn events(&self) -> impl Iterator<Item = &Event> + '_ {
        self.events.values()
    }

    /// Iterate over occupied cells in row-major order, with signed coordinates.
    pub fn occupied(&self) -> impl Iterator<Item = (Point2<i32>, &Event)> + '_ {
        let side = self.side;
        self.cells.iter().enumerate().filter_map(move |(id, cell)| {
            let event = self.events.get((*cell)?)?;
            let idx = Point2 {
                x: (id % side) as i32,
                y: (id / side) as i32,
            };
            Some((self.to_signed_space(idx), event))
        })
    }

    /// Neighbors of a cell given in index space (`[0, 2 * radius]` on both axes), in the order
    /// right, down, left, up. Neighbors falling outside the grid are skipped.
    ///
    /// # Example
    /// ```rust
    /// use grid_events::Grid;
    /// let g = Grid::new(10);
    /// let moves: Vec<_> = g.available_moves([0, 0]).unwrap().map(|p| [p.x, p.y]).collect();
    /// assert_eq!(moves, vec![[1, 0], [0, 1]]);
    /// ```
    pub fn available_moves(
        &self,
        idx: impl Into<Point2<i32>>,
    ) -> Result<impl Iterator<Item = Point2<i32>>, GridError> {
        let idx = idx.into();
        let max = self.max_index();
        if !self.in_index_space(idx) {
            return Err(GridError::OutOfBounds {
                x: idx.x,
                y: idx.y,
                min: 0,
                max,
            });
        }

        Ok(self.neighbors_unchecked(idx))
    }

    /// Same as available_moves for index space coordinates already known to be in range.
    pub(crate) fn neighbors_unchecked(
        &self,
        idx: Point2<i32>,
    ) -> impl Iterator<Item = Point2<i32>> {
        let max = self.max_index();
        MOVES
            .into_iter()
            .map(move |(dx, dy)| Point2 {
                x: idx.x + dx,
                y: idx.y + dy,
            })
            .filter(move |p| (0..=max).contains(&p.x) && (0..=max).contains(&p.y))
    }

    /// Grid (Manhattan) distance between two points: `|x1 - x0| + |y1 - y0|`.
    /// Defined for every pair of `i32` points.
    pub fn manhattan_distance(a: impl Into<Point2<i32>>, b: impl Into<Point2<i32>>) -> u64 {
        let a = a.into();
        let b = b.into();
        u64::from(a.x.abs_diff(b.x)) + u64::from(a.y.abs_diff(b.y))
    }

    /// Positions of the `k` occupied cells closest to `pos`, see [`nearest`].
    pub fn nearest(
        &self,
        pos: impl Into<Point2<i32>>,
        k: usize,
    ) -> Result<Vec<Point2<i32>>, GridError> {
        nearest(self, pos, k)
    }

    /// Lazily iterates over occupied cells by increasing distance to `pos`, see [`NearestIter`].
    pub fn nearest_iter(&self, pos: impl Into<Point2<i32>>) -> Result<NearestIter<'_>, GridError> {
        NearestIter::new(self, pos)
    }
}

/// Renders one line per row, from `y = -radius` downwards: the padded identifier of
/// occupied cells and dots for empty ones.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.cell_count();
        let width = id_width(count);
        for row in self.cells.chunks(self.side) {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                match (*cell).and_then(|h| self.events.get(h)) {
                    Some(event) => f.write_str(&event.formatted_id(count))?,
                    None => write!(f, "{:.>width$}", "", width = width)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Grid as stored, checked for consistency before being turned back into a Grid.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    radius: u16,
    side: usize,
    cells: Vec<Option<EventHandle>>,
    events: SlotMap<EventHandle, Event>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        let side = 2 * repr.radius as usize + 1;
        if repr.side != side {
            return Err(GridError::InvalidGrid("side does not match radius"));
        }
        if repr.cells.len() != side * side {
            return Err(GridError::InvalidGrid("cell count does not match radius"));
        }

        let mut referenced = fnv::FnvHashSet::default();
        for handle in repr.cells.iter().flatten() {
            if !repr.events.contains_key(*handle) {
                return Err(GridError::InvalidGrid("cell refers to a missing event"));
            }
            if !referenced.insert(*handle) {
                return Err(GridError::InvalidGrid("event stored in several cells"));
            }
        }
        if referenced.len() != repr.events.len() {
            return Err(GridError::InvalidGrid("event not stored in any cell"));
        }

        Ok(Self {
            radius: repr.radius,
            side,
            cells: repr.cells,
            events: repr.events,
        })
    }
}
