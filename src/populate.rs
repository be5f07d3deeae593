//! Random population of a grid with events.

use crate::config::SimulationConfig;
use crate::error::GridError;
use crate::event::Event;
use crate::grid::{EventHandle, Grid};
use fnv::FnvHashSet;
use mint::Point2;
use rand::seq::index;
use rand::Rng;

/// Places events on a grid while making sure no identifier is used twice.
///
/// The grid on its own accepts any identifier, the populator is the place where
/// uniqueness is enforced.
#[derive(Debug, Default, Clone)]
pub struct Populator {
    placed: FnvHashSet<u64>,
}

impl Populator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events placed so far.
    pub fn placed(&self) -> usize {
        self.placed.len()
    }

    /// Registers an event, failing with [`GridError::DuplicateIdentifier`] if this populator
    /// already placed an event with the same identifier.
    pub fn place(
        &mut self,
        grid: &mut Grid,
        event: Event,
        pos: impl Into<Point2<i32>>,
    ) -> Result<EventHandle, GridError> {
        let id = event.identifier();
        if self.placed.contains(&id) {
            return Err(GridError::DuplicateIdentifier(id));
        }
        let handle = grid.register(event, pos)?;
        self.placed.insert(id);
        Ok(handle)
    }

    /// Fills an empty grid with a random number (at least one) of events on distinct random cells.
    /// Fails with [`GridError::GridNotEmpty`] if the grid already holds events.
    ///
    /// Events are numbered from 0 and each gets up to `config.max_tickets_per_event` unique
    /// prices drawn in `[config.min_ticket_price, config.max_ticket_price]`, rounded to cents.
    /// Returns how many events were placed.
    ///
    /// # Example
    /// ```rust
    /// use grid_events::{Grid, Populator, SimulationConfig};
    /// use rand::SeedableRng;
    ///
    /// let config = SimulationConfig::default();
    /// let mut grid = Grid::new(config.radius);
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    ///
    /// let placed = Populator::new().populate(&mut grid, &config, &mut rng).unwrap();
    /// assert_eq!(grid.len(), placed);
    /// ```
    pub fn populate(
        &mut self,
        grid: &mut Grid,
        config: &SimulationConfig,
        rng: &mut impl Rng,
    ) -> Result<usize, GridError> {
        config.validate()?;
        if !grid.is_empty() {
            return Err(GridError::GridNotEmpty {
                occupied: grid.len(),
            });
        }

        let cell_count = grid.cell_count();
        let count = rng.gen_range(1..=cell_count);
        let side = grid.side();

        for (id, cell) in index::sample(rng, cell_count, count).into_iter().enumerate() {
            let idx = Point2 {
                x: (cell % side) as i32,
                y: (cell / side) as i32,
            };
            let pos = grid.to_signed_space(idx);
            let event = Event::new(id as u64, random_tickets(config, rng))?;
            self.place(grid, event, pos)?;
        }

        tracing::debug!(events = count, cells = cell_count, "populated grid");
        Ok(count)
    }
}

/// A random set of unique prices, in cents precision.
fn random_tickets(config: &SimulationConfig, rng: &mut impl Rng) -> Vec<f64> {
    let min_cents = (config.min_ticket_price * 100.0).ceil() as u64;
    let max_cents = (config.max_ticket_price * 100.0).floor() as u64;
    if min_cents > max_cents {
        return Vec::new();
    }

    let available = (max_cents - min_cents + 1) as usize;
    let count = rng
        .gen_range(0..=config.max_tickets_per_event)
        .min(available);

    let mut cents = FnvHashSet::default();
    let mut tickets = Vec::with_capacity(count);
    while tickets.len() < count {
        let c = rng.gen_range(min_cents..=max_cents);
        if cents.insert(c) {
            tickets.push(c as f64 / 100.0);
        }
    }
    tickets
}
