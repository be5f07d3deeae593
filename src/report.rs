//! Human readable results of a nearest query.

use crate::config::SimulationConfig;
use crate::error::GridError;
use crate::grid::Grid;
use mint::Point2;
use std::fmt;

/// One line of a nearest query report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    /// Zero-padded identifier.
    pub id: String,
    /// Cheapest ticket with currency, or `N/A`.
    pub min_price: String,
    /// Manhattan distance to the queried point.
    pub distance: u64,
}

impl fmt::Display for EventSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Event {} - {}, Distance {}",
            self.id, self.min_price, self.distance
        )
    }
}

/// Summaries of the `k` events closest to `pos`, closest first.
///
/// # Example
/// ```rust
/// use grid_events::{closest_events, Event, Grid, SimulationConfig};
///
/// let config = SimulationConfig::default();
/// let mut g = Grid::new(config.radius);
/// g.register(Event::new(7, vec![3.0, 10.0, 2.0]).unwrap(), [1, 2]).unwrap();
///
/// let report = closest_events(&g, &config, [0, 0], 5).unwrap();
/// assert_eq!(report[0].to_string(), "Event 007 - $02.00, Distance 3");
/// ```
pub fn closest_events(
    grid: &Grid,
    config: &SimulationConfig,
    pos: impl Into<Point2<i32>>,
    k: usize,
) -> Result<Vec<EventSummary>, GridError> {
    let pos = pos.into();
    let digit_width = config.price_digit_width();

    Ok(grid
        .nearest_iter(pos)?
        .take(k)
        .filter_map(|(handle, at)| {
            let event = grid.event(handle)?;
            Some(EventSummary {
                id: event.formatted_id(grid.cell_count()),
                min_price: event.formatted_min_price(&config.currency, digit_width),
                distance: Grid::manhattan_distance(pos, at),
            })
        })
        .collect())
}
