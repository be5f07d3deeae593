use crate::error::GridError;

/// Number of digits of `max`, at least 1.
pub(crate) fn id_width(max: usize) -> usize {
    max.checked_ilog10().map_or(1, |d| d as usize + 1)
}

/// Returned by [`Event::formatted_min_price`] when an event has no tickets.
pub const NO_PRICE: &str = "N/A";

/// An event placed on the grid: an identifier and the prices of its tickets.
///
/// Every price is strictly positive, this is checked once at construction and the
/// tickets are never mutated afterwards.
/// Identifiers are expected to be unique within a grid, but nothing here enforces it.
///
/// # Example
/// ```rust
/// use grid_events::Event;
///
/// let e = Event::new(7, vec![3.0, 10.0, 4.1, 74.54, 2.0]).unwrap();
/// assert_eq!(e.formatted_id(441), "007");
/// assert_eq!(e.formatted_min_price("$", 5), "$02.00");
///
/// assert!(Event::new(10, vec![-1.0, 0.0, 2.0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    identifier: u64,
    tickets: Vec<f64>,
}

impl Event {
    /// Creates an event, failing with [`GridError::InvalidPrice`] if any price is not > 0.
    pub fn new(identifier: u64, tickets: Vec<f64>) -> Result<Self, GridError> {
        if let Some(&price) = tickets.iter().find(|&&p| p.is_nan() || p <= 0.0) {
            return Err(GridError::InvalidPrice { price });
        }

        Ok(Self {
            identifier,
            tickets,
        })
    }

    pub fn identifier(&self) -> u64 {
        self.identifier
    }

    pub fn tickets(&self) -> &[f64] {
        &self.tickets
    }

    /// Cheapest ticket, if any.
    pub fn min_price(&self) -> Option<f64> {
        self.tickets.iter().copied().reduce(f64::min)
    }

    /// The identifier zero-padded to as many digits as `max_cell_count` has.
    /// Identifiers already wider than that are returned as is.
    pub fn formatted_id(&self, max_cell_count: usize) -> String {
        let width = id_width(max_cell_count);
        format!("{:0width$}", self.identifier, width = width)
    }

    /// The cheapest ticket with two decimals, zero-padded to `digit_width` characters
    /// and prefixed by `currency`. Returns [`NO_PRICE`] for an event without tickets.
    pub fn formatted_min_price(&self, currency: &str, digit_width: usize) -> String {
        match self.min_price() {
            Some(min) => format!("{}{:0width$.2}", currency, min, width = digit_width),
            None => NO_PRICE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, NO_PRICE};
    use crate::GridError;

    #[test]
    fn test_invalid_prices() {
        assert_eq!(
            Event::new(10, vec![-1.0, 0.0, 2.0]),
            Err(GridError::InvalidPrice { price: -1.0 })
        );
        assert_eq!(
            Event::new(10, vec![2.0, 0.0]),
            Err(GridError::InvalidPrice { price: 0.0 })
        );
        assert!(Event::new(10, vec![f64::NAN]).is_err());
    }

    #[test]
    fn test_empty_tickets() {
        let e = Event::new(1, vec![]).unwrap();
        assert!(e.tickets().is_empty());
        assert_eq!(e.min_price(), None);
        assert_eq!(e.formatted_min_price("$", 5), NO_PRICE);
    }

    #[test]
    fn test_formatted_id() {
        assert_eq!(Event::new(1, vec![]).unwrap().formatted_id(441), "001");
        assert_eq!(Event::new(111, vec![]).unwrap().formatted_id(441), "111");
        assert_eq!(Event::new(12345, vec![]).unwrap().formatted_id(441), "12345");
        assert_eq!(Event::new(5, vec![]).unwrap().formatted_id(1000), "0005");
        assert_eq!(Event::new(5, vec![]).unwrap().formatted_id(999), "005");
        assert_eq!(Event::new(5, vec![]).unwrap().formatted_id(1), "5");
        assert_eq!(Event::new(5, vec![]).unwrap().formatted_id(0), "5");
    }

    #[test]
    fn test_formatted_min_price() {
        let e = Event::new(3, vec![3.0, 10.0, 4.1, 74.54, 2.0]).unwrap();
        assert_eq!(e.min_price(), Some(2.0));
        assert_eq!(e.formatted_min_price("$", 5), "$02.00");
        assert_eq!(e.formatted_min_price("€", 3), "€2.00");

        let e = Event::new(4, vec![57.124, 99.5]).unwrap();
        assert_eq!(e.formatted_min_price("$", 5), "$57.12");
        assert_eq!(e.formatted_min_price("$", 7), "$0057.12");
    }
}
