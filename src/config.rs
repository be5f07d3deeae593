use crate::error::GridError;

/// Configuration of a simulation: grid extent, ticket price bounds and presentation settings.
///
/// The default matches the classic setup: a grid spanning `[-10, 10]` on both axes,
/// prices in dollars between `1.00` and `100.00`, up to 15 tickets per event and
/// 5 events reported per query.
///
/// ```rust
/// use grid_events::SimulationConfig;
///
/// let config = SimulationConfig::default();
/// assert_eq!(config.cell_count(), 441);
/// assert_eq!(config.price_digit_width(), 5); // "100.0"
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Half extent of the grid, coordinates live in `[-radius, radius]`.
    pub radius: u16,
    /// Symbol prefixed to every formatted price.
    pub currency: String,
    /// Lowest price the populator draws.
    pub min_ticket_price: f64,
    /// Highest price the populator draws. Also drives the width of formatted prices.
    pub max_ticket_price: f64,
    /// Upper bound on the number of tickets of a populated event.
    pub max_tickets_per_event: usize,
    /// How many events a query reports.
    pub nearest_count: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            radius: 10,
            currency: "$".to_string(),
            min_ticket_price: 1.0,
            max_ticket_price: 100.0,
            max_tickets_per_event: 15,
            nearest_count: 5,
        }
    }
}

impl SimulationConfig {
    /// Checks the price bounds are usable by the populator.
    pub fn validate(&self) -> Result<(), GridError> {
        if !self.min_ticket_price.is_finite() || !self.max_ticket_price.is_finite() {
            return Err(GridError::InvalidConfig("ticket price bounds must be finite"));
        }
        if self.min_ticket_price <= 0.0 {
            return Err(GridError::InvalidConfig(
                "minimum ticket price must be greater than 0",
            ));
        }
        if self.min_ticket_price > self.max_ticket_price {
            return Err(GridError::InvalidConfig(
                "minimum ticket price exceeds maximum ticket price",
            ));
        }
        Ok(())
    }

    /// Number of cells of a grid built from this configuration, `(2R+1)²`.
    pub fn cell_count(&self) -> usize {
        let side = 2 * self.radius as usize + 1;
        side * side
    }

    /// Width formatted minimum prices are zero-padded to.
    ///
    /// It is the length of the configured maximum price written with at least one
    /// fractional digit, independently of the prices actually being formatted.
    pub fn price_digit_width(&self) -> usize {
        // Debug keeps the trailing ".0" of integral floats
        format!("{:?}", self.max_ticket_price).len()
    }
}

#[cfg(test)]
mod tests {
    use super::SimulationConfig;
    use crate::GridError;

    #[test]
    fn test_default_is_valid() {
        let c = SimulationConfig::default();
        assert_eq!(c.validate(), Ok(()));
        assert_eq!(c.radius, 10);
        assert_eq!(c.currency, "$");
        assert_eq!(c.nearest_count, 5);
    }

    #[test]
    fn test_price_digit_width() {
        let mut c = SimulationConfig::default();
        assert_eq!(c.price_digit_width(), 5);

        c.max_ticket_price = 99.99;
        assert_eq!(c.price_digit_width(), 5);

        c.max_ticket_price = 1000.0;
        assert_eq!(c.price_digit_width(), 6);

        c.max_ticket_price = 7.5;
        assert_eq!(c.price_digit_width(), 3);
    }

    #[test]
    fn test_cell_count() {
        let mut c = SimulationConfig::default();
        c.radius = 0;
        assert_eq!(c.cell_count(), 1);
        c.radius = 2;
        assert_eq!(c.cell_count(), 25);
    }

    #[test]
    fn test_invalid_bounds() {
        let mut c = SimulationConfig::default();
        c.min_ticket_price = 0.0;
        assert!(matches!(c.validate(), Err(GridError::InvalidConfig(_))));

        let mut c = SimulationConfig::default();
        c.min_ticket_price = 200.0;
        assert!(matches!(c.validate(), Err(GridError::InvalidConfig(_))));

        let mut c = SimulationConfig::default();
        c.max_ticket_price = f64::INFINITY;
        assert!(matches!(c.validate(), Err(GridError::InvalidConfig(_))));
    }
}
