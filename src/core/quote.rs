//! Price quote produced by the pricer
//!
//! Both sides are always computed together for one set of inputs.

use serde::{Deserialize, Serialize};

use super::option::OptionSide;

/// Theoretical call and put prices for one set of option parameters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceQuote {
    pub call: f64,
    pub put: f64,
}

impl PriceQuote {
    pub fn new(call: f64, put: f64) -> Self {
        Self { call, put }
    }

    /// Price of the requested side
    pub fn for_side(&self, side: OptionSide) -> f64 {
        match side {
            OptionSide::Call => self.call,
            OptionSide::Put => self.put,
        }
    }

    /// Call minus put, which parity ties to S - K*exp(-rT)
    pub fn parity_spread(&self) -> f64 {
        self.call - self.put
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_side() {
        let quote = PriceQuote::new(9.5, 6.5);
        assert_eq!(quote.for_side(OptionSide::Call), 9.5);
        assert_eq!(quote.for_side(OptionSide::Put), 6.5);
        assert_eq!(quote.parity_spread(), 3.0);
    }
}
