//! Quote state.

use chrono::{DateTime, Local};

/// Direction of a quote's price movement since the previous close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    /// Classify a price change. Only an exact zero is flat.
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Self::Up
        } else if change < 0.0 {
            Self::Down
        } else {
            Self::Flat
        }
    }

    /// Arrow glyph shown in front of the percent change.
    pub fn arrow(&self) -> char {
        match self {
            Self::Up | Self::Flat => '\u{25B2}',
            Self::Down => '\u{25BC}',
        }
    }
}

/// One symbol's latest daily close compared to the close before it.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Ticker symbol, uppercased.
    pub symbol: String,
    /// Latest close.
    pub price: f64,
    /// `price - previous_close`.
    pub change: f64,
    /// Change relative to the previous close, in percent.
    pub percent_change: f64,
    /// Movement classification.
    pub direction: Direction,
}

impl Quote {
    /// Build a quote from the previous and current close.
    pub fn from_closes(symbol: impl Into<String>, previous_close: f64, price: f64) -> Self {
        let change = price - previous_close;
        let percent_change = if previous_close != 0.0 {
            change / previous_close * 100.0
        } else {
            0.0
        };

        Self {
            symbol: symbol.into(),
            price,
            change,
            percent_change,
            direction: Direction::from_change(change),
        }
    }

    /// Text drawn after the symbol, e.g. ` $153.00 ▲2.0%`.
    pub fn trailer(&self) -> String {
        format!(
            " ${:.2} {}{:.1}%",
            self.price,
            self.direction.arrow(),
            self.percent_change.abs()
        )
    }
}

/// One fetch cycle's complete set of quotes.
#[derive(Debug, Clone)]
pub struct QuoteSnapshot {
    /// Fetch cycle that produced this snapshot; 0 for the initial empty one.
    pub cycle: u64,
    /// When the snapshot was published.
    pub fetched_at: Option<DateTime<Local>>,
    /// Quotes in configured symbol order.
    pub quotes: Vec<Quote>,
}

impl QuoteSnapshot {
    /// The snapshot shown before any fetch has succeeded.
    pub fn empty() -> Self {
        Self {
            cycle: 0,
            fetched_at: None,
            quotes: Vec::new(),
        }
    }

    /// Create a snapshot for a completed fetch cycle.
    pub fn new(cycle: u64, quotes: Vec<Quote>) -> Self {
        Self {
            cycle,
            fetched_at: Some(Local::now()),
            quotes,
        }
    }

    /// Check if there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Number of quotes.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }
}

impl Default for QuoteSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_from_closes() {
        let quote = Quote::from_closes("AAPL", 150.0, 153.0);
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.price, 153.0);
        assert!((quote.change - 3.0).abs() < 1e-9);
        assert!((quote.percent_change - 2.0).abs() < 1e-9);
        assert_eq!(quote.direction, Direction::Up);
    }

    #[test]
    fn test_zero_previous_close_has_zero_percent() {
        let quote = Quote::from_closes("NEW", 0.0, 12.5);
        assert_eq!(quote.percent_change, 0.0);
        assert_eq!(quote.change, 12.5);
    }

    #[test]
    fn test_zero_change_is_flat() {
        let quote = Quote::from_closes("SPY", 500.0, 500.0);
        assert_eq!(quote.direction, Direction::Flat);
        assert_eq!(Direction::from_change(0.0), Direction::Flat);
        assert_eq!(Direction::from_change(-0.01), Direction::Down);
    }

    #[test]
    fn test_trailer_format() {
        let up = Quote::from_closes("AAPL", 150.0, 153.0);
        assert_eq!(up.trailer(), " $153.00 \u{25B2}2.0%");

        let down = Quote::from_closes("TSLA", 200.0, 190.0);
        assert_eq!(down.trailer(), " $190.00 \u{25BC}5.0%");
    }
}
