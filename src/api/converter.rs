//! Data conversion utilities for chart API responses.

use crate::error::{Error, Result};
use crate::state::Quote;
use serde::Deserialize;

/// Top level of a chart endpoint response.
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Deserialize)]
pub struct AdjClose {
    #[serde(default)]
    pub adjclose: Option<Vec<Option<f64>>>,
}

/// Converts API responses to internal state types.
pub struct DataConverter;

impl DataConverter {
    /// Extract the adjusted-close series from a chart response body.
    ///
    /// Nulls are kept; a missing `result[0]` or adjclose path is an error.
    pub fn parse_closes(symbol: &str, body: &str) -> Result<Vec<Option<f64>>> {
        let response: ChartResponse = serde_json::from_str(body)?;

        let result = response
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| Error::malformed(symbol, "chart.result is empty"))?;

        result
            .indicators
            .adjclose
            .and_then(|series| series.into_iter().next())
            .and_then(|series| series.adjclose)
            .ok_or_else(|| Error::malformed(symbol, "missing indicators.adjclose"))
    }

    /// Build a quote from the two most recent non-null closes.
    ///
    /// Returns `None` when fewer than two closes are available.
    pub fn convert_quote(symbol: &str, closes: &[Option<f64>]) -> Option<Quote> {
        let mut valid = closes.iter().rev().filter_map(|c| *c);
        let price = valid.next()?;
        let previous_close = valid.next()?;
        Some(Quote::from_closes(symbol, previous_close, price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Direction;

    const CHART_BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL", "currency": "USD" },
                "timestamp": [1, 2, 3, 4],
                "indicators": {
                    "quote": [{ "close": [148.0, 149.0, 150.0, 153.0] }],
                    "adjclose": [{ "adjclose": [148.0, null, 150.0, 153.0] }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_closes() {
        let closes = DataConverter::parse_closes("AAPL", CHART_BODY).unwrap();
        assert_eq!(closes, vec![Some(148.0), None, Some(150.0), Some(153.0)]);
    }

    #[test]
    fn test_parse_closes_without_result() {
        let body = r#"{ "chart": { "result": null, "error": { "code": "Not Found" } } }"#;
        let err = DataConverter::parse_closes("NOPE", body).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[test]
    fn test_parse_closes_invalid_json() {
        let err = DataConverter::parse_closes("AAPL", "<html>").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_convert_quote_uses_last_two_valid_closes() {
        let closes = [Some(140.0), Some(150.0), None, Some(153.0), None];
        let quote = DataConverter::convert_quote("AAPL", &closes).unwrap();
        assert_eq!(quote.price, 153.0);
        assert!((quote.percent_change - 2.0).abs() < 1e-9);
        assert_eq!(quote.direction, Direction::Up);
    }

    #[test]
    fn test_convert_quote_needs_two_closes() {
        assert!(DataConverter::convert_quote("X", &[None, Some(10.0), None]).is_none());
        assert!(DataConverter::convert_quote("X", &[]).is_none());
    }

    #[test]
    fn test_convert_quote_zero_previous_close() {
        let quote = DataConverter::convert_quote("X", &[Some(0.0), Some(5.0)]).unwrap();
        assert_eq!(quote.percent_change, 0.0);
    }
}
