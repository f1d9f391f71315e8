//! Tolerant price-series extraction from provider payloads.
//!
//! Historical data arrives in several shapes depending on endpoint and
//! provider: objects with a `price` field, `[timestamp, price]` pairs from
//! market-chart endpoints, or bare numbers from sparkline arrays. Extraction
//! never fails on a malformed entry; it skips it. Non-positive prices are
//! treated as malformed.

use serde_json::Value;

/// Extract a price series from a heterogeneous JSON array.
///
/// Accepted entry shapes:
/// - `{"price": 1.23, ...}`
/// - `[ts, 1.23]` (market-chart pair; the *second* element is the price)
/// - `[1.23]` (single-element array)
/// - `1.23` (bare number)
///
/// Anything else - nulls, strings, empty arrays, non-positive values - is
/// skipped. A non-array input yields an empty series.
pub fn extract_prices(payload: &Value) -> Vec<f64> {
    let Some(entries) = payload.as_array() else {
        return Vec::new();
    };

    let mut prices = Vec::with_capacity(entries.len());
    for entry in entries {
        let price = match entry {
            Value::Object(map) => map.get("price").and_then(Value::as_f64),
            Value::Array(pair) => match pair.len() {
                0 => None,
                1 => pair[0].as_f64(),
                // [timestamp, price] - timestamps are epoch millis, so the
                // price is always the second element.
                _ => pair[1].as_f64(),
            },
            Value::Number(_) => entry.as_f64(),
            _ => None,
        };

        if let Some(p) = price {
            if p.is_finite() && p > 0.0 {
                prices.push(p);
            }
        }
    }
    prices
}

/// Pull the 7-day sparkline price array out of a CoinGecko markets row.
///
/// The row shape is `{"sparkline_in_7d": {"price": [..]}, ...}`. Returns an
/// empty series when the field is absent (sparkline not requested) or empty.
pub fn extract_sparkline_prices(market_row: &Value) -> Vec<f64> {
    market_row
        .get("sparkline_in_7d")
        .and_then(|s| s.get("price"))
        .map_or_else(Vec::new, extract_prices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_object_entries() {
        let payload = json!([{"price": 100.0}, {"price": 101.5}, {"price": 99.8}]);
        assert_eq!(extract_prices(&payload), vec![100.0, 101.5, 99.8]);
    }

    #[test]
    fn extracts_market_chart_pairs() {
        let payload = json!([[1_700_000_000_000_i64, 100.0], [1_700_000_060_000_i64, 101.5]]);
        assert_eq!(extract_prices(&payload), vec![100.0, 101.5]);
    }

    #[test]
    fn extracts_bare_numbers() {
        let payload = json!([100.0, 101.5, 99.8, 102.1]);
        assert_eq!(extract_prices(&payload).len(), 4);
    }

    #[test]
    fn mixed_formats_extract_what_they_can() {
        let payload = json!([{"price": 100.0}, [1_700_000_060_000_i64, 101.5], 99.8]);
        assert_eq!(extract_prices(&payload), vec![100.0, 101.5, 99.8]);
    }

    #[test]
    fn invalid_entries_are_skipped() {
        let payload = json!([null, {"price": null}, [], {"volume": 100}, "12.5", -3.0, 0.0]);
        assert!(extract_prices(&payload).is_empty());
    }

    #[test]
    fn non_array_input_yields_empty() {
        assert!(extract_prices(&json!({"price": 1.0})).is_empty());
        assert!(extract_prices(&Value::Null).is_empty());
    }

    #[test]
    fn sparkline_prices_come_from_nested_field() {
        let row = json!({
            "id": "uniswap",
            "current_price": 6.1,
            "sparkline_in_7d": {"price": [6.0, 6.05, 6.1]}
        });
        assert_eq!(extract_sparkline_prices(&row), vec![6.0, 6.05, 6.1]);

        let no_sparkline = json!({"id": "uniswap", "current_price": 6.1});
        assert!(extract_sparkline_prices(&no_sparkline).is_empty());
    }
}
