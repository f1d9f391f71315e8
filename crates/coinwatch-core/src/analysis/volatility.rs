//! Volatility: stdev of percent price changes, absolute and market-relative.

use super::RelativeVolatility;

/// Minimum prices required before volatility is meaningful.
pub const MIN_PRICES: usize = 5;

/// Minimum percent changes required for a stdev.
const MIN_CHANGES: usize = 2;

/// Percent change between each consecutive pair of prices.
///
/// Entries with a non-positive predecessor are skipped rather than producing
/// infinities.
pub fn pct_changes(prices: &[f64]) -> Vec<f64> {
    let mut changes = Vec::with_capacity(prices.len().saturating_sub(1));
    for window in prices.windows(2) {
        let (prev, next) = (window[0], window[1]);
        if prev > 0.0 {
            let change = (next / prev - 1.0) * 100.0;
            if change.is_finite() {
                changes.push(change);
            }
        }
    }
    changes
}

/// Sample standard deviation. `None` for fewer than two values.
pub fn sample_stdev(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let len = n as f64;
    let mean = values.iter().sum::<f64>() / len;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (len - 1.0);
    Some(variance.sqrt())
}

/// Volatility of a price series: stdev of its percent changes.
///
/// Returns `None` when the series is too short (< [`MIN_PRICES`] prices or
/// fewer than two usable changes).
pub fn volatility(prices: &[f64]) -> Option<f64> {
    if prices.len() < MIN_PRICES {
        return None;
    }
    let changes = pct_changes(prices);
    if changes.len() < MIN_CHANGES {
        return None;
    }
    sample_stdev(&changes)
}

/// Volatility of a token relative to a set of reference price series.
///
/// References without enough history are skipped; `None` when the token
/// itself lacks history or no reference qualifies.
pub fn relative_volatility(
    token_prices: &[f64],
    reference_sets: &[Vec<f64>],
) -> Option<RelativeVolatility> {
    let token_volatility = volatility(token_prices)?;

    let reference_vols: Vec<f64> = reference_sets
        .iter()
        .filter_map(|prices| volatility(prices))
        .collect();
    if reference_vols.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let market_volatility = reference_vols.iter().sum::<f64>() / reference_vols.len() as f64;
    if market_volatility <= 0.0 {
        return None;
    }

    Some(RelativeVolatility {
        token_volatility,
        market_volatility,
        ratio: token_volatility / market_volatility,
        references_used: reference_vols.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MarketComparison;

    const SERIES: [f64; 8] = [100.0, 102.0, 98.0, 105.0, 103.0, 99.0, 107.0, 104.0];

    #[test]
    fn pct_changes_match_hand_computed() {
        let changes = pct_changes(&SERIES);
        assert_eq!(changes.len(), 7);
        assert!((changes[0] - 2.0).abs() < 1e-9);
        assert!((changes[1] - (98.0 / 102.0 - 1.0) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn pct_changes_skip_nonpositive_predecessors() {
        let changes = pct_changes(&[0.0, 100.0, 102.0]);
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn stdev_of_known_values() {
        // stdev of {2, 4, 4, 4, 5, 5, 7, 9} (sample) = 2.138...
        let v = sample_stdev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((v - 2.138_089_935).abs() < 1e-6);

        assert!(sample_stdev(&[1.0]).is_none());
    }

    #[test]
    fn volatility_requires_min_history() {
        assert!(volatility(&SERIES).is_some());
        assert!(volatility(&[100.0, 101.0, 102.0, 103.0]).is_none());
    }

    #[test]
    fn flat_series_has_zero_volatility() {
        let v = volatility(&[50.0; 10]).unwrap();
        assert!(v.abs() < f64::EPSILON);
    }

    #[test]
    fn relative_volatility_ratio_and_classification() {
        // Token swings twice as hard as the references.
        let token: Vec<f64> = SERIES.iter().map(|p| p * 1.0).collect();
        let calm: Vec<f64> = (0..8).map(|i| 100.0 + f64::from(i % 2) * 0.5).collect();
        let refs = vec![calm.clone(), calm];

        let rv = relative_volatility(&token, &refs).unwrap();
        assert_eq!(rv.references_used, 2);
        assert!(rv.ratio > 2.0);
        assert_eq!(rv.comparison(), MarketComparison::MuchMoreVolatile);
    }

    #[test]
    fn relative_volatility_skips_short_references() {
        let refs = vec![vec![100.0, 101.0], SERIES.to_vec()];
        let rv = relative_volatility(&SERIES, &refs).unwrap();
        assert_eq!(rv.references_used, 1);
        assert!((rv.ratio - 1.0).abs() < 1e-9);
        assert_eq!(rv.comparison(), MarketComparison::SimilarToMarket);
    }

    #[test]
    fn relative_volatility_none_without_references() {
        assert!(relative_volatility(&SERIES, &[]).is_none());
        assert!(relative_volatility(&SERIES, &[vec![1.0, 2.0]]).is_none());
    }
}
