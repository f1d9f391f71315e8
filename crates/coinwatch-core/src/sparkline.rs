//! Sparklines built from stored price history.

use serde::{Deserialize, Serialize};

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Direction of a sparkline over its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SparklineTrend {
    Up,
    Down,
    Flat,
}

/// An ascending series of positive prices over a fixed window.
///
/// Only constructible through [`Sparkline::from_prices`], which is what
/// keeps the non-empty/positive invariant the accessors rely on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sparkline {
    points: Vec<f64>,
}

impl Sparkline {
    /// Build from an ascending price series.
    ///
    /// `None` when the series is empty or contains a non-positive price;
    /// a sparkline with holes would silently misrepresent the window.
    pub fn from_prices(points: Vec<f64>) -> Option<Self> {
        if points.is_empty() || points.iter().any(|p| !p.is_finite() || *p <= 0.0) {
            return None;
        }
        Some(Self { points })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> f64 {
        self.points[0]
    }

    pub fn last(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    pub fn min(&self) -> f64 {
        self.points.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.points.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Percent change from the first to the last point.
    pub fn change_pct(&self) -> f64 {
        (self.last() - self.first()) / self.first() * 100.0
    }

    pub fn trend(&self) -> SparklineTrend {
        let (first, last) = (self.first(), self.last());
        if last > first {
            SparklineTrend::Up
        } else if last < first {
            SparklineTrend::Down
        } else {
            SparklineTrend::Flat
        }
    }

    /// Render as a row of Unicode block bars, scaled to the series range.
    pub fn render(&self) -> String {
        let (min, max) = (self.min(), self.max());
        let range = max - min;
        self.points
            .iter()
            .map(|p| {
                if range <= f64::EPSILON {
                    BARS[3]
                } else {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let idx = (((p - min) / range) * 7.0).round() as usize;
                    BARS[idx.min(7)]
                }
            })
            .collect()
    }
}
