//! Comparison against ground-truth annotations (benchmark mode only).

use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Add;

use crate::chart::{GateLine, Planet, ResolvedValue};

/// Expected readings for one image, per column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroundTruth {
    pub design: BTreeMap<Planet, GateLine>,
    pub personality: BTreeMap<Planet, GateLine>,
}

impl GroundTruth {
    pub fn is_empty(&self) -> bool {
        self.design.is_empty() && self.personality.is_empty()
    }
}

/// `matched` out of `total`, kept as integers so sums stay exact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Accuracy {
    pub matched: u32,
    pub total: u32,
}

impl Accuracy {
    /// Percentage with a single division, so e.g. 26/26 is exactly 100.0.
    /// An empty total reports 0.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.matched) * 100.0 / f64::from(self.total)
    }

    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.matched == self.total
    }
}

impl Add for Accuracy {
    type Output = Accuracy;

    fn add(self, rhs: Accuracy) -> Accuracy {
        Accuracy {
            matched: self.matched + rhs.matched,
            total: self.total + rhs.total,
        }
    }
}

/// Per-column and combined accuracy for one image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImageAccuracy {
    pub design: Accuracy,
    pub personality: Accuracy,
    pub combined: Accuracy,
}

impl Add for ImageAccuracy {
    type Output = ImageAccuracy;

    fn add(self, rhs: ImageAccuracy) -> ImageAccuracy {
        ImageAccuracy {
            design: self.design + rhs.design,
            personality: self.personality + rhs.personality,
            combined: self.combined + rhs.combined,
        }
    }
}

/// Counts expected entries reproduced exactly. Unresolved never matches.
pub fn score_column(
    actual: &BTreeMap<Planet, ResolvedValue>,
    expected: &BTreeMap<Planet, GateLine>,
) -> Accuracy {
    let matched = expected
        .iter()
        .filter(|(planet, want)| {
            actual.get(*planet).copied() == Some(ResolvedValue::Resolved(**want))
        })
        .count();
    Accuracy {
        matched: matched as u32,
        total: expected.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_is_exact() {
        assert_eq!(Accuracy { matched: 26, total: 26 }.percent(), 100.0);
        assert_eq!(Accuracy { matched: 13, total: 26 }.percent(), 50.0);
        assert_eq!(Accuracy { matched: 0, total: 0 }.percent(), 0.0);
        let a = Accuracy { matched: 25, total: 26 };
        assert_eq!(a.percent(), 2500.0 / 26.0);
    }

    #[test]
    fn test_sum() {
        let a = Accuracy { matched: 12, total: 13 } + Accuracy { matched: 13, total: 13 };
        assert_eq!(a, Accuracy { matched: 25, total: 26 });
        assert!(!a.is_perfect());
        assert!(Accuracy { matched: 26, total: 26 }.is_perfect());
        assert!(!Accuracy::default().is_perfect());
    }

    #[test]
    fn test_score_column_unresolved_never_matches() {
        let sun = GateLine::new(42, 5).unwrap();
        let earth = GateLine::new(32, 3).unwrap();
        let expected: BTreeMap<Planet, GateLine> =
            [(Planet::Sun, sun), (Planet::Earth, earth)].into_iter().collect();
        let actual: BTreeMap<Planet, ResolvedValue> = [
            (Planet::Sun, ResolvedValue::Resolved(sun)),
            (Planet::Earth, ResolvedValue::Unresolved),
        ]
        .into_iter()
        .collect();
        assert_eq!(score_column(&actual, &expected), Accuracy { matched: 1, total: 2 });
    }
}
