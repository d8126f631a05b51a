use std::collections::BTreeMap;

use crate::chart::{Column, Planet, ResolvedValue};

/// Which side(s) of the chart activate a gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// Personality (black) only.
    ConsciousOnly,
    /// Design (red) only.
    UnconsciousOnly,
    Both,
}

impl Activation {
    pub fn label(self) -> &'static str {
        match self {
            Activation::ConsciousOnly => "conscious",
            Activation::UnconsciousOnly => "unconscious",
            Activation::Both => "conscious & unconscious",
        }
    }

    fn with(self, column: Column) -> Activation {
        match (self, column) {
            (Activation::ConsciousOnly, Column::Personality)
            | (Activation::UnconsciousOnly, Column::Design) => self,
            _ => Activation::Both,
        }
    }

    fn from_column(column: Column) -> Activation {
        match column {
            Column::Design => Activation::UnconsciousOnly,
            Column::Personality => Activation::ConsciousOnly,
        }
    }
}

/// Classifies every gate number that appears in either column.
/// Unresolved readings contribute nothing.
pub fn classify(
    design: &BTreeMap<Planet, ResolvedValue>,
    personality: &BTreeMap<Planet, ResolvedValue>,
) -> BTreeMap<u8, Activation> {
    let mut out: BTreeMap<u8, Activation> = BTreeMap::new();

    for (column, readings) in [(Column::Design, design), (Column::Personality, personality)] {
        for gate_line in readings.values().filter_map(|v| v.gate_line()) {
            out.entry(gate_line.gate())
                .and_modify(|a| *a = a.with(column))
                .or_insert_with(|| Activation::from_column(column));
        }
    }

    out
}

/// Gate numbers grouped by classification, each list ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GateSummary {
    pub conscious_only: Vec<u8>,
    pub unconscious_only: Vec<u8>,
    pub both: Vec<u8>,
}

impl GateSummary {
    pub fn from_activations(activations: &BTreeMap<u8, Activation>) -> Self {
        let mut summary = GateSummary::default();
        for (&gate, activation) in activations {
            match activation {
                Activation::ConsciousOnly => summary.conscious_only.push(gate),
                Activation::UnconsciousOnly => summary.unconscious_only.push(gate),
                Activation::Both => summary.both.push(gate),
            }
        }
        summary
    }
}
