//! Report assembly: joins resolved readings into the final result record.
//!
//! This module:
//! - Builds the immutable `GateLineResult` from per-segment readings
//! - Scores it against ground truth when one is supplied (benchmark mode)
//! - Exposes gate activation, gate metadata, and channel/center analysis
//! - Renders text tables and JSON exports

pub mod accuracy;
pub mod activation;
pub mod channels;
pub mod gates;
pub mod render;

pub use accuracy::{Accuracy, GroundTruth, ImageAccuracy};
pub use activation::{Activation, GateSummary};

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::chart::{Column, PLANET_ORDER, Planet, ResolvedValue};
use channels::Channel;
use gates::Center;

/// Final extraction result for one image.
///
/// Both columns always hold all 13 planets; a planet that could not be read
/// is present as `ResolvedValue::Unresolved`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GateLineResult {
    image: String,
    design: BTreeMap<Planet, ResolvedValue>,
    personality: BTreeMap<Planet, ResolvedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accuracy: Option<ImageAccuracy>,
}

/// Builds the result from `(column, planet, value)` readings.
///
/// Missing readings are filled in as unresolved. When `truth` is given the
/// result also carries per-column and combined accuracy.
pub fn assemble(
    image: impl Into<String>,
    readings: &[(Column, Planet, ResolvedValue)],
    truth: Option<&GroundTruth>,
) -> GateLineResult {
    let blank = || -> BTreeMap<Planet, ResolvedValue> {
        PLANET_ORDER
            .iter()
            .map(|&p| (p, ResolvedValue::Unresolved))
            .collect()
    };
    let mut design = blank();
    let mut personality = blank();

    for &(column, planet, value) in readings {
        match column {
            Column::Design => design.insert(planet, value),
            Column::Personality => personality.insert(planet, value),
        };
    }

    let accuracy = truth.map(|truth| {
        let design = accuracy::score_column(&design, &truth.design);
        let personality = accuracy::score_column(&personality, &truth.personality);
        ImageAccuracy {
            design,
            personality,
            combined: design + personality,
        }
    });

    GateLineResult {
        image: image.into(),
        design,
        personality,
        accuracy,
    }
}

impl GateLineResult {
    /// Identifier of the source image (its file name).
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn column(&self, column: Column) -> &BTreeMap<Planet, ResolvedValue> {
        match column {
            Column::Design => &self.design,
            Column::Personality => &self.personality,
        }
    }

    pub fn value(&self, column: Column, planet: Planet) -> ResolvedValue {
        self.column(column)
            .get(&planet)
            .copied()
            .unwrap_or(ResolvedValue::Unresolved)
    }

    pub fn accuracy(&self) -> Option<&ImageAccuracy> {
        self.accuracy.as_ref()
    }

    /// Every `(column, planet)` that could not be read, in column then planet order.
    pub fn unresolved(&self) -> Vec<(Column, Planet)> {
        Column::ALL
            .into_iter()
            .flat_map(|column| {
                self.column(column)
                    .iter()
                    .filter(|(_, v)| !v.is_resolved())
                    .map(move |(&planet, _)| (column, planet))
            })
            .collect()
    }

    /// Activation classification of every gate present in either column.
    pub fn activations(&self) -> BTreeMap<u8, Activation> {
        activation::classify(&self.design, &self.personality)
    }

    pub fn gate_summary(&self) -> GateSummary {
        GateSummary::from_activations(&self.activations())
    }

    pub fn defined_channels(&self) -> Vec<&'static Channel> {
        let activated: BTreeSet<u8> = self.activations().into_keys().collect();
        channels::defined_channels(&activated)
    }

    pub fn defined_centers(&self) -> BTreeSet<Center> {
        channels::defined_centers(&self.defined_channels())
    }
}
