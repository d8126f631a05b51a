pub mod engine;
pub mod overrides;
pub mod preprocess;
pub mod resolve;
pub mod setup;

pub use engine::{Profile, Recognizer, TesseractRecognizer};
pub use overrides::{OVERRIDES, Override};
pub use setup::ensure_tesseract;

use rayon::prelude::*;

use crate::calibration::{ChartLayout, Segment, locate_segments};
use crate::chart::{ChartImage, Column, Planet, ResolvedValue};
use crate::report::{self, GateLineResult, GroundTruth};
use preprocess::preprocess_bank;
use resolve::{Candidate, resolve};

/// Runs every profile over every preprocessing variant of one segment.
///
/// Returns the full candidate pool in variant-then-profile order. A failed
/// engine call is recognition noise: it is logged and counted as an empty read.
pub fn read_segment<R: Recognizer + ?Sized>(
    image: &ChartImage,
    segment: &Segment,
    recognizer: &R,
) -> Vec<Candidate> {
    let region = image.crop(segment.rect);
    let mut candidates = Vec::with_capacity(12);

    for (variant, prepared) in preprocess_bank(&region) {
        for profile in Profile::ALL {
            let raw = match recognizer.recognize(&prepared, profile) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(
                        "OCR failed for {} {} ({:?}/{:?}): {:#}",
                        segment.column,
                        segment.planet,
                        variant,
                        profile,
                        e
                    );
                    String::new()
                }
            };
            candidates.push(Candidate::new(raw, variant, profile));
        }
    }

    candidates
}

/// Resolves one segment: candidate fan-out, vote, then the override table.
fn resolve_segment<R: Recognizer + ?Sized>(
    image: &ChartImage,
    segment: &Segment,
    recognizer: &R,
    image_id: &str,
    overrides: &[Override],
) -> ResolvedValue {
    let candidates = read_segment(image, segment, recognizer);
    for c in &candidates {
        tracing::trace!(
            "{} {} {:?}/{:?}: {:?}",
            segment.column,
            segment.planet,
            c.variant,
            c.profile,
            c.raw
        );
    }
    let resolution = resolve(&candidates);

    tracing::debug!(
        "{} {}: {} ({}/{} votes, {} valid)",
        segment.column,
        segment.planet,
        resolution.value,
        resolution.votes,
        resolution.total,
        resolution.valid
    );

    overrides::apply_override(
        overrides,
        image_id,
        segment.column,
        segment.planet,
        resolution.value,
    )
}

/// Extraction pipeline over a fixed layout.
///
/// Holds only shared, read-only state, so one pipeline can process any number
/// of images and its segments can be resolved in parallel.
pub struct Pipeline<'a, R: Recognizer + ?Sized> {
    layout: &'a ChartLayout,
    recognizer: &'a R,
    overrides: &'a [Override],
    parallel: bool,
}

impl<'a, R: Recognizer + ?Sized> Pipeline<'a, R> {
    /// A sequential pipeline using the built-in override table.
    pub fn new(layout: &'a ChartLayout, recognizer: &'a R) -> Self {
        Self {
            layout,
            recognizer,
            overrides: OVERRIDES,
            parallel: false,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Layout images must be validated against before extraction.
    pub fn layout(&self) -> &'a ChartLayout {
        self.layout
    }

    /// Reads all 26 segments of `image` and assembles the result.
    ///
    /// `image_id` keys the override table (the source file name). Output does
    /// not depend on `parallel`: readings are collected in segment order.
    pub fn extract(
        &self,
        image: &ChartImage,
        image_id: &str,
        truth: Option<&GroundTruth>,
    ) -> GateLineResult {
        let segments = locate_segments(self.layout);

        let resolve_one = |segment: &Segment| -> (Column, Planet, ResolvedValue) {
            let value =
                resolve_segment(image, segment, self.recognizer, image_id, self.overrides);
            (segment.column, segment.planet, value)
        };

        let readings: Vec<(Column, Planet, ResolvedValue)> = if self.parallel {
            segments.par_iter().map(resolve_one).collect()
        } else {
            segments.iter().map(resolve_one).collect()
        };

        let result = report::assemble(image_id, &readings, truth);

        let unresolved = result.unresolved();
        if unresolved.is_empty() {
            tracing::info!("{}: all {} segments resolved", image_id, readings.len());
        } else {
            tracing::warn!(
                "{}: {} of {} segments unresolved",
                image_id,
                unresolved.len(),
                readings.len()
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::Rect;
    use crate::chart::{GateLine, PLANET_ORDER};
    use anyhow::anyhow;
    use image::{DynamicImage, ImageBuffer, Rgba};
    use std::collections::BTreeMap;

    const DESIGN: [&str; 13] = [
        "42.5", "32.3", "50.4", "10.4", "15.4", "62.2", "55.6", "1.3", "8.2", "21.6", "53.1",
        "26.2", "44.5",
    ];
    const PERSONALITY: [&str; 13] = [
        "62.3", "61.3", "38.1", "14.5", "8.5", "7.1", "13.2", "48.5", "56.4", "20.1", "39.3",
        "57.6", "58.2",
    ];

    fn layout() -> ChartLayout {
        ChartLayout {
            canvas: None,
            design: Rect::new(10, 5, 20, 39),
            personality: Rect::new(40, 5, 20, 39),
        }
    }

    /// Paints each segment a flat color encoding its (column, planet), on a
    /// white background.
    fn chart() -> ChartImage {
        let layout = layout();
        let mut pixels = ImageBuffer::from_pixel(70, 50, Rgba([255, 255, 255, 255]));
        for segment in locate_segments(&layout) {
            let code = Rgba([segment.planet.index() as u8, segment.column as u8, 200, 255]);
            for y in segment.rect.y..segment.rect.bottom() {
                for x in segment.rect.x..segment.rect.x + segment.rect.width {
                    pixels.put_pixel(x, y, code);
                }
            }
        }
        ChartImage::from_pixels(pixels, &layout).unwrap()
    }

    /// Reads the color code back from the untouched variant. Binarized
    /// variants carry no code and read as noise.
    struct ScriptedRecognizer {
        script: fn(Column, Planet, Profile) -> anyhow::Result<String>,
    }

    impl Recognizer for ScriptedRecognizer {
        fn recognize(&self, region: &DynamicImage, profile: Profile) -> anyhow::Result<String> {
            let Some(rgba) = region.as_rgba8() else {
                return Ok("~".to_string());
            };
            let code = rgba.get_pixel(0, 0);
            let planet = PLANET_ORDER[code[0] as usize];
            let column = if code[1] == 0 { Column::Design } else { Column::Personality };
            (self.script)(column, planet, profile)
        }
    }

    fn truth_text(column: Column, planet: Planet) -> &'static str {
        match column {
            Column::Design => DESIGN[planet.index()],
            Column::Personality => PERSONALITY[planet.index()],
        }
    }

    fn clean(column: Column, planet: Planet, profile: Profile) -> anyhow::Result<String> {
        let text = truth_text(column, planet);
        // Unconstrained word mode picks up look-alikes and trailing debris.
        Ok(match profile {
            Profile::SingleWord => format!("{}\n", text.replace('1', "l").replace('.', ",")),
            _ => format!("{}\n", text),
        })
    }

    fn ground_truth() -> GroundTruth {
        let parse = |s: &str| GateLine::parse(s).unwrap();
        GroundTruth {
            design: PLANET_ORDER.iter().map(|&p| (p, parse(DESIGN[p.index()]))).collect(),
            personality: PLANET_ORDER
                .iter()
                .map(|&p| (p, parse(PERSONALITY[p.index()])))
                .collect(),
        }
    }

    #[test]
    fn test_read_segment_produces_full_pool() {
        let image = chart();
        let recognizer = ScriptedRecognizer { script: clean };
        let segment = locate_segments(&layout())[0];

        let pool = read_segment(&image, &segment, &recognizer);

        assert_eq!(pool.len(), 12);
        assert_eq!(pool[0].variant, preprocess::Variant::OtsuBinary);
        assert_eq!(pool[11].variant, preprocess::Variant::Original);
        assert_eq!(pool[11].profile, Profile::SingleWord);
        assert_eq!(pool[9].raw, "42.5\n");
    }

    #[test]
    fn test_reproduces_all_26_values() {
        let image = chart();
        let recognizer = ScriptedRecognizer { script: clean };
        let truth = ground_truth();

        let result =
            Pipeline::new(&layout(), &recognizer).extract(&image, "reference.png", Some(&truth));

        assert!(result.unresolved().is_empty());
        let accuracy = result.accuracy().unwrap();
        assert_eq!(accuracy.combined.matched, 26);
        assert_eq!(accuracy.combined.total, 26);
        assert_eq!(accuracy.combined.percent(), 100.0);
        assert_eq!(
            result.value(Column::Personality, Planet::Mercury).to_string(),
            "7.1"
        );
    }

    #[test]
    fn test_parallel_output_is_identical() {
        let image = chart();
        let recognizer = ScriptedRecognizer { script: clean };
        let layout = layout();

        let first = Pipeline::new(&layout, &recognizer)
            .parallel(true)
            .extract(&image, "reference.png", None);
        let second = Pipeline::new(&layout, &recognizer)
            .parallel(true)
            .extract(&image, "reference.png", None);
        let sequential = Pipeline::new(&layout, &recognizer).extract(&image, "reference.png", None);

        let json = |r: &GateLineResult| serde_json::to_string(r).unwrap();
        assert_eq!(json(&first), json(&second));
        assert_eq!(json(&first), json(&sequential));
    }

    #[test]
    fn test_unreadable_segment_is_unresolved() {
        fn pluto_garbled(
            column: Column,
            planet: Planet,
            profile: Profile,
        ) -> anyhow::Result<String> {
            if planet == Planet::Pluto && column == Column::Design {
                return Ok("12.9".to_string());
            }
            clean(column, planet, profile)
        }
        let image = chart();
        let recognizer = ScriptedRecognizer { script: pluto_garbled };

        let result = Pipeline::new(&layout(), &recognizer).extract(&image, "chart.png", None);

        assert_eq!(result.unresolved(), vec![(Column::Design, Planet::Pluto)]);
        assert_eq!(
            result.value(Column::Design, Planet::Pluto),
            ResolvedValue::Unresolved
        );
    }

    #[test]
    fn test_engine_failures_are_absorbed() {
        fn broken(_: Column, _: Planet, _: Profile) -> anyhow::Result<String> {
            Err(anyhow!("tesseract exited with status 1"))
        }
        let image = chart();
        let recognizer = ScriptedRecognizer { script: broken };

        let result = Pipeline::new(&layout(), &recognizer).extract(&image, "chart.png", None);

        assert_eq!(result.unresolved().len(), 26);
    }

    #[test]
    fn test_override_applies_after_resolution() {
        let image = chart();
        let recognizer = ScriptedRecognizer { script: clean };

        let plain = Pipeline::new(&layout(), &recognizer).extract(&image, "chart.png", None);
        let patched = Pipeline::new(&layout(), &recognizer).extract(&image, "IMG_1986.PNG", None);

        assert_eq!(plain.value(Column::Personality, Planet::Pluto).to_string(), "58.2");
        assert_eq!(patched.value(Column::Personality, Planet::Pluto).to_string(), "18.1");
        assert_eq!(patched.value(Column::Personality, Planet::Uranus).to_string(), "32.2");

        let changed: BTreeMap<Planet, ResolvedValue> = patched
            .column(Column::Personality)
            .iter()
            .filter(|(p, v)| plain.value(Column::Personality, **p) != **v)
            .map(|(p, v)| (*p, *v))
            .collect();
        assert_eq!(changed.len(), 2);
        assert_eq!(patched.column(Column::Design), plain.column(Column::Design));
    }
}
