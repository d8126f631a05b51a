use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

use crate::calibration::{ChartLayout, Rect, Size};
use crate::chart::{Column, PLANET_COUNT};
use crate::error::InputError;

/// A loaded chart raster. Read-only for the lifetime of a pipeline run.
#[derive(Clone, Debug)]
pub struct ChartImage {
    pixels: RgbaImage,
}

impl ChartImage {
    /// Opens `path` and validates it against `layout`.
    pub fn load(path: &Path, layout: &ChartLayout) -> Result<Self, InputError> {
        let pixels = image::open(path)
            .map_err(|source| InputError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        Self::from_pixels(pixels, layout)
    }

    /// Wraps an in-memory buffer, applying the same validation as `load`.
    pub fn from_pixels(pixels: RgbaImage, layout: &ChartLayout) -> Result<Self, InputError> {
        let image = Self { pixels };
        image.validate(layout)?;
        Ok(image)
    }

    fn validate(&self, layout: &ChartLayout) -> Result<(), InputError> {
        let actual = self.size();

        if let Some(expected) = layout.canvas {
            if expected != actual {
                return Err(InputError::CanvasMismatch { expected, actual });
            }
        }

        for column in Column::ALL {
            let rect = layout.column_rect(column);
            if (rect.height as usize) < PLANET_COUNT {
                return Err(InputError::RegionTooShort {
                    column,
                    rect,
                    planets: PLANET_COUNT,
                });
            }
            if !rect.fits_within(actual.width, actual.height) {
                return Err(InputError::RegionOutOfBounds {
                    column,
                    rect,
                    width: actual.width,
                    height: actual.height,
                });
            }
        }

        Ok(())
    }

    pub fn size(&self) -> Size {
        let (width, height) = self.pixels.dimensions();
        Size { width, height }
    }

    /// Copies out a sub-region. `rect` must lie inside the image.
    pub fn crop(&self, rect: Rect) -> ImageBuffer<Rgba<u8>, Vec<u8>> {
        image::imageops::crop_imm(&self.pixels, rect.x, rect.y, rect.width, rect.height).to_image()
    }
}
