use image::{DynamicImage, GrayImage, RgbaImage};
use imageproc::contrast::{ThresholdType, otsu_level, threshold};
use imageproc::distance_transform::Norm;
use imageproc::morphology::open;

/// Alternate pixel representations of a segment, in the order they are tried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Luma conversion followed by global Otsu binarization.
    OtsuBinary,
    /// `OtsuBinary` followed by a morphological close.
    MorphClose,
    /// The cropped region, untouched.
    Original,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::OtsuBinary, Variant::MorphClose, Variant::Original];
}

/// Converts to grayscale and binarizes at the Otsu level.
///
/// Pixels brighter than the level become white (background), the rest black.
/// A region with a single intensity comes out uniformly white or black.
pub fn otsu_binarize(region: &RgbaImage) -> GrayImage {
    let gray = DynamicImage::ImageRgba8(region.clone()).to_luma8();
    let level = otsu_level(&gray);
    threshold(&gray, level, ThresholdType::Binary)
}

/// Morphological close of the black ink with a 3x3 kernel.
///
/// imageproc treats white as foreground, and the ink here is black, so this
/// is an open on the white background. One-pixel breaks in a stroke are
/// bridged and strokes two pixels wide are kept.
pub fn close_binary(binary: &GrayImage) -> GrayImage {
    open(binary, Norm::LInf, 1)
}

/// Produces every variant of `region`. All three are always produced.
pub fn preprocess_bank(region: &RgbaImage) -> Vec<(Variant, DynamicImage)> {
    let binary = otsu_binarize(region);

    Variant::ALL
        .into_iter()
        .map(|variant| {
            let prepared = match variant {
                Variant::OtsuBinary => DynamicImage::ImageLuma8(binary.clone()),
                Variant::MorphClose => DynamicImage::ImageLuma8(close_binary(&binary)),
                Variant::Original => DynamicImage::ImageRgba8(region.clone()),
            };
            (variant, prepared)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgba};

    /// Dark "ink" stripe on a light background.
    fn stripe_region() -> RgbaImage {
        ImageBuffer::from_fn(20, 10, |x, _| {
            if (8..12).contains(&x) {
                Rgba([30, 30, 30, 255])
            } else {
                Rgba([235, 235, 235, 255])
            }
        })
    }

    #[test]
    fn test_otsu_separates_ink_from_background() {
        let binary = otsu_binarize(&stripe_region());
        assert_eq!(binary.dimensions(), (20, 10));
        assert_eq!(binary.get_pixel(10, 5)[0], 0, "ink should be black");
        assert_eq!(binary.get_pixel(2, 5)[0], 255, "background should be white");
        assert!(binary.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    fn ink(image: &GrayImage) -> usize {
        image.pixels().filter(|p| p[0] == 0).count()
    }

    #[test]
    fn test_close_keeps_thin_stroke() {
        let binary: GrayImage = ImageBuffer::from_fn(9, 14, |x, _| {
            if x == 3 || x == 4 {
                Luma([0])
            } else {
                Luma([255])
            }
        });
        let closed = close_binary(&binary);
        assert_eq!(ink(&binary), 28);
        assert_eq!(ink(&closed), 28);
        assert_eq!(closed, binary);
    }

    #[test]
    fn test_close_bridges_broken_stroke() {
        let binary: GrayImage = ImageBuffer::from_fn(9, 9, |x, y| {
            if (3..6).contains(&x) && y != 4 {
                Luma([0])
            } else {
                Luma([255])
            }
        });
        let closed = close_binary(&binary);
        assert_eq!(closed.get_pixel(4, 4)[0], 0, "break should be bridged");
        assert_eq!(closed.get_pixel(0, 4)[0], 255, "background should stay white");
    }

    #[test]
    fn test_bank_produces_all_variants_in_order() {
        let region = stripe_region();
        let bank = preprocess_bank(&region);
        let variants: Vec<Variant> = bank.iter().map(|(v, _)| *v).collect();
        assert_eq!(variants, Variant::ALL.to_vec());
        for (_, img) in &bank {
            assert_eq!((img.width(), img.height()), (20, 10));
        }
        assert_eq!(bank[2].1.to_rgba8(), region);
    }

    #[test]
    fn test_bank_is_deterministic() {
        let region = stripe_region();
        let first = preprocess_bank(&region);
        let second = preprocess_bank(&region);
        for ((_, a), (_, b)) in first.iter().zip(second.iter()) {
            assert_eq!(a.as_bytes(), b.as_bytes());
        }
    }
}
