//! Screen capture normalized to the current display orientation.
//!
//! Capture sources hand out buffers in the natural orientation of the panel. When the display is
//! rotated, the raw buffer is requested at native dimensions and composited upright into a buffer
//! of logical dimensions.

mod image;
pub mod rotator;

pub use image::{CapturedImage, Size};
pub use rotator::{correction_for, Correction, Rotation};

/// Where raw screen pixels come from.
pub trait CaptureSource {
    /// Real pixel dimensions of the display in its current (logical) orientation.
    fn real_display_size(&self) -> Size;

    /// Current display rotation in degrees.
    fn current_rotation_degrees(&self) -> i32;

    /// Captures the display contents in the natural orientation of the panel.
    ///
    /// Returns `None` when no capture is possible right now.
    fn raw_capture(&mut self, size: Size) -> Option<CapturedImage>;
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("screen capture unavailable at {0}")]
    Unavailable(Size),
}

/// Captures the screen as an image that reads upright in the current orientation.
pub fn capture(source: &mut impl CaptureSource) -> Result<CapturedImage, CaptureError> {
    let _span = tracy_client::span!("capture");

    let logical = source.real_display_size();
    let correction = correction_for(source.current_rotation_degrees());
    let native = correction.native_size(logical);

    let Some(raw) = source.raw_capture(native) else {
        return Err(CaptureError::Unavailable(native));
    };

    if raw.size() != native {
        warn!("raw capture is {}, requested {native}", raw.size());
    }

    if !correction.requires_rotation() {
        return Ok(raw);
    }

    trace!(
        "rotating {} capture by {} degrees into {logical}",
        raw.size(),
        360. - correction.degrees
    );
    Ok(composite_upright(&raw, logical, &correction))
}

/// Draws `raw` into a new `logical`-sized image through the correction transform.
///
/// Pixels of the destination that nothing maps onto stay transparent.
fn composite_upright(raw: &CapturedImage, logical: Size, correction: &Correction) -> CapturedImage {
    let transform = correction.composite_transform(raw.size(), logical);
    let inverse = transform.inverse();

    CapturedImage::from_fn(logical, |x, y| {
        let (sx, sy) = rotator::pixel_at(&inverse, x, y);
        raw.pixel(sx, sy).unwrap_or([0, 0, 0, 0])
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    /// Display that hands out a pattern where every pixel encodes its native coordinates.
    struct TestDisplay {
        logical: Size,
        rotation: i32,
        available: bool,
        requested: Vec<Size>,
    }

    impl TestDisplay {
        fn new(logical: Size, rotation: i32) -> Self {
            Self {
                logical,
                rotation,
                available: true,
                requested: Vec::new(),
            }
        }
    }

    fn encode(x: u32, y: u32) -> [u8; 4] {
        [x as u8, (x >> 8) as u8, y as u8, (y >> 8) as u8]
    }

    impl CaptureSource for TestDisplay {
        fn real_display_size(&self) -> Size {
            self.logical
        }

        fn current_rotation_degrees(&self) -> i32 {
            self.rotation
        }

        fn raw_capture(&mut self, size: Size) -> Option<CapturedImage> {
            self.requested.push(size);
            self.available
                .then(|| CapturedImage::from_fn(size, encode))
        }
    }

    #[test]
    fn unrotated_capture_is_passed_through() {
        let mut display = TestDisplay::new(Size::new(1080, 1920), 0);
        let image = capture(&mut display).unwrap();
        assert_eq!(image.size(), Size::new(1080, 1920));
        assert_eq!(display.requested, [Size::new(1080, 1920)]);
        assert_eq!(image.pixel(10, 20), Some(encode(10, 20)));
    }

    #[test]
    fn quarter_turn_swaps_dimensions() {
        // Native panel is 1080x1920; rotated by 90 degrees it reads 1920x1080.
        let mut display = TestDisplay::new(Size::new(1920, 1080), 90);
        let image = capture(&mut display).unwrap();
        assert_eq!(display.requested, [Size::new(1080, 1920)]);
        assert_eq!(image.size(), Size::new(1920, 1080));
    }

    #[test]
    fn quarter_turn_pixel_placement() {
        // 2x3 native buffer shown at 90 degrees as 3x2.
        let mut display = TestDisplay::new(Size::new(3, 2), 90);
        let image = capture(&mut display).unwrap();
        assert_eq!(image.size(), Size::new(3, 2));

        // The native top row ends up in the left column, read bottom to top.
        assert_eq!(image.pixel(0, 1), Some(encode(0, 0)));
        assert_eq!(image.pixel(0, 0), Some(encode(1, 0)));
        assert_eq!(image.pixel(1, 1), Some(encode(0, 1)));
        assert_eq!(image.pixel(2, 1), Some(encode(0, 2)));
        assert_eq!(image.pixel(2, 0), Some(encode(1, 2)));
    }

    #[test]
    fn three_quarter_turn_pixel_placement() {
        // 2x3 native buffer shown at 270 degrees as 3x2.
        let mut display = TestDisplay::new(Size::new(3, 2), 270);
        let image = capture(&mut display).unwrap();
        assert_eq!(display.requested, [Size::new(2, 3)]);
        assert_eq!(image.size(), Size::new(3, 2));

        // The native top row ends up in the right column, read top to bottom.
        assert_eq!(image.pixel(2, 0), Some(encode(0, 0)));
        assert_eq!(image.pixel(2, 1), Some(encode(1, 0)));
        assert_eq!(image.pixel(1, 0), Some(encode(0, 1)));
        assert_eq!(image.pixel(0, 0), Some(encode(0, 2)));
        assert_eq!(image.pixel(0, 1), Some(encode(1, 2)));
    }

    #[test]
    fn half_turn_flips_both_axes() {
        let mut display = TestDisplay::new(Size::new(4, 3), 180);
        let image = capture(&mut display).unwrap();
        assert_eq!(display.requested, [Size::new(4, 3)]);
        assert_eq!(image.pixel(0, 0), Some(encode(3, 2)));
        assert_eq!(image.pixel(3, 2), Some(encode(0, 0)));
        assert_eq!(image.pixel(1, 2), Some(encode(2, 0)));
    }

    #[test]
    fn unavailable_capture_is_an_error() {
        let mut display = TestDisplay::new(Size::new(1920, 1080), 270);
        display.available = false;
        let err = capture(&mut display).unwrap_err();
        assert!(matches!(err, CaptureError::Unavailable(size) if size == Size::new(1080, 1920)));
    }

    #[test]
    fn unrecognized_rotation_captures_as_is() {
        let mut display = TestDisplay::new(Size::new(8, 6), 45);
        let image = capture(&mut display).unwrap();
        assert_eq!(display.requested, [Size::new(8, 6)]);
        assert_eq!(image.pixel(7, 5), Some(encode(7, 5)));
    }

    proptest! {
        #[test]
        fn rotated_capture_is_a_permutation(
            w in 1u32..24,
            h in 1u32..24,
            degrees in prop::sample::select(vec![0, 90, 180, 270]),
        ) {
            let mut display = TestDisplay::new(Size::new(w, h), degrees);
            let image = capture(&mut display).unwrap();
            prop_assert_eq!(image.size(), Size::new(w, h));

            let native = display.requested[0];
            let mut seen = HashSet::new();
            for y in 0..h {
                for x in 0..w {
                    let px = image.pixel(i64::from(x), i64::from(y)).unwrap();
                    let nx = u32::from(px[0]) | (u32::from(px[1]) << 8);
                    let ny = u32::from(px[2]) | (u32::from(px[3]) << 8);
                    prop_assert!(nx < native.w && ny < native.h);
                    prop_assert!(seen.insert((nx, ny)));
                }
            }
        }
    }
}
