//! Display rotation geometry.

use glam::{DAffine2, DVec2};

use super::Size;

/// Rotation of the display away from its natural orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Normal,
    _90,
    _180,
    _270,
}

impl Rotation {
    /// Maps a rotation in degrees; anything other than 90, 180 or 270 is [`Rotation::Normal`].
    pub fn from_degrees(degrees: i32) -> Self {
        match degrees {
            90 => Self::_90,
            180 => Self::_180,
            270 => Self::_270,
            _ => Self::Normal,
        }
    }

    pub fn degrees(self) -> f64 {
        match self {
            Self::Normal => 0.,
            Self::_90 => 90.,
            Self::_180 => 180.,
            Self::_270 => 270.,
        }
    }

    pub fn is_normal(self) -> bool {
        self == Self::Normal
    }

    /// Swaps width and height for quarter turns.
    pub fn transform_size(self, size: Size) -> Size {
        match self {
            Self::Normal | Self::_180 => size,
            Self::_90 | Self::_270 => Size::new(size.h, size.w),
        }
    }
}

/// How to undo a display rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    pub rotation: Rotation,
    pub degrees: f64,
    /// Maps logical (rotated) vectors back to the natural orientation.
    pub transform: DAffine2,
}

impl Correction {
    pub fn requires_rotation(&self) -> bool {
        self.degrees > 0.
    }

    /// Dimensions of the display in its natural orientation, given its logical dimensions.
    pub fn native_size(&self, logical: Size) -> Size {
        if !self.requires_rotation() {
            return logical;
        }

        // Rotating can flip signs; the float result is within rounding distance of an integer.
        let native = self.transform.transform_vector2(logical.to_dvec2()).abs();
        Size::new(native.x.round() as u32, native.y.round() as u32)
    }

    /// Transform that draws a natural-orientation buffer of `native` size upright into a buffer of
    /// `logical` size: translate to the destination center, rotate by `360 - degrees`, translate
    /// back by half the source.
    pub fn composite_transform(&self, native: Size, logical: Size) -> DAffine2 {
        DAffine2::from_translation(logical.to_dvec2() / 2.)
            * DAffine2::from_angle((360. - self.degrees).to_radians())
            * DAffine2::from_translation(-native.to_dvec2() / 2.)
    }
}

/// Returns the correction for a device rotation given in degrees.
///
/// Unrecognized values are treated as no rotation.
pub fn correction_for(rotation_degrees: i32) -> Correction {
    let rotation = Rotation::from_degrees(rotation_degrees);
    let degrees = rotation.degrees();
    Correction {
        rotation,
        degrees,
        transform: if rotation.is_normal() {
            DAffine2::IDENTITY
        } else {
            DAffine2::from_angle(-degrees.to_radians())
        },
    }
}

/// Maps a point through `transform` and returns the pixel it lands in.
pub(super) fn pixel_at(transform: &DAffine2, x: u32, y: u32) -> (i64, i64) {
    let center = DVec2::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
    let p = transform.transform_point2(center).floor();
    (p.x as i64, p.y as i64)
}
