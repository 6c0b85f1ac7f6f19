//! 2D affine transforms in SVG's convention.
//!
//! A transform list `translate(..) rotate(..)` maps a point through the
//! rightmost entry first. `Affine::then_rotate` appends to the list and
//! `Affine::pre_translate` prepends, so composing in the order the label
//! engine needs reads the same as the resulting `transform` attribute.

use glam::{DAffine2, DVec2};

use crate::types::{Degrees, PixelBox};

use super::svg::fmt_num;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine(DAffine2);

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine(DAffine2::IDENTITY);

    pub fn rotation(angle: Degrees) -> Self {
        Affine(DAffine2::from_angle(angle.to_radians()))
    }

    pub fn translation(offset: DVec2) -> Self {
        Affine(DAffine2::from_translation(offset))
    }

    /// `self` followed (inside the transform list) by `rotate(angle)`.
    pub fn then_rotate(self, angle: Degrees) -> Self {
        Affine(self.0 * DAffine2::from_angle(angle.to_radians()))
    }

    /// `translate(offset)` placed in front of `self`.
    pub fn pre_translate(self, offset: DVec2) -> Self {
        Affine(DAffine2::from_translation(offset) * self.0)
    }

    pub fn apply(&self, p: DVec2) -> DVec2 {
        self.0.transform_point2(p)
    }

    /// Axis-aligned bounds of `bb` after transforming its four corners.
    pub fn map_box(&self, bb: &PixelBox) -> PixelBox {
        PixelBox::enclosing(bb.corners().map(|c| self.apply(c)))
    }

    /// The six matrix components `a b c d e f`.
    pub fn components(&self) -> [f64; 6] {
        self.0.to_cols_array()
    }

    /// SVG `transform` attribute value.
    pub fn to_svg(&self) -> String {
        let [a, b, c, d, e, f] = self.components();
        format!(
            "matrix({} {} {} {} {} {})",
            fmt_num(a),
            fmt_num(b),
            fmt_num(c),
            fmt_num(d),
            fmt_num(e),
            fmt_num(f)
        )
    }
}
