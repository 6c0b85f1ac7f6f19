//! Label placement
//!
//! Turns a text run plus style into a standalone SVG image whose reported
//! anchor and clickable outline live in the image's own pixel space:
//!
//! 1. measure the unrotated text box on an offscreen surface
//! 2. pick the anchor on that box from the alignment
//! 3. rotate, then shift so the rotated box starts at the origin
//! 4. push the anchor and the four box corners through the final transform
//!
//! Every reported point lies in `[0, width] × [0, height]`.

use std::fmt::Write as _;

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

use crate::errors::RenderError;
use crate::types::{Degrees, PixelBox, Px};

use super::defaults;
use super::metrics::TextMetrics;
use super::svg::{escape_xml, fmt_num};
use super::transform::Affine;

/// Horizontal alignment of a label relative to its geographic point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl HAlign {
    /// Reads an engine `labelAlign` value; anything unrecognized centers.
    pub fn from_engine(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "start" | "l" => HAlign::Left,
            "right" | "end" | "r" => HAlign::Right,
            _ => HAlign::Center,
        }
    }

    /// SVG `text-anchor` value.
    pub fn text_anchor(self) -> &'static str {
        match self {
            HAlign::Left => "start",
            HAlign::Center => "middle",
            HAlign::Right => "end",
        }
    }

    /// Centered labels center vertically too; side-aligned labels sit on
    /// their point.
    pub fn vertical(self) -> VAlign {
        match self {
            HAlign::Center => VAlign::Center,
            HAlign::Left | HAlign::Right => VAlign::Bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub font_size: Px,
    pub font_family: String,
    pub font_weight: String,
    pub font_color: String,
    pub outline_color: Option<String>,
    pub outline_width: Px,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: defaults::LABEL_FONT_SIZE,
            font_family: defaults::LABEL_FONT_FAMILY.to_string(),
            font_weight: defaults::LABEL_FONT_WEIGHT.to_string(),
            font_color: defaults::LABEL_FONT_COLOR.to_string(),
            outline_color: None,
            outline_width: defaults::LABEL_OUTLINE_WIDTH,
        }
    }
}

impl LabelStyle {
    pub fn is_bold(&self) -> bool {
        let weight = self.font_weight.trim();
        weight.eq_ignore_ascii_case("bold")
            || weight.eq_ignore_ascii_case("bolder")
            || weight.parse::<u32>().is_ok_and(|w| w >= 600)
    }
}

/// A text run to place: the markup handed to the measurement surface.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelText {
    pub text: String,
    pub style: LabelStyle,
    pub angle: Degrees,
    pub align: HAlign,
}

impl LabelText {
    pub fn new(text: impl Into<String>, style: LabelStyle, angle: Degrees, align: HAlign) -> Self {
        Self {
            text: text.into(),
            style,
            angle,
            align,
        }
    }

    /// The `<text>` element, positioned at the origin, under `transform`.
    pub fn element(&self, transform: &Affine) -> String {
        let style = &self.style;
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<text x="0" y="0" font-family="{}" font-size="{}" font-weight="{}" fill="{}" text-anchor="{}""#,
            escape_xml(&style.font_family),
            fmt_num(style.font_size.raw()),
            escape_xml(&style.font_weight),
            escape_xml(&style.font_color),
            self.align.text_anchor(),
        );
        if let Some(outline) = &style.outline_color {
            if style.outline_width.raw() > 0.0 {
                let _ = write!(
                    out,
                    r#" stroke="{}" stroke-width="{}" paint-order="stroke""#,
                    escape_xml(outline),
                    fmt_num(style.outline_width.raw()),
                );
            }
        }
        if *transform != Affine::IDENTITY {
            let _ = write!(out, r#" transform="{}""#, transform.to_svg());
        }
        let _ = write!(out, ">{}</text>", escape_xml(&self.text));
        out
    }

    fn validate(&self) -> Result<(), RenderError> {
        Px::try_positive(self.style.font_size.raw())
            .map_err(RenderError::invalid_number("font size"))?;
        Px::try_non_negative(self.style.outline_width.raw())
            .map_err(RenderError::invalid_number("outline width"))?;
        Degrees::try_new(self.angle.0).map_err(RenderError::invalid_number("label angle"))?;
        Ok(())
    }
}

/// Result of placing one label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    /// Standalone SVG document.
    pub svg: String,
    pub width: f64,
    pub height: f64,
    /// Point of the image that sits on the label's geographic position.
    pub anchor: DVec2,
    /// Clickable quadrilateral around the text, clockwise from the text's
    /// own top-left corner.
    pub shape: [DVec2; 4],
}

/// Anchor on the unrotated text box.
pub fn anchor_point(bb: &PixelBox, halign: HAlign, valign: VAlign) -> DVec2 {
    let x = match halign {
        HAlign::Left => bb.x,
        HAlign::Center => bb.x + bb.width / 2.0,
        HAlign::Right => bb.x + bb.width,
    };
    let y = match valign {
        VAlign::Top => bb.y,
        VAlign::Center => bb.y + bb.height / 2.0 - defaults::CENTER_ANCHOR_OFFSET,
        VAlign::Bottom => bb.y + bb.height,
    };
    dvec2(x, y)
}

/// Pull `p` onto `[0, extent]` when it sits outside by rounding residue only.
///
/// Anything further out means the transform is wrong; debug builds panic.
fn snap_to_extent(p: DVec2, extent: DVec2) -> DVec2 {
    let tolerance = 1e-9 * extent.max_element().max(1.0);
    let snapped = p.clamp(DVec2::ZERO, extent);
    debug_assert!(
        (p - snapped).abs().max_element() <= tolerance,
        "{p:?} lies outside 0..{extent:?}"
    );
    snapped
}

/// Measure, rotate and serialize one label.
pub fn place_label(metrics: &dyn TextMetrics, label: &LabelText) -> Result<LabelPlacement, RenderError> {
    label.validate()?;

    let surface = metrics.open_surface(label)?;
    let bb = surface.bbox()?;
    if !bb.is_finite() || bb.width < 0.0 || bb.height < 0.0 {
        return Err(RenderError::Measure {
            message: format!("unusable text box {bb:?} for {:?}", label.text),
        });
    }

    let anchor = anchor_point(&bb, label.align, label.align.vertical());

    let rotated = Affine::IDENTITY.then_rotate(label.angle);
    let rotated_bounds = rotated.map_box(&bb);

    // Move the rotated box onto the origin so nothing lands at negative
    // coordinates and the viewBox starts at 0,0.
    let transform = rotated.pre_translate(-rotated_bounds.min());
    // The shifted box starts at the origin, so its far corner is the extent:
    // |maxX - rotatedMinX| in pre-shift terms.
    let final_bounds = transform.map_box(&bb);
    let width = final_bounds.max().x.abs();
    let height = final_bounds.max().y.abs();

    let extent = dvec2(width, height);
    let anchor = snap_to_extent(transform.apply(anchor), extent);
    let shape = bb.corners().map(|c| snap_to_extent(transform.apply(c), extent));

    let svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{text}</svg>"#,
        w = fmt_num(width),
        h = fmt_num(height),
        text = label.element(&transform),
    );
    drop(surface);

    crate::log::debug!(
        text = %label.text,
        angle = label.angle.0,
        width,
        height,
        "placed label"
    );

    Ok(LabelPlacement {
        svg,
        width,
        height,
        anchor,
        shape,
    })
}
