//! Offscreen text measurement.
//!
//! Placing a label needs the bounding box the host's text engine would give
//! the label's `<text>` element. [`TextMetrics`] hands out a
//! [`MeasureSurface`] per label; dropping the surface releases whatever the
//! host allocated for it (a detached DOM node, a shaping buffer), on every
//! exit path of the label engine.

use crate::errors::RenderError;
use crate::types::PixelBox;

use super::defaults;
use super::label::{HAlign, LabelText};

/// Host text-layout capability.
pub trait TextMetrics {
    /// Lays out `markup` on a fresh, invisible surface.
    fn open_surface<'a>(
        &'a self,
        markup: &LabelText,
    ) -> Result<Box<dyn MeasureSurface + 'a>, RenderError>;
}

/// A laid-out text run. Released on drop.
pub trait MeasureSurface {
    /// Unrotated bounding box in the text's own coordinates: the origin is
    /// the text position, so `y` is negative above the baseline.
    fn bbox(&self) -> Result<PixelBox, RenderError>;
}

/// Proportional character widths (hundredths of a character unit) for
/// printable ASCII, starting at `' '`.
#[rustfmt::skip]
const AW_CHAR: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Width of `text` in hundredths of a character unit.
pub fn text_length(text: &str) -> u32 {
    text.chars()
        .map(|c| {
            if (' '..='~').contains(&c) {
                AW_CHAR[(c as usize) - 0x20] as u32
            } else {
                100
            }
        })
        .sum()
}

/// Deterministic measurer built on a proportional width table.
///
/// Good enough for hit-testing outlines when no real shaping engine is at
/// hand, and stable across platforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProportionalTextMetrics;

impl TextMetrics for ProportionalTextMetrics {
    fn open_surface<'a>(
        &'a self,
        markup: &LabelText,
    ) -> Result<Box<dyn MeasureSurface + 'a>, RenderError> {
        let size = markup.style.font_size.raw();
        let mut width = text_length(&markup.text) as f64 * defaults::CHAR_UNIT * size;
        if markup.style.is_bold() {
            width *= defaults::BOLD_WIDTH_FACTOR;
        }
        let x = match markup.align {
            HAlign::Left => 0.0,
            HAlign::Center => -width / 2.0,
            HAlign::Right => -width,
        };
        let ascent = defaults::FONT_ASCENT * size;
        let height = ascent + defaults::FONT_DESCENT * size;
        Ok(Box::new(LaidOutRun {
            bbox: PixelBox::new(x, -ascent, width, height),
        }))
    }
}

struct LaidOutRun {
    bbox: PixelBox,
}

impl MeasureSurface for LaidOutRun {
    fn bbox(&self) -> Result<PixelBox, RenderError> {
        Ok(self.bbox)
    }
}
