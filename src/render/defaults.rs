//! Default sizes and settings (pixels unless noted)

use crate::types::Px;

/// Side of the square point-symbol icon, and of its clickable outline.
pub const ICON_SIZE: Px = Px(35.0);
pub const LABEL_FONT_SIZE: Px = Px(12.0);
pub const LABEL_FONT_FAMILY: &str = "Arial";
pub const LABEL_FONT_WEIGHT: &str = "normal";
pub const LABEL_FONT_COLOR: &str = "black";
pub const LABEL_OUTLINE_WIDTH: Px = Px(0.0);

/// Shift applied to vertically centered anchors; text boxes overshoot
/// below the visual center by about this much.
pub const CENTER_ANCHOR_OFFSET: f64 = 2.0;

/// Hostile amplifier shown on enemy equipment icons.
pub const HOSTILE_TEXT: &str = "ENY";

/// Multipoint engine modifier keys for the unique designations.
pub const MODIFIER_DESIGNATOR_1: &str = "T";
pub const MODIFIER_DESIGNATOR_2: &str = "T1";

/// Font metrics used by the proportional measurer, as fractions of the
/// font size (Arial's ascender and descender).
pub const FONT_ASCENT: f64 = 0.905;
pub const FONT_DESCENT: f64 = 0.212;
/// Width of one hundredth of a character-width unit, as a fraction of the
/// font size (charwid 0.08 over charht 0.14).
pub const CHAR_UNIT: f64 = 0.01 * 0.08 / 0.14;
/// Bold text is wider.
pub const BOLD_WIDTH_FACTOR: f64 = 1.1;
