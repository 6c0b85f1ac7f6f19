//! Symbol rendering
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and settings
//! - `types`: Render outputs (presentation packs)
//! - `geometry`: Positions, ring closing, part merging
//! - `transform`: 2D affine transforms
//! - `metrics`: Offscreen text measurement
//! - `label`: Label placement
//! - `point`: Single-point icon symbols
//! - `multipoint`: Bridge to the multipoint engine
//! - `fallback`: Shallow geometry without an engine
//! - `svg`: SVG text helpers

pub mod defaults;
pub mod fallback;
pub mod geometry;
pub mod label;
pub mod metrics;
pub mod multipoint;
pub mod point;
pub mod svg;
pub mod transform;
pub mod types;

// Re-export commonly used items
pub use label::{HAlign, LabelPlacement, LabelStyle, LabelText, VAlign, place_label};
pub use metrics::{MeasureSurface, ProportionalTextMetrics, TextMetrics};
pub use multipoint::{MultipointEngine, MultipointRequest, RenderFormat, SymbologyStandard};
pub use point::{Icon, IconGenerator, IconOptions};
pub use types::*;

use serde::{Deserialize, Serialize};

use crate::bounds::MapBounds;
use crate::errors::RenderError;
use crate::symbol::{ShapeKind, Symbol};
use crate::types::Px;

use multipoint::MultipointRenderer;
use point::PointRenderer;

/// Renderer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Side of point-symbol icons and their clickable square.
    pub icon_size: Px,
    /// Label style used where the engine leaves a property out.
    pub label_font_family: String,
    pub label_font_size: Px,
    pub label_font_weight: String,
    pub label_font_color: String,
    pub label_outline_color: Option<String>,
    pub label_outline_width: Px,
}

impl Default for RenderOptions {
    fn default() -> Self {
        let label = LabelStyle::default();
        Self {
            icon_size: defaults::ICON_SIZE,
            label_font_family: label.font_family,
            label_font_size: label.font_size,
            label_font_weight: label.font_weight,
            label_font_color: label.font_color,
            label_outline_color: label.outline_color,
            label_outline_width: label.outline_width,
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> Result<(), RenderError> {
        Px::try_positive(self.icon_size.raw()).map_err(RenderError::invalid_number("icon size"))?;
        Px::try_positive(self.label_font_size.raw())
            .map_err(RenderError::invalid_number("label font size"))?;
        Px::try_non_negative(self.label_outline_width.raw())
            .map_err(RenderError::invalid_number("label outline width"))?;
        Ok(())
    }

    pub fn label_style(&self) -> LabelStyle {
        LabelStyle {
            font_size: self.label_font_size,
            font_family: self.label_font_family.clone(),
            font_weight: self.label_font_weight.clone(),
            font_color: self.label_font_color.clone(),
            outline_color: self.label_outline_color.clone(),
            outline_width: self.label_outline_width,
        }
    }
}

/// Observer of render calls. Both hooks default to doing nothing.
pub trait RenderListener {
    fn on_rendered(&self, _poid: &str, _rendered: &Rendered) {}
    /// The multipoint engine was missing and the shallow renderer ran.
    fn on_fallback(&self, _poid: &str) {}
}

/// Renders symbols into geometry and presentation packs.
///
/// Holds only injected capabilities and configuration; each call is
/// independent.
pub struct SymbolRenderer {
    icons: Box<dyn IconGenerator>,
    engine: Option<Box<dyn MultipointEngine>>,
    metrics: Box<dyn TextMetrics>,
    options: RenderOptions,
    label_style: LabelStyle,
    listeners: Vec<Box<dyn RenderListener>>,
}

impl SymbolRenderer {
    /// A renderer with no multipoint engine and proportional text metrics.
    pub fn new(icons: impl IconGenerator + 'static) -> Self {
        let options = RenderOptions::default();
        Self {
            icons: Box::new(icons),
            engine: None,
            metrics: Box::new(ProportionalTextMetrics),
            label_style: options.label_style(),
            options,
            listeners: Vec::new(),
        }
    }

    pub fn with_engine(mut self, engine: impl MultipointEngine + 'static) -> Self {
        self.engine = Some(Box::new(engine));
        self
    }

    pub fn with_metrics(mut self, metrics: impl TextMetrics + 'static) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Result<Self, RenderError> {
        options.validate()?;
        self.label_style = options.label_style();
        self.options = options;
        Ok(self)
    }

    pub fn add_listener(&mut self, listener: impl RenderListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    /// Render a symbol, falling back to shallow geometry when the
    /// multipoint engine is not installed.
    pub fn render(&self, symbol: &Symbol, bounds: &dyn MapBounds) -> Result<Rendered, RenderError> {
        let location = symbol.valid_location()?;

        let rendered = if *location.shape == ShapeKind::Point {
            self.point_renderer().render(symbol, &location)
        } else {
            match self.multipoint_renderer().render(symbol, &location, bounds) {
                Err(RenderError::EngineUnavailable) => {
                    crate::log::warn!(poid = %symbol.poid, "multipoint engine unavailable, using shallow renderer");
                    for listener in &self.listeners {
                        listener.on_fallback(&symbol.poid);
                    }
                    fallback::render_shallow(&symbol.poid, &location)
                }
                other => other?,
            }
        };

        for listener in &self.listeners {
            listener.on_rendered(&symbol.poid, &rendered);
        }
        Ok(rendered)
    }

    /// Render a non-point symbol through the engine only; reports
    /// [`RenderError::EngineUnavailable`] instead of falling back.
    pub fn render_multipoint(
        &self,
        symbol: &Symbol,
        bounds: &dyn MapBounds,
    ) -> Result<Rendered, RenderError> {
        let location = symbol.valid_location()?;
        self.multipoint_renderer().render(symbol, &location, bounds)
    }

    /// Shallow geometry straight from the symbol's coordinates.
    pub fn render_shallow(&self, symbol: &Symbol) -> Result<Rendered, RenderError> {
        let location = symbol.valid_location()?;
        Ok(fallback::render_shallow(&symbol.poid, &location))
    }

    fn point_renderer(&self) -> PointRenderer<'_> {
        PointRenderer {
            icons: self.icons.as_ref(),
            icon_size: self.options.icon_size,
        }
    }

    fn multipoint_renderer(&self) -> MultipointRenderer<'_> {
        MultipointRenderer {
            engine: self.engine.as_deref(),
            metrics: self.metrics.as_ref(),
            label_style: &self.label_style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_deserialize_with_defaults() {
        let options: RenderOptions = serde_json::from_str(r#"{ "iconSize": 48 }"#).unwrap();
        assert_eq!(options.icon_size, Px(48.0));
        assert_eq!(options.label_font_family, "Arial");
        assert_eq!(options.label_font_size, defaults::LABEL_FONT_SIZE);
    }

    #[test]
    fn options_reject_bad_sizes() {
        let options = RenderOptions {
            icon_size: Px(0.0),
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(RenderError::InvalidNumber { what: "icon size", .. })
        ));
        let options = RenderOptions {
            label_font_size: Px(f64::NAN),
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }
}
