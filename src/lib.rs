//! Render sketched military symbols for a map.
//!
//! A recognized [`Symbol`] goes in; out comes a GeoJSON [`Feature`] for the
//! map plus [`PresentationPack`]s: icons for point symbols, and rotated SVG
//! labels (with anchor and clickable outline) for tactical graphics.
//!
//! ```no_run
//! use milsketch::{Icon, IconGenerator, IconOptions, SymbolRenderer, Symbol, ViewBounds};
//!
//! struct NoIcons;
//! impl IconGenerator for NoIcons {
//!     fn generate(&self, _sidc: &str, _options: &IconOptions) -> Option<Icon> {
//!         None
//!     }
//! }
//!
//! let symbol: Symbol = serde_json::from_str(r#"{
//!     "poid": "1", "sidc": { "legacy": "GFGPGLB----****" },
//!     "location": { "shape": "line",
//!                   "coords": [{ "lat": 1, "lon": 1 }, { "lat": 2, "lon": 2 }],
//!                   "centroid": { "lat": 1.5, "lon": 1.5 } }
//! }"#)?;
//! let bounds = ViewBounds::from_edges(3.0, 0.0, 3.0, 0.0);
//! let rendered = SymbolRenderer::new(NoIcons).render(&symbol, &bounds)?;
//! assert!(rendered.geometry.is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

pub mod bounds;
pub mod errors;
pub mod geojson;
pub mod log;
pub mod render;
pub mod symbol;
pub mod types;

pub use bounds::{MapBounds, ViewBounds};
pub use errors::RenderError;
pub use geojson::{Feature, Geometry};
pub use render::{
    Icon, IconGenerator, IconOptions, MultipointEngine, MultipointRequest, PackKind,
    PresentationPack, RenderListener, RenderOptions, Rendered, SymbolRenderer, TextMetrics,
};
pub use symbol::{Affiliation, GeoPoint, Location, ShapeKind, Sidc, Strength, Symbol};
