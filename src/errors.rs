//! Error types with diagnostics using miette
//!
//! Render errors are per-call: a failed symbol never poisons the renderer.

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

/// Errors surfaced by [`crate::SymbolRenderer`] and the label engine.
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("symbol {poid} has no usable location")]
    #[diagnostic(
        code(milsketch::render::missing_location),
        help("a symbol needs at least one coordinate and a centroid")
    )]
    MissingLocation { poid: String },

    #[error("multipoint rendering engine is not available")]
    #[diagnostic(
        code(milsketch::render::engine_unavailable),
        help("render the symbol with the shallow fallback renderer instead")
    )]
    EngineUnavailable,

    #[error("multipoint engine failed: {message}")]
    #[diagnostic(code(milsketch::render::engine_render))]
    EngineRender { message: String },

    /// A symbol record or request that is not valid JSON. Malformed engine
    /// output is reported as [`RenderError::EngineRender`] instead.
    #[error("invalid JSON")]
    #[diagnostic(code(milsketch::render::invalid_payload))]
    InvalidPayload(#[from] serde_json::Error),

    #[error("text measurement failed: {message}")]
    #[diagnostic(code(milsketch::label::measure))]
    Measure { message: String },

    #[error("invalid {what}: {source}")]
    #[diagnostic(code(milsketch::label::invalid_number))]
    InvalidNumber {
        what: &'static str,
        #[source]
        source: NumericError,
    },
}

impl RenderError {
    pub(crate) fn invalid_number(what: &'static str) -> impl FnOnce(NumericError) -> RenderError {
        move |source| RenderError::InvalidNumber { what, source }
    }
}
