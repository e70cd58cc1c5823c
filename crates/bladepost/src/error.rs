//! Error types for the porting layer.

use thiserror::Error;

/// Errors surfaced while porting templates between a source and a sink.
///
/// The conversion itself is total and never fails; errors come from the
/// collaborators on either side of it.
#[derive(Debug, Error)]
pub enum PortError {
    /// The template source failed to produce records.
    #[error("template source error: {0}")]
    Source(String),

    /// The sink rejected a converted template.
    #[error("template sink error: {0}")]
    Sink(String),
}
