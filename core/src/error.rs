//! Typed errors for configuration, integration and basis construction.

use thiserror::Error;

use crate::config::CoordinateType;

/// A configuration could not be read or is incomplete.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("missing configuration key `{key}`")]
    MissingKey { key: &'static str },

    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// A spatial integrator failed to produce a usable value.
#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("integral evaluated to a non-finite value ({value})")]
    NonFinite { value: f64 },

    #[error("the {integrator} integrator cannot handle this basis: {reason}")]
    Unsupported {
        integrator: &'static str,
        reason: String,
    },
}

/// Errors surfaced by the basis engine.
#[derive(Debug, Error)]
pub enum BasisError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("a polar basis in one dimension does not exist")]
    PolarBasisIn1d,

    #[error("{coordinates:?} coordinates are not supported in {dim} dimensions")]
    UnsupportedDimension {
        coordinates: CoordinateType,
        dim: usize,
    },

    #[error("could not set up the spatial integrator: {0}")]
    IntegratorSetup(#[source] IntegrationError),

    #[error("integration of <{p} {q}|V|{r} {s}> failed: {source}")]
    Integration {
        p: usize,
        q: usize,
        r: usize,
        s: usize,
        #[source]
        source: IntegrationError,
    },

    #[error("interaction element computation was cancelled")]
    Cancelled,
}

/// A computed basis could not be written out.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("could not write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}
