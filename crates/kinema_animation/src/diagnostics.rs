//! Structured skip diagnostics.
//!
//! A channel that cannot be resolved is dropped with a [`SkipReason`]. The
//! resolver collects one [`SkipDiagnostic`] per dropped channel and returns
//! them to the caller, which decides whether and how to log them.

use std::fmt;

use kinema_core::{ComponentType, SchemaError};
use thiserror::Error;

/// Which side of a sampler an accessor feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorSide {
    /// Key times
    Input,
    /// Key values
    Output,
}

impl fmt::Display for AccessorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Input => "input",
            Self::Output => "output",
        })
    }
}

/// Why a channel was dropped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipReason {
    #[error("unknown sampler: {sampler}")]
    UnknownSampler { sampler: String },

    #[error("unsupported interpolation: {interpolation} (only LINEAR and STEP are supported)")]
    UnsupportedInterpolation { interpolation: String },

    /// Legacy documents only: the sampler names a parameter the animation does
    /// not declare.
    #[error("unknown parameter: {side} parameter {parameter}")]
    UnknownParameter {
        side: AccessorSide,
        parameter: String,
    },

    #[error("unknown accessor: {side} accessor {accessor}")]
    UnknownAccessor {
        side: AccessorSide,
        accessor: String,
    },

    #[error("non-float accessor: {side} accessor {accessor} has {component_type} components")]
    NonFloatAccessor {
        side: AccessorSide,
        accessor: String,
        component_type: ComponentType,
    },

    #[error("invalid accessor: {side} accessor {accessor}: {source}")]
    InvalidAccessor {
        side: AccessorSide,
        accessor: String,
        #[source]
        source: SchemaError,
    },

    #[error(
        "arity mismatch: {side} accessor {accessor} has {actual} components per element, expected {expected}"
    )]
    ArityMismatch {
        side: AccessorSide,
        accessor: String,
        expected: usize,
        actual: usize,
    },

    #[error("empty keys: input accessor {accessor} has no elements")]
    EmptyKeys { accessor: String },

    #[error(
        "invalid key times: input accessor {accessor} is not finite and strictly increasing at element {index}"
    )]
    InvalidKeyTimes { accessor: String, index: usize },

    #[error("count mismatch: {keys} key times but {values} values")]
    CountMismatch { keys: usize, values: usize },

    #[error("unsupported target path: {path}")]
    UnsupportedTargetPath { path: String },

    #[error("unknown target node: {node}")]
    UnknownTargetNode { node: String },
}

/// One dropped channel.
#[derive(Debug, Clone, PartialEq)]
pub struct SkipDiagnostic {
    pub animation_id: String,
    /// Position of the channel inside its animation
    pub channel_index: usize,
    /// Sampler the channel references
    pub sampler_id: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkipDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "animation {} channel {} (sampler {}): {}",
            self.animation_id, self.channel_index, self.sampler_id, self.reason
        )
    }
}
