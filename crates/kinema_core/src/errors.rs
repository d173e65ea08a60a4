//! Error Types
//!
//! This module defines the error types shared by the Kinema crates.
//!
//! # Overview
//!
//! - [`SchemaError`]: an accessor (or the buffer view behind it) describes a
//!   byte range that cannot be decoded. Returned when a [`TypedView`] is built.
//! - [`OutOfRange`]: a caller indexed a [`TypedView`] past its element count or
//!   arity. This is a contract violation by the caller, not bad external data.
//! - [`KinemaError`]: umbrella error with `From` conversions for the above and
//!   for JSON parsing failures.
//!
//! [`TypedView`]: crate::view::TypedView

use thiserror::Error;

use crate::accessor::ComponentType;

/// A malformed accessor description.
///
/// Construction of a typed view fails with this error and no partial view is
/// ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The component type code is not one of the supported GL enums.
    #[error("Unsupported component type code: {0}")]
    UnsupportedComponentType(u32),

    /// The component type cannot be combined with the normalized flag.
    #[error("Normalized accessors cannot use the {0} component type")]
    UnsupportedNormalization(ComponentType),

    /// An explicit byte stride is smaller than one element.
    #[error("Byte stride {stride} is smaller than the element size {element_size}")]
    StrideTooSmall {
        /// The declared stride
        stride: usize,
        /// Size of one element in bytes
        element_size: usize,
    },

    /// Computing the end of the accessor range overflowed `usize`.
    #[error("Accessor range overflows the address space")]
    RangeOverflow,

    /// The accessor reads past the end of its bytes.
    #[error("Accessor needs {required} bytes but only {available} are available")]
    OutOfBounds {
        /// Bytes required by offset, count and stride
        required: usize,
        /// Bytes actually available
        available: usize,
    },

    /// The referenced buffer view does not exist.
    #[error("Unknown buffer view: {0}")]
    UnknownBufferView(String),

    /// The referenced buffer does not exist in the buffer store.
    #[error("Unknown buffer: {0}")]
    UnknownBuffer(String),

    /// The buffer view range does not fit into its buffer.
    #[error("Buffer view {view} spans bytes {start}..{end} but buffer has {available}")]
    BufferViewOutOfBounds {
        /// Buffer view id
        view: String,
        /// First byte of the view
        start: usize,
        /// One past the last byte of the view
        end: usize,
        /// Length of the buffer
        available: usize,
    },
}

/// Index misuse on a typed view.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutOfRange {
    /// Element index is not below the element count.
    #[error("Element index {index} out of range (element count: {count})")]
    Element {
        /// The invalid index
        index: usize,
        /// Number of elements in the view
        count: usize,
    },

    /// Component index is not below the components per element.
    #[error("Component index {index} out of range (components per element: {count})")]
    Component {
        /// The invalid index
        index: usize,
        /// Components per element of the view
        count: usize,
    },
}

/// The umbrella error type for the Kinema crates.
#[derive(Error, Debug)]
pub enum KinemaError {
    /// An accessor could not be decoded.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A typed view was indexed out of range.
    #[error("Out of range: {0}")]
    OutOfRange(#[from] OutOfRange),

    /// A description document could not be parsed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias for `Result<T, KinemaError>`.
pub type Result<T> = std::result::Result<T, KinemaError>;
