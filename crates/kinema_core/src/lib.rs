//! Kinema Core
//!
//! Foundational types shared by the Kinema crates:
//!
//! - [`BufferStore`]: caller-owned byte buffers, shared without copying
//! - [`AccessorDescriptor`] / [`BufferViewDescriptor`]: how to interpret bytes
//! - [`TypedView`]: bounds-checked float view over accessor bytes
//! - [`SchemaVersion`]: dotted-numeric version ordering
//! - [`errors`]: [`SchemaError`], [`OutOfRange`] and the umbrella [`KinemaError`]

pub mod accessor;
pub mod buffer;
pub mod errors;
pub mod version;
pub mod view;

pub use accessor::{AccessorDescriptor, BufferViewDescriptor, ComponentType, ElementType};
pub use buffer::BufferStore;
pub use errors::{KinemaError, OutOfRange, Result, SchemaError};
pub use version::SchemaVersion;
pub use view::TypedView;
