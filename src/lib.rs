//! Kinema
//!
//! Keyframe animation playback for glTF-style scene descriptions. Raw buffer
//! bytes are decoded through typed accessor views, animation channels are
//! resolved into validated units, and a playback manager samples them on a
//! shared clock and hands the values to caller-supplied write-back callbacks.
//!
//! ```rust,ignore
//! use kinema::prelude::*;
//!
//! let document = Document::from_json_slice(&json)?;
//! let buffers = BufferStore::new().with_buffer("main", bytes);
//! let (mut manager, skipped) =
//!     create_transform_manager(&document, &buffers, PlaybackSettings::default(), &scene);
//! manager.tick(1.0 / 60.0);
//! ```

pub use kinema_animation as animation;
pub use kinema_core as core;

pub use glam;

pub use kinema_animation::{
    AnimationHandle, AnimationManager, AnimationTarget, AnimationUnit, Document, PlaybackPolicy,
    PlaybackSettings, SkipDiagnostic, SkipReason, TargetPath, TransformTarget, WriteBack,
    create_animation_manager, create_transform_manager, resolve_document,
};
pub use kinema_core::{
    AccessorDescriptor, BufferStore, BufferViewDescriptor, ComponentType, ElementType,
    KinemaError, OutOfRange, Result, SchemaError, SchemaVersion, TypedView,
};

pub mod prelude {
    pub use crate::{
        AnimationManager, BufferStore, Document, PlaybackPolicy, PlaybackSettings,
        TransformTarget, create_animation_manager, create_transform_manager,
    };
}
