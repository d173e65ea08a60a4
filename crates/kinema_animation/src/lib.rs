//! Kinema Animation
//!
//! Keyframe playback for glTF-style animation descriptions:
//!
//! - [`document`]: the description model read from JSON
//! - [`resolve`]: the Channel Resolver, producing [`AnimationUnit`]s and
//!   [`SkipDiagnostic`]s
//! - [`tracks`] / [`values`]: keyframe tracks and the interpolation engine
//! - [`manager`]: the Playback Manager and its write-back callbacks
//! - [`loader`]: document-level helpers that wire everything together

pub mod binding;
pub mod diagnostics;
pub mod document;
pub mod loader;
pub mod manager;
pub mod policy;
pub mod resolve;
pub mod settings;
pub mod tracks;
pub mod unit;
pub mod values;

pub use binding::{AnimationTarget, NodeId, TargetPath, TransformTarget};
pub use diagnostics::{AccessorSide, SkipDiagnostic, SkipReason};
pub use document::{
    AnimationDescription, Asset, ChannelDescription, ChannelTarget, Document, NodeDescription,
    SamplerDescription,
};
pub use loader::{create_animation_manager, create_transform_manager};
pub use manager::{AnimationHandle, AnimationManager, WriteBack};
pub use policy::PlaybackPolicy;
pub use resolve::{
    AccessorLookup, AnimationResolution, ChannelResolver, DIRECT_REFERENCE_VERSION,
    parse_interpolation, resolve_document,
};
pub use settings::PlaybackSettings;
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use unit::{AnimationUnit, TrackData, TrackValue};
pub use values::{Components, Interpolatable, slerp};
