//! Channel Resolver
//!
//! Turns the channels of an [`AnimationDescription`] into validated
//! [`AnimationUnit`]s. Every channel is resolved independently; a channel
//! that fails any check is dropped with a [`SkipDiagnostic`] and never
//! produces a partial unit.
//!
//! Documents older than [`DIRECT_REFERENCE_VERSION`] reach accessors through
//! the animation's `parameters` map; newer documents reference accessors
//! directly from the sampler. The choice is made once per animation as an
//! [`AccessorLookup`] and shared by the input and output side.

use glam::{Quat, Vec3};
use kinema_core::{AccessorDescriptor, BufferStore, SchemaVersion, TypedView};
use rustc_hash::FxHashMap;

use crate::binding::TargetPath;
use crate::diagnostics::{AccessorSide, SkipDiagnostic, SkipReason};
use crate::document::{AnimationDescription, ChannelDescription, Document};
use crate::tracks::{InterpolationMode, KeyframeTrack};
use crate::unit::{AnimationUnit, TrackData};

/// First schema version whose samplers reference accessors directly.
pub const DIRECT_REFERENCE_VERSION: &str = "1.1.0";

/// How sampler input/output references map to accessor ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorLookup<'a> {
    /// References are names in the animation's parameter map.
    Parameters(Option<&'a FxHashMap<String, String>>),
    /// References are accessor ids.
    Direct,
}

impl<'a> AccessorLookup<'a> {
    #[must_use]
    pub fn for_animation(animation: &'a AnimationDescription, version: &SchemaVersion) -> Self {
        if *version >= SchemaVersion::parse(DIRECT_REFERENCE_VERSION) {
            Self::Direct
        } else {
            Self::Parameters(animation.parameters.as_ref())
        }
    }

    /// Maps a sampler reference to an accessor id.
    pub fn accessor_id<'r>(
        &self,
        reference: &'r str,
        side: AccessorSide,
    ) -> Result<&'r str, SkipReason>
    where
        'a: 'r,
    {
        match self {
            Self::Direct => Ok(reference),
            Self::Parameters(parameters) => parameters
                .and_then(|map| map.get(reference))
                .map(String::as_str)
                .ok_or_else(|| SkipReason::UnknownParameter {
                    side,
                    parameter: reference.to_string(),
                }),
        }
    }
}

/// Parses a sampler interpolation literal. An absent literal means linear.
pub fn parse_interpolation(interpolation: Option<&str>) -> Result<InterpolationMode, SkipReason> {
    match interpolation {
        None => Ok(InterpolationMode::Linear),
        Some(s) if s.eq_ignore_ascii_case("linear") => Ok(InterpolationMode::Linear),
        Some(s) if s.eq_ignore_ascii_case("step") => Ok(InterpolationMode::Step),
        Some(other) => Err(SkipReason::UnsupportedInterpolation {
            interpolation: other.to_string(),
        }),
    }
}

/// Units and skipped channels of one resolution pass.
#[derive(Debug, Default)]
pub struct AnimationResolution {
    pub units: Vec<AnimationUnit>,
    pub skipped: Vec<SkipDiagnostic>,
}

impl AnimationResolution {
    pub fn extend(&mut self, other: AnimationResolution) {
        self.units.extend(other.units);
        self.skipped.extend(other.skipped);
    }
}

/// Resolves channels against one document and its buffers.
#[derive(Debug, Clone, Copy)]
pub struct ChannelResolver<'a> {
    document: &'a Document,
    buffers: &'a BufferStore,
}

impl<'a> ChannelResolver<'a> {
    #[must_use]
    pub fn new(document: &'a Document, buffers: &'a BufferStore) -> Self {
        Self { document, buffers }
    }

    /// Resolves every channel of `animation`, in channel order.
    #[must_use]
    pub fn resolve(
        &self,
        animation_id: &str,
        animation: &AnimationDescription,
        version: &SchemaVersion,
    ) -> AnimationResolution {
        let lookup = AccessorLookup::for_animation(animation, version);
        let mut resolution = AnimationResolution::default();

        for (channel_index, channel) in animation.channels.iter().enumerate() {
            match self.resolve_channel(animation_id, animation, channel, lookup) {
                Ok(unit) => resolution.units.push(unit),
                Err(reason) => resolution.skipped.push(SkipDiagnostic {
                    animation_id: animation_id.to_string(),
                    channel_index,
                    sampler_id: channel.sampler.clone(),
                    reason,
                }),
            }
        }

        resolution
    }

    /// Resolves a single channel.
    pub fn resolve_channel(
        &self,
        animation_id: &str,
        animation: &AnimationDescription,
        channel: &ChannelDescription,
        lookup: AccessorLookup<'_>,
    ) -> Result<AnimationUnit, SkipReason> {
        let sampler = animation
            .samplers
            .get(&channel.sampler)
            .ok_or_else(|| SkipReason::UnknownSampler {
                sampler: channel.sampler.clone(),
            })?;
        let kind = parse_interpolation(sampler.interpolation.as_deref())?;

        let input_id = lookup.accessor_id(&sampler.input, AccessorSide::Input)?;
        let output_id = lookup.accessor_id(&sampler.output, AccessorSide::Output)?;
        let input = self.float_accessor(input_id, AccessorSide::Input)?;
        let output = self.float_accessor(output_id, AccessorSide::Output)?;

        let keys = self.key_times(input_id, input)?;

        let path = TargetPath::parse(&channel.target.path).ok_or_else(|| {
            SkipReason::UnsupportedTargetPath {
                path: channel.target.path.clone(),
            }
        })?;
        let mode = match (kind, path) {
            (InterpolationMode::Linear, TargetPath::Rotation) => InterpolationMode::SphericalLinear,
            (kind, _) => kind,
        };

        let output_view = self.view(output_id, output, AccessorSide::Output)?;
        let arity_mismatch = || SkipReason::ArityMismatch {
            side: AccessorSide::Output,
            accessor: output_id.to_string(),
            expected: path.arity(),
            actual: output_view.components_per_element(),
        };
        let key_count = keys.len();
        let count_mismatch = move |values: usize| SkipReason::CountMismatch {
            keys: key_count,
            values,
        };

        let track = match path {
            TargetPath::Rotation => {
                let values: Vec<Quat> = output_view
                    .elements::<4>()
                    .ok_or_else(arity_mismatch)?
                    .map(Quat::from_array)
                    .collect();
                if values.len() != key_count {
                    return Err(count_mismatch(values.len()));
                }
                TrackData::Quaternion(KeyframeTrack::new(keys, values, mode))
            }
            TargetPath::Translation | TargetPath::Scale => {
                let values: Vec<Vec3> = output_view
                    .elements::<3>()
                    .ok_or_else(arity_mismatch)?
                    .map(Vec3::from_array)
                    .collect();
                if values.len() != key_count {
                    return Err(count_mismatch(values.len()));
                }
                TrackData::Vector3(KeyframeTrack::new(keys, values, mode))
            }
        };

        let node = &channel.target.id;
        if !self.document.nodes.contains_key(node) {
            return Err(SkipReason::UnknownTargetNode { node: node.clone() });
        }

        Ok(AnimationUnit::new(animation_id, path.target(node.as_str()), track))
    }

    fn float_accessor(
        &self,
        id: &str,
        side: AccessorSide,
    ) -> Result<&'a AccessorDescriptor, SkipReason> {
        let accessor =
            self.document
                .accessors
                .get(id)
                .ok_or_else(|| SkipReason::UnknownAccessor {
                    side,
                    accessor: id.to_string(),
                })?;
        if !accessor.has_float_components() {
            return Err(SkipReason::NonFloatAccessor {
                side,
                accessor: id.to_string(),
                component_type: accessor.component_type,
            });
        }
        Ok(accessor)
    }

    fn view(
        &self,
        id: &str,
        accessor: &AccessorDescriptor,
        side: AccessorSide,
    ) -> Result<TypedView<'a>, SkipReason> {
        self.buffers
            .view(accessor, &self.document.buffer_views)
            .map_err(|source| SkipReason::InvalidAccessor {
                side,
                accessor: id.to_string(),
                source,
            })
    }

    /// Decodes and validates the key times of a sampler.
    fn key_times(&self, id: &str, accessor: &AccessorDescriptor) -> Result<Vec<f32>, SkipReason> {
        let view = self.view(id, accessor, AccessorSide::Input)?;
        let keys: Vec<f32> = view
            .elements::<1>()
            .ok_or_else(|| SkipReason::ArityMismatch {
                side: AccessorSide::Input,
                accessor: id.to_string(),
                expected: 1,
                actual: view.components_per_element(),
            })?
            .map(|[time]| time)
            .collect();

        if keys.is_empty() {
            return Err(SkipReason::EmptyKeys {
                accessor: id.to_string(),
            });
        }
        let invalid = keys
            .iter()
            .enumerate()
            .position(|(i, &time)| !time.is_finite() || (i > 0 && keys[i - 1] >= time));
        if let Some(index) = invalid {
            return Err(SkipReason::InvalidKeyTimes {
                accessor: id.to_string(),
                index,
            });
        }

        Ok(keys)
    }
}

/// Resolves every animation of `document`, in animation id order.
#[must_use]
pub fn resolve_document(document: &Document, buffers: &BufferStore) -> AnimationResolution {
    let version = document.version();
    let resolver = ChannelResolver::new(document, buffers);
    let mut resolution = AnimationResolution::default();
    for (animation_id, animation) in &document.animations {
        resolution.extend(resolver.resolve(animation_id, animation, &version));
    }
    resolution
}
