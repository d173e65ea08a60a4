use glam::{Quat, Vec3};

use crate::binding::AnimationTarget;
use crate::policy::PlaybackPolicy;
use crate::tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
use crate::values::{Components, Interpolatable};

/// Keyframe data of a unit, typed by the target property's arity.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackData {
    /// Translation or scale
    Vector3(KeyframeTrack<Vec3>),
    /// Rotation as `[x, y, z, w]`
    Quaternion(KeyframeTrack<Quat>),
}

impl TrackData {
    #[must_use]
    pub fn times(&self) -> &[f32] {
        match self {
            Self::Vector3(track) => track.times(),
            Self::Quaternion(track) => track.times(),
        }
    }

    #[must_use]
    pub fn interpolation(&self) -> InterpolationMode {
        match self {
            Self::Vector3(track) => track.interpolation(),
            Self::Quaternion(track) => track.interpolation(),
        }
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Vector3(_) => Vec3::ARITY,
            Self::Quaternion(_) => Quat::ARITY,
        }
    }

    #[must_use]
    pub fn sample(&self, time: f32) -> TrackValue {
        match self {
            Self::Vector3(track) => TrackValue::Vector3(track.sample(time)),
            Self::Quaternion(track) => TrackValue::Quaternion(track.sample(time)),
        }
    }

    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> TrackValue {
        match self {
            Self::Vector3(track) => TrackValue::Vector3(track.sample_with_cursor(time, cursor)),
            Self::Quaternion(track) => {
                TrackValue::Quaternion(track.sample_with_cursor(time, cursor))
            }
        }
    }
}

/// One sampled value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackValue {
    Vector3(Vec3),
    Quaternion(Quat),
}

impl TrackValue {
    #[must_use]
    pub fn to_components(self) -> Components {
        match self {
            Self::Vector3(v) => v.to_components(),
            Self::Quaternion(q) => q.to_components(),
        }
    }
}

/// A fully resolved, validated animation channel.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationUnit {
    /// Id of the animation the channel came from
    pub animation_id: String,
    target: AnimationTarget,
    track: TrackData,
}

impl AnimationUnit {
    /// # Panics
    ///
    /// Panics if the track's value arity does not match the target property.
    #[must_use]
    pub fn new(animation_id: impl Into<String>, target: AnimationTarget, track: TrackData) -> Self {
        assert_eq!(
            target.arity(),
            track.arity(),
            "{} target needs {}-component values",
            target.path().as_str(),
            target.arity()
        );
        Self {
            animation_id: animation_id.into(),
            target,
            track,
        }
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> &AnimationTarget {
        &self.target
    }

    #[inline]
    #[must_use]
    pub fn track(&self) -> &TrackData {
        &self.track
    }

    #[inline]
    #[must_use]
    pub fn key_times(&self) -> &[f32] {
        self.track.times()
    }

    #[inline]
    #[must_use]
    pub fn interpolation(&self) -> InterpolationMode {
        self.track.interpolation()
    }

    #[must_use]
    pub fn start_time(&self) -> f32 {
        self.key_times()[0]
    }

    #[must_use]
    pub fn end_time(&self) -> f32 {
        let times = self.key_times();
        times[times.len() - 1]
    }

    /// Samples the unit at `time` after mapping it into the key range with
    /// `policy`.
    #[must_use]
    pub fn sample(&self, time: f32, policy: PlaybackPolicy) -> TrackValue {
        let local = policy.map_time(time, self.start_time(), self.end_time());
        self.track.sample(local)
    }

    /// Samples the unit at a manager clock time, reusing `cursor` between
    /// calls.
    pub fn sample_with_cursor(
        &self,
        clock: f64,
        policy: PlaybackPolicy,
        cursor: &mut KeyframeCursor,
    ) -> TrackValue {
        let local = policy.map_clock(clock, self.start_time(), self.end_time());
        self.track.sample_with_cursor(local, cursor)
    }
}
