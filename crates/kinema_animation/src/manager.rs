//! Playback Manager
//!
//! Owns resolved [`AnimationUnit`]s together with their write-back callbacks,
//! advances one shared clock and dispatches sampled values every tick.
//!
//! ```rust,ignore
//! let mut manager = AnimationManager::new(PlaybackSettings::default());
//! let handle = manager.add_animation(unit, Box::new(|elapsed, values| {
//!     println!("{elapsed}: {values:?}");
//! }));
//! manager.tick(1.0 / 60.0);
//! ```
//!
//! The clock is kept in `f64` and only narrowed after each unit has mapped it
//! into its own key range, so long sessions keep sub-frame resolution.
//!
//! Animations are applied in registration order, so when several animations
//! write the same node property the last registered one wins. The manager is
//! single-writer: `tick` takes `&mut self`, so registrations can never
//! interleave with a tick in progress.

use std::fmt;

use slotmap::{SlotMap, new_key_type};

use crate::policy::PlaybackPolicy;
use crate::settings::PlaybackSettings;
use crate::tracks::KeyframeCursor;
use crate::unit::AnimationUnit;

new_key_type! {
    /// Handle of a registered animation.
    pub struct AnimationHandle;
}

/// Callback receiving `(elapsed_seconds, sampled_components)`.
pub type WriteBack = Box<dyn FnMut(f32, &[f32]) + Send>;

struct ManagedAnimation {
    unit: AnimationUnit,
    write_back: WriteBack,
    cursor: KeyframeCursor,
}

pub struct AnimationManager {
    settings: PlaybackSettings,
    time: f64,
    /// Smallest first key time of all registered units, at most zero
    start: f32,
    /// Largest last key time of all registered units
    duration: f32,
    animations: SlotMap<AnimationHandle, ManagedAnimation>,
    order: Vec<AnimationHandle>,
}

impl Default for AnimationManager {
    fn default() -> Self {
        Self::new(PlaybackSettings::default())
    }
}

impl AnimationManager {
    #[must_use]
    pub fn new(settings: PlaybackSettings) -> Self {
        Self {
            settings,
            time: 0.0,
            start: 0.0,
            duration: 0.0,
            animations: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> PlaybackSettings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: PlaybackSettings) {
        self.settings = settings;
        self.time = self.constrain(self.time);
    }

    /// Current clock time in seconds.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether a [`PlaybackPolicy::Once`] clock has reached its end.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        if self.settings.policy != PlaybackPolicy::Once || self.is_empty() {
            return false;
        }
        if self.settings.time_scale < 0.0 {
            self.time <= f64::from(self.start)
        } else {
            self.time >= f64::from(self.duration)
        }
    }

    /// Registers an animation after all existing ones.
    pub fn add_animation(&mut self, unit: AnimationUnit, write_back: WriteBack) -> AnimationHandle {
        self.start = self.start.min(unit.start_time());
        self.duration = self.duration.max(unit.end_time());
        log::trace!(
            "Registered {} animation for node {} (animation {})",
            unit.target().path().as_str(),
            unit.target().node(),
            unit.animation_id
        );

        let handle = self.animations.insert(ManagedAnimation {
            unit,
            write_back,
            cursor: KeyframeCursor::default(),
        });
        self.order.push(handle);
        handle
    }

    /// Registers several animations, preserving their order.
    pub fn add_animations<I>(&mut self, animations: I) -> Vec<AnimationHandle>
    where
        I: IntoIterator<Item = (AnimationUnit, WriteBack)>,
    {
        animations
            .into_iter()
            .map(|(unit, write_back)| self.add_animation(unit, write_back))
            .collect()
    }

    /// Unregisters an animation and hands its unit back.
    pub fn remove(&mut self, handle: AnimationHandle) -> Option<AnimationUnit> {
        let managed = self.animations.remove(handle)?;
        self.order.retain(|&h| h != handle);
        let units = self.animations.values().map(|m| &m.unit);
        self.start = units.clone().map(AnimationUnit::start_time).fold(0.0, f32::min);
        self.duration = units.map(AnimationUnit::end_time).fold(0.0, f32::max);
        self.time = self.constrain(self.time);
        log::trace!("Removed animation {}", managed.unit.animation_id);
        Some(managed.unit)
    }

    #[must_use]
    pub fn get(&self, handle: AnimationHandle) -> Option<&AnimationUnit> {
        self.animations.get(handle).map(|m| &m.unit)
    }

    #[must_use]
    pub fn contains(&self, handle: AnimationHandle) -> bool {
        self.animations.contains_key(handle)
    }

    /// Handles in registration order.
    pub fn handles(&self) -> impl Iterator<Item = AnimationHandle> + '_ {
        self.order.iter().copied()
    }

    /// Rewinds the clock to zero without dispatching.
    pub fn reset(&mut self) {
        self.time = 0.0;
        for managed in self.animations.values_mut() {
            managed.cursor = KeyframeCursor::default();
        }
    }

    /// Moves the clock without dispatching.
    pub fn set_time(&mut self, time: f64) {
        if time.is_finite() {
            self.time = self.constrain(time);
        } else {
            log::warn!("Ignoring non-finite playback time {time}");
        }
    }

    /// Advances the clock by `delta * time_scale` seconds, then samples every
    /// animation and dispatches the values.
    pub fn tick(&mut self, delta: f32) {
        let delta = if delta.is_finite() {
            delta
        } else {
            log::warn!("Ignoring non-finite tick delta {delta}");
            0.0
        };
        let step = f64::from(delta) * f64::from(self.settings.time_scale);
        self.time = self.constrain(self.time + step);
        self.apply();
    }

    /// Samples every animation at the current clock time and dispatches the
    /// values, in registration order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply(&mut self) {
        let time = self.time;
        let elapsed = time as f32;
        let policy = self.settings.policy;
        for &handle in &self.order {
            let Some(managed) = self.animations.get_mut(handle) else {
                continue;
            };
            let value = managed
                .unit
                .sample_with_cursor(time, policy, &mut managed.cursor);
            (managed.write_back)(elapsed, &value.to_components());
        }
    }

    fn constrain(&self, time: f64) -> f64 {
        match self.settings.policy {
            PlaybackPolicy::Once => time
                .max(f64::from(self.start))
                .min(f64::from(self.duration)),
            PlaybackPolicy::Loop | PlaybackPolicy::ClampToLast => time,
        }
    }
}

impl fmt::Debug for AnimationManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationManager")
            .field("settings", &self.settings)
            .field("time", &self.time)
            .field("start", &self.start)
            .field("duration", &self.duration)
            .field("animations", &self.order.len())
            .finish()
    }
}
