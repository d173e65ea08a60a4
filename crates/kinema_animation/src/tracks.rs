use crate::values::Interpolatable;

/// How values between two keyframes are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterpolationMode {
    /// Hold the left keyframe until the next key time.
    Step,
    /// Componentwise linear blend.
    Linear,
    /// Shortest-arc spherical blend, for rotations.
    SphericalLinear,
}

/// Remembers the last bracketing interval so sequential playback avoids the
/// binary search.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyframeCursor {
    /// Partition point of the previous lookup: index of the first key time
    /// greater than the sampled time.
    next_index: usize,
}

/// Key times paired with one value each.
///
/// Key times are strictly increasing and there is at least one key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack<T: Interpolatable> {
    times: Vec<f32>,
    values: Vec<T>,
    interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// # Panics
    ///
    /// Panics if `times` is empty or if `times` and `values` differ in length.
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        assert!(!times.is_empty(), "Track has no keyframes");
        assert_eq!(
            times.len(),
            values.len(),
            "Track has {} key times but {} values",
            times.len(),
            values.len()
        );
        debug_assert!(
            times.windows(2).all(|w| w[0] < w[1]),
            "Key times must be strictly increasing"
        );

        Self {
            times,
            values,
            interpolation,
        }
    }

    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    #[must_use]
    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; tracks hold at least one key.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn start_time(&self) -> f32 {
        self.times[0]
    }

    #[inline]
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times[self.times.len() - 1]
    }

    /// Samples the track at `time`.
    ///
    /// Times before the first key return the first value, times after the
    /// last key return the last value, and a time equal to a key returns that
    /// key's value without blending.
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        let next_idx = self.times.partition_point(|&t| t <= time);
        self.sample_at(next_idx, time)
    }

    /// Same result as [`KeyframeTrack::sample`], reusing the interval found by
    /// the previous call when playback moves forward by less than one key.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> T {
        let hint = cursor.next_index;
        let next_idx = if self.is_partition(hint, time) {
            hint
        } else if self.is_partition(hint.saturating_add(1), time) {
            hint.saturating_add(1)
        } else {
            self.times.partition_point(|&t| t <= time)
        };

        cursor.next_index = next_idx;
        self.sample_at(next_idx, time)
    }

    /// Whether every key before `index` is `<= time` and the key at `index`
    /// (if any) is `> time`.
    fn is_partition(&self, index: usize, time: f32) -> bool {
        let len = self.times.len();
        if index > len {
            return false;
        }
        let left_ok = index == 0 || self.times[index - 1] <= time;
        let right_ok = index == len || time < self.times[index];
        left_ok && right_ok
    }

    fn sample_at(&self, next_idx: usize, time: f32) -> T {
        let len = self.times.len();

        // Before the first key, or a single-key track
        if next_idx == 0 || len == 1 {
            return self.values[0];
        }

        let index = next_idx - 1;
        if index >= len - 1 {
            return self.values[len - 1];
        }

        let t0 = self.times[index];
        let t1 = self.times[index + 1];
        if time == t0 || t1 <= t0 {
            return self.values[index];
        }

        let f = ((time - t0) / (t1 - t0)).clamp(0.0, 1.0);
        let v0 = self.values[index];
        let v1 = self.values[index + 1];

        match self.interpolation {
            InterpolationMode::Step => v0,
            InterpolationMode::Linear => T::interpolate_linear(v0, v1, f),
            InterpolationMode::SphericalLinear => T::interpolate_spherical(v0, v1, f),
        }
    }
}
