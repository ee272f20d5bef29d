use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    Step,
    CubicSpline,
}

/// A sampled keyframe curve over one animatable channel.
///
/// `times` is strictly increasing. For `CubicSpline`, `values` holds
/// `(in_tangent, value, out_tangent)` triplets per keyframe, so its
/// length is `times.len() * 3`.
///
/// Sampling is total for any real `time`: outside the keyframe range the
/// curve clamps to its first/last value, so evaluation is safe far
/// beyond the animation's own domain.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// Whether the track carries no keyframes at all.
    ///
    /// Empty tracks are inert; the owning property substitutes its
    /// default value instead of sampling them.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty() || self.values.is_empty()
    }

    /// Time of the last keyframe, or 0 for an empty track.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Samples the curve at `time`.
    ///
    /// Returns `None` only for an empty track; any real `time` is valid.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        // partition_point finds the first index where t > time, i.e. next_index
        let next_idx = self.times.partition_point(|&t| t <= time);
        let frame = next_idx.saturating_sub(1);

        Some(self.sample_at_frame(frame, time))
    }

    /// Unified value accessor: for CubicSpline the value sits at
    /// `index * 3 + 1`, between its in/out tangents.
    fn value_at_frame(&self, index: usize) -> T {
        match self.interpolation {
            InterpolationMode::CubicSpline => self.values[index * 3 + 1],
            _ => self.values[index],
        }
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> T {
        let len = self.times.len();

        // Boundary case: no next frame available, clamp to the end
        if index >= len - 1 {
            return self.value_at_frame(len - 1);
        }

        let next_idx = index + 1;
        let t0 = self.times[index];
        let t1 = self.times[next_idx];
        let dt = t1 - t0;

        // Guard against zero-length intervals
        let t = if dt > 1e-6 { (time - t0) / dt } else { 0.0 };
        let t = t.clamp(0.0, 1.0);

        match self.interpolation {
            InterpolationMode::Step => self.value_at_frame(index),
            InterpolationMode::Linear => {
                let v0 = self.value_at_frame(index);
                let v1 = self.value_at_frame(next_idx);
                T::interpolate_linear(v0, v1, t)
            }
            InterpolationMode::CubicSpline => {
                let i_prev = index * 3;
                let i_next = next_idx * 3;

                let v0 = self.values[i_prev + 1];
                let out_tangent0 = self.values[i_prev + 2];
                let in_tangent1 = self.values[i_next];
                let v1 = self.values[i_next + 1];

                T::interpolate_cubic(v0, out_tangent0, in_tangent1, v1, t, dt)
            }
        }
    }
}
