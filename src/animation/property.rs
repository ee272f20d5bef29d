use crate::animation::tracks::KeyframeTrack;
use crate::animation::values::Interpolatable;

/// A default value plus zero or more independently-indexed animation
/// curves.
///
/// Curves are held in a sparse option-typed array indexed by track
/// number; absent means "use the default", so evaluation never fails for
/// any track index or time. Curves are attached at construction time and
/// the property is read-only afterwards.
#[derive(Debug, Clone)]
pub struct AnimatableProperty<T: Interpolatable> {
    default: T,
    curves: Vec<Option<KeyframeTrack<T>>>,
}

impl<T: Interpolatable> AnimatableProperty<T> {
    #[must_use]
    pub fn new(default: T) -> Self {
        Self {
            default,
            curves: Vec::new(),
        }
    }

    /// The value returned whenever no curve is bound.
    #[inline]
    #[must_use]
    pub fn default_value(&self) -> T {
        self.default
    }

    /// Attaches a curve at `track_index`, growing the curve list
    /// sparsely (intermediate slots stay unbound). Re-binding an index
    /// replaces the previous curve.
    pub fn set_curve(&mut self, track_index: usize, curve: KeyframeTrack<T>) {
        if track_index >= self.curves.len() {
            self.curves.resize_with(track_index + 1, || None);
        }
        self.curves[track_index] = Some(curve);
    }

    /// Builder-style variant of [`Self::set_curve`].
    #[must_use]
    pub fn with_curve(mut self, track_index: usize, curve: KeyframeTrack<T>) -> Self {
        self.set_curve(track_index, curve);
        self
    }

    #[must_use]
    pub fn has_curve(&self, track_index: usize) -> bool {
        matches!(self.curves.get(track_index), Some(Some(_)))
    }

    /// Number of slots in the sparse curve list (bound or not).
    #[must_use]
    pub fn track_count(&self) -> usize {
        self.curves.len()
    }

    /// Whether at least one curve is bound.
    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.curves.iter().any(Option::is_some)
    }

    /// Evaluates the property at `(track_index, time)`.
    ///
    /// An absent or out-of-range track index, or an empty curve, yields
    /// the stored default — never an error.
    #[must_use]
    pub fn value_at(&self, track_index: usize, time: f32) -> T {
        match self.curves.get(track_index) {
            Some(Some(curve)) => curve.sample(time).unwrap_or(self.default),
            _ => self.default,
        }
    }
}
