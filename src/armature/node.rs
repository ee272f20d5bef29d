use glam::{Affine3A, Quat, Vec3};

use crate::animation::AnimatableProperty;

/// One `(track, time, weight)` contribution to a blended evaluation.
#[derive(Debug, Clone, Copy)]
pub struct BlendInput {
    pub track: usize,
    pub time: f32,
    pub weight: f32,
}

/// How a node derives its local transform.
///
/// Modeled as a sum type dispatched by tag: a node either carries one
/// fixed matrix, or three animatable scale/rotation/translation curves.
#[derive(Debug, Clone)]
pub enum LocalTransform {
    Fixed(Affine3A),
    Animated {
        scale: AnimatableProperty<Vec3>,
        rotation: AnimatableProperty<Quat>,
        translation: AnimatableProperty<Vec3>,
    },
}

impl LocalTransform {
    /// An animated transform with identity defaults and no curves bound.
    #[must_use]
    pub fn animated() -> Self {
        Self::Animated {
            scale: AnimatableProperty::new(Vec3::ONE),
            rotation: AnimatableProperty::new(Quat::IDENTITY),
            translation: AnimatableProperty::new(Vec3::ZERO),
        }
    }
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self::Fixed(Affine3A::IDENTITY)
    }
}

/// One node in a skeletal hierarchy.
///
/// # Hierarchy invariant
///
/// Nodes live in a topologically ordered array: `parent < index` and
/// every child index is `> index`. [`ArmatureTemplate::new`] enforces
/// this at build time so instances can evaluate world matrices in one
/// forward pass, without recursion or revisits.
///
/// Built once at load time from importer output; never mutated
/// afterwards.
///
/// [`ArmatureTemplate::new`]: crate::armature::ArmatureTemplate::new
#[derive(Debug, Clone)]
pub struct NodeTemplate {
    /// Position in the hierarchy array.
    pub index: usize,
    /// Parent position; `None` for roots.
    pub parent: Option<usize>,
    /// Child positions, each strictly greater than `index`.
    pub children: Vec<usize>,
    pub name: String,
    pub transform: LocalTransform,
}

impl NodeTemplate {
    #[must_use]
    pub fn new(index: usize, parent: Option<usize>, name: impl Into<String>) -> Self {
        Self {
            index,
            parent,
            children: Vec::new(),
            name: name.into(),
            transform: LocalTransform::default(),
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: LocalTransform) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<usize>) -> Self {
        self.children = children;
        self
    }

    /// Whether the node samples animation curves rather than a fixed
    /// matrix.
    #[must_use]
    pub fn is_animated(&self) -> bool {
        matches!(self.transform, LocalTransform::Animated { .. })
    }

    /// Local transform for a single `(track, time)` pair.
    ///
    /// Unbound tracks evaluate to the curve defaults, so this is total
    /// for any track index and time.
    #[must_use]
    pub fn local_transform(&self, track: usize, time: f32) -> Affine3A {
        match &self.transform {
            LocalTransform::Fixed(matrix) => *matrix,
            LocalTransform::Animated {
                scale,
                rotation,
                translation,
            } => Affine3A::from_scale_rotation_translation(
                scale.value_at(track, time),
                rotation.value_at(track, time),
                translation.value_at(track, time),
            ),
        }
    }

    /// Local transform blending several tracks by weight.
    ///
    /// Each contributing layer is decomposed into scale / rotation /
    /// translation; scale and translation combine by weighted linear
    /// blend, rotation by an incremental normalized slerp. Weights are
    /// normalized by their sum.
    ///
    /// Fallback policy: a zero (or negative) total weight evaluates the
    /// highest-weight layer unblended; an empty layer list yields the
    /// curve defaults. Fixed-transform nodes ignore the layers entirely.
    /// Evaluation never fails mid-frame.
    #[must_use]
    pub fn local_transform_blended(&self, layers: &[BlendInput]) -> Affine3A {
        let LocalTransform::Animated {
            scale,
            rotation,
            translation,
        } = &self.transform
        else {
            return self.local_transform(0, 0.0);
        };

        let total: f32 = layers.iter().map(|l| l.weight.max(0.0)).sum();

        if total <= f32::EPSILON {
            log::warn!(
                "Blend over node '{}' has zero total weight; using highest-weight layer",
                self.name
            );
            let best = layers.iter().max_by(|a, b| {
                a.weight
                    .partial_cmp(&b.weight)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            return match best {
                Some(layer) => self.local_transform(layer.track, layer.time),
                None => Affine3A::from_scale_rotation_translation(
                    scale.default_value(),
                    rotation.default_value(),
                    translation.default_value(),
                ),
            };
        }

        let mut blended_scale = Vec3::ZERO;
        let mut blended_translation = Vec3::ZERO;
        let mut blended_rotation = Quat::IDENTITY;
        let mut accumulated = 0.0;

        for layer in layers {
            let weight = layer.weight.max(0.0) / total;
            if weight <= 0.0 {
                continue;
            }

            blended_scale += scale.value_at(layer.track, layer.time) * weight;
            blended_translation += translation.value_at(layer.track, layer.time) * weight;

            let q = rotation.value_at(layer.track, layer.time);
            if accumulated <= 0.0 {
                blended_rotation = q;
            } else {
                // Incremental spherical blend: each layer is folded in
                // with its share of the weight accumulated so far.
                blended_rotation = blended_rotation.slerp(q, weight / (accumulated + weight));
            }
            accumulated += weight;
        }

        Affine3A::from_scale_rotation_translation(
            blended_scale,
            blended_rotation,
            blended_translation,
        )
    }
}
