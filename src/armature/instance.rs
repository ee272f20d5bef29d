use std::sync::Arc;

use glam::Affine3A;

use crate::armature::node::BlendInput;
use crate::armature::template::ArmatureTemplate;

/// Live pose state for one armature.
///
/// Owns one world matrix per template node, recomputed on every
/// evaluation call in a single forward pass. Instances are fully
/// independent: no shared mutable state, so one template can drive any
/// number of instances (and hosts may evaluate different instances on
/// different threads).
///
/// Results are cached until the next evaluation call; callers must not
/// assume coherence across frames without re-invoking evaluation.
#[derive(Debug, Clone)]
pub struct ArmatureInstance {
    template: Arc<ArmatureTemplate>,
    world: Vec<Affine3A>,
}

impl ArmatureInstance {
    #[must_use]
    pub fn new(template: Arc<ArmatureTemplate>) -> Self {
        let count = template.node_count();
        Self {
            template,
            world: vec![Affine3A::IDENTITY; count],
        }
    }

    #[inline]
    #[must_use]
    pub fn template(&self) -> &Arc<ArmatureTemplate> {
        &self.template
    }

    /// Recomputes all world matrices for one `(track, time)` pair.
    ///
    /// The node array is topologically ordered (parents strictly precede
    /// children), so a parent's world matrix is always finished before
    /// any of its children is processed.
    pub fn evaluate(&mut self, track: usize, time: f32) {
        for (i, node) in self.template.nodes().iter().enumerate() {
            let local = node.local_transform(track, time);
            self.world[i] = match node.parent {
                Some(parent) => self.world[parent] * local,
                None => local,
            };
        }
    }

    /// Recomputes all world matrices from several weighted tracks.
    ///
    /// See [`NodeTemplate::local_transform_blended`] for the blend and
    /// zero-weight fallback semantics.
    ///
    /// [`NodeTemplate::local_transform_blended`]: crate::armature::NodeTemplate::local_transform_blended
    pub fn evaluate_blended(&mut self, layers: &[BlendInput]) {
        for (i, node) in self.template.nodes().iter().enumerate() {
            let local = node.local_transform_blended(layers);
            self.world[i] = match node.parent {
                Some(parent) => self.world[parent] * local,
                None => local,
            };
        }
    }

    /// World matrix of `node` from the most recent evaluation.
    ///
    /// Out-of-range nodes read as identity rather than failing.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self, node: usize) -> Affine3A {
        self.world.get(node).copied().unwrap_or(Affine3A::IDENTITY)
    }

    #[inline]
    #[must_use]
    pub fn world_matrices(&self) -> &[Affine3A] {
        &self.world
    }
}
