use std::sync::Arc;

use glam::{Affine3A, Mat4, Vec3};

use crate::armature::{ArmatureInstance, BlendInput};
use crate::mesh::BoundingSphere;
use crate::model::template::{DrawableKind, ModelTemplate};

/// Per-use live state of one model.
///
/// References the shared template (no mesh data is duplicated, so
/// creation is cheap) and owns an armature pose, a world transform, and
/// one skin matrix palette per skinned drawable. Instances are destroyed
/// independently of their template and share no mutable state with each
/// other.
#[derive(Debug, Clone)]
pub struct ModelInstance {
    template: Arc<ModelTemplate>,
    pub armature: ArmatureInstance,
    pub world_transform: Affine3A,
    pub visible: bool,
    skin_palettes: Vec<Vec<Mat4>>,
}

impl ModelInstance {
    /// Creates an instance posed at rest (track 0, time 0) so world
    /// matrices and skin palettes are valid before any animation runs.
    #[must_use]
    pub fn new(template: Arc<ModelTemplate>) -> Self {
        let armature = ArmatureInstance::new(Arc::clone(template.armature()));

        let skin_palettes = template
            .drawables()
            .iter()
            .map(|drawable| match &drawable.kind {
                DrawableKind::Skinned { joints, .. } => vec![Mat4::IDENTITY; joints.len()],
                DrawableKind::Rigid { .. } => Vec::new(),
            })
            .collect();

        let mut instance = Self {
            template,
            armature,
            world_transform: Affine3A::IDENTITY,
            visible: true,
            skin_palettes,
        };
        instance.animate(0, 0.0);
        instance
    }

    #[inline]
    #[must_use]
    pub fn template(&self) -> &Arc<ModelTemplate> {
        &self.template
    }

    /// Evaluates the armature at one `(track, time)` pair and refreshes
    /// every skin palette from the new pose.
    pub fn animate(&mut self, track: usize, time: f32) {
        self.armature.evaluate(track, time);
        self.update_skin_palettes();
    }

    /// Evaluates the armature from several weighted tracks and refreshes
    /// every skin palette from the new pose.
    pub fn animate_blended(&mut self, layers: &[BlendInput]) {
        self.armature.evaluate_blended(layers);
        self.update_skin_palettes();
    }

    /// Derives per-joint skin matrices from the current pose:
    /// `skin[j] = jointWorld[j] * inverseBind[j]`.
    fn update_skin_palettes(&mut self) {
        for (index, drawable) in self.template.drawables().iter().enumerate() {
            let DrawableKind::Skinned { joints, .. } = &drawable.kind else {
                continue;
            };

            let palette = &mut self.skin_palettes[index];
            for (slot, joint) in joints.iter().enumerate() {
                let joint_world = Mat4::from(self.armature.world_matrix(joint.node));
                palette[slot] = joint_world * joint.inverse_bind;
            }
        }
    }

    /// Skin matrix palette of a skinned drawable; `None` for rigid
    /// drawables or out-of-range indices.
    #[must_use]
    pub fn skin_palette(&self, drawable: usize) -> Option<&[Mat4]> {
        let template = self.template.drawables().get(drawable)?;
        match template.kind {
            DrawableKind::Skinned { .. } => Some(&self.skin_palettes[drawable]),
            DrawableKind::Rigid { .. } => None,
        }
    }

    /// World matrix the backend draws this drawable with. Rigid
    /// drawables follow their node; skinned drawables carry their
    /// deformation in the palette, so only the instance transform
    /// applies.
    #[must_use]
    pub fn drawable_world_matrix(&self, drawable: usize) -> Affine3A {
        match self.template.drawables().get(drawable).map(|d| &d.kind) {
            Some(DrawableKind::Rigid { node }) => {
                self.world_transform * self.armature.world_matrix(*node)
            }
            _ => self.world_transform,
        }
    }

    /// Instance origin in world space, used for depth ordering.
    #[inline]
    #[must_use]
    pub fn world_origin(&self) -> Vec3 {
        self.world_transform.translation.into()
    }

    /// The template's rest-pose sphere carried through the instance
    /// transform.
    #[must_use]
    pub fn world_bounds(&self) -> BoundingSphere {
        self.template.bounds().transform(&self.world_transform)
    }
}
