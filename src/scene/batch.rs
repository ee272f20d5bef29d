use rustc_hash::FxHashSet;

use crate::mesh::{MaterialRef, PrimitiveRange};
use crate::model::BlendMode;
use crate::scene::environment::Environment;
use crate::scene::{ModelKey, Scene};

/// One draw the backend should issue: which instance, which drawable,
/// and the consolidated buffer range to bind.
#[derive(Debug, Clone, Copy)]
pub struct DrawCommand {
    pub model: ModelKey,
    pub drawable: usize,
    pub range: PrimitiveRange,
    /// Signed camera depth of the owning instance.
    pub depth: f32,
}

/// Camera-ordered draw submission for one frame.
///
/// Built fresh on every call — no state survives across frames. The
/// opaque list runs front-to-back, the translucent list back-to-front
/// over the same depth ordering, and `effects` holds the distinct
/// material handles of the visible set so shared parameter state is
/// pushed exactly once per effect before any draw.
#[derive(Debug, Clone, Default)]
pub struct SceneBatch {
    pub effects: Vec<MaterialRef>,
    pub opaque: Vec<DrawCommand>,
    pub translucent: Vec<DrawCommand>,
}

impl SceneBatch {
    /// Orders the scene's visible instances by signed camera depth and
    /// splits their drawables into the two passes.
    #[must_use]
    pub fn build(environment: &Environment, scene: &Scene) -> Self {
        let mut order: Vec<(ModelKey, f32)> = scene
            .models
            .iter()
            .filter(|(_, model)| model.visible)
            .map(|(key, model)| (key, environment.signed_depth(model.world_origin())))
            .collect();

        order.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        let mut batch = Self::default();
        let mut seen_effects = FxHashSet::default();

        // Front-to-back for the opaque pass.
        for &(key, depth) in &order {
            batch.push_commands(scene, key, depth, &mut seen_effects, false);
        }

        // Same ordering walked in reverse: back-to-front for
        // translucency correctness.
        for &(key, depth) in order.iter().rev() {
            batch.push_commands(scene, key, depth, &mut seen_effects, true);
        }

        batch
    }

    fn push_commands(
        &mut self,
        scene: &Scene,
        key: ModelKey,
        depth: f32,
        seen_effects: &mut FxHashSet<MaterialRef>,
        translucent: bool,
    ) {
        let Some(model) = scene.models.get(key) else {
            return;
        };
        let template = model.template();
        let meshes = template.meshes();

        for (drawable_index, drawable) in template.drawables().iter().enumerate() {
            let pass_matches = translucent == (drawable.blend == BlendMode::Translucent);
            if !pass_matches {
                continue;
            }

            let Some(entry) = meshes.mesh(drawable.mesh) else {
                continue;
            };

            for range in entry.primitives.iter().filter(|r| r.is_drawable()) {
                if seen_effects.insert(range.material) {
                    self.effects.push(range.material);
                }
                let commands = if translucent {
                    &mut self.translucent
                } else {
                    &mut self.opaque
                };
                commands.push(DrawCommand {
                    model: key,
                    drawable: drawable_index,
                    range: *range,
                    depth,
                });
            }
        }
    }
}
