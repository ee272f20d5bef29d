use std::sync::Arc;

use glam::Mat4;
use uuid::Uuid;

use crate::armature::{ArmatureInstance, ArmatureTemplate};
use crate::errors::{ManikinError, Result};
use crate::mesh::{BoundingSphere, ConsolidatedMeshes, transform_position};

/// Pass assignment for batching: opaque geometry draws front-to-back,
/// translucent geometry back-to-front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Opaque,
    Translucent,
}

/// One joint reference of a skinned drawable: the armature node driving
/// it plus the matrix converting mesh space into that joint's rest-pose
/// local space.
#[derive(Debug, Clone, Copy)]
pub struct SkinJoint {
    pub node: usize,
    pub inverse_bind: Mat4,
}

/// How a drawable attaches to its armature.
///
/// A tagged union rather than a type hierarchy: each variant carries
/// only the fields it needs and call sites dispatch on the tag.
#[derive(Debug, Clone)]
pub enum DrawableKind {
    /// The mesh follows exactly one node as a rigid body.
    Rigid { node: usize },
    /// The mesh deforms per-vertex from a weighted blend of joints; the
    /// morph node carries the drawable's morph-target weights.
    Skinned {
        morph_node: usize,
        joints: Vec<SkinJoint>,
    },
}

/// Binds a consolidated mesh index to an armature attachment. Immutable
/// after construction and shared by every instance of the parent
/// template.
#[derive(Debug, Clone)]
pub struct DrawableTemplate {
    pub mesh: usize,
    pub kind: DrawableKind,
    pub blend: BlendMode,
}

impl DrawableTemplate {
    #[must_use]
    pub fn rigid(mesh: usize, node: usize) -> Self {
        Self {
            mesh,
            kind: DrawableKind::Rigid { node },
            blend: BlendMode::Opaque,
        }
    }

    #[must_use]
    pub fn skinned(mesh: usize, morph_node: usize, joints: Vec<SkinJoint>) -> Self {
        Self {
            mesh,
            kind: DrawableKind::Skinned { morph_node, joints },
            blend: BlendMode::Opaque,
        }
    }

    #[must_use]
    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }
}

/// A renderable model shared across instances: an armature, an ordered
/// drawable list, the consolidated buffers they draw from, and a
/// rest-pose bounding sphere.
#[derive(Debug, Clone)]
pub struct ModelTemplate {
    pub id: Uuid,
    pub name: String,
    armature: Arc<ArmatureTemplate>,
    meshes: Arc<ConsolidatedMeshes>,
    drawables: Vec<DrawableTemplate>,
    bounds: BoundingSphere,
}

impl ModelTemplate {
    /// Builds a template, validating every node and joint reference
    /// against the armature, then runs the one-off bounds pass over the
    /// rest pose. Invalid references fail fast here so per-frame
    /// evaluation stays total.
    pub fn new(
        name: impl Into<String>,
        armature: Arc<ArmatureTemplate>,
        drawables: Vec<DrawableTemplate>,
        meshes: Arc<ConsolidatedMeshes>,
    ) -> Result<Self> {
        let node_count = armature.node_count();

        for (index, drawable) in drawables.iter().enumerate() {
            if meshes.mesh(drawable.mesh).is_none() {
                return Err(ManikinError::InvalidArgument(format!(
                    "drawable {index} references mesh {} of {}",
                    drawable.mesh,
                    meshes.meshes.len()
                )));
            }

            match &drawable.kind {
                DrawableKind::Rigid { node } => {
                    if *node >= node_count {
                        return Err(ManikinError::InvalidArgument(format!(
                            "drawable {index} attaches to node {node} of {node_count}"
                        )));
                    }
                }
                DrawableKind::Skinned { morph_node, joints } => {
                    if *morph_node >= node_count {
                        return Err(ManikinError::InvalidArgument(format!(
                            "drawable {index} reads morph weights from node {morph_node} of {node_count}"
                        )));
                    }
                    for (joint_index, joint) in joints.iter().enumerate() {
                        if joint.node >= node_count {
                            return Err(ManikinError::UnsupportedLayout(format!(
                                "drawable {index} joint {joint_index} references node {} of {node_count}",
                                joint.node
                            )));
                        }
                    }
                }
            }
        }

        let bounds = compute_rest_pose_bounds(&armature, &drawables, &meshes);

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            armature,
            meshes,
            drawables,
            bounds,
        })
    }

    #[inline]
    #[must_use]
    pub fn armature(&self) -> &Arc<ArmatureTemplate> {
        &self.armature
    }

    #[inline]
    #[must_use]
    pub fn meshes(&self) -> &Arc<ConsolidatedMeshes> {
        &self.meshes
    }

    #[inline]
    #[must_use]
    pub fn drawables(&self) -> &[DrawableTemplate] {
        &self.drawables
    }

    /// Rest-pose bounding sphere, fitted once at build time.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> BoundingSphere {
        self.bounds
    }
}

/// The dedicated post-load bounds pass: instantiate a throwaway pose,
/// evaluate the rest pose, transform every referenced vertex, and fit a
/// sphere. Runs once per template, never on the frame path.
fn compute_rest_pose_bounds(
    armature: &Arc<ArmatureTemplate>,
    drawables: &[DrawableTemplate],
    meshes: &ConsolidatedMeshes,
) -> BoundingSphere {
    let mut pose = ArmatureInstance::new(Arc::clone(armature));
    pose.evaluate(0, 0.0);

    let mut points = Vec::new();

    for drawable in drawables {
        let Some(entry) = meshes.mesh(drawable.mesh) else {
            continue;
        };

        match &drawable.kind {
            DrawableKind::Rigid { node } => {
                let world = pose.world_matrix(*node);
                for range in entry.primitives.iter().filter(|r| r.is_drawable()) {
                    for vertex in 0..range.vertex_count {
                        if let Some(position) = meshes.primitive_position(range, vertex) {
                            points.push(world.transform_point3(position));
                        }
                    }
                }
            }
            DrawableKind::Skinned { joints, .. } => {
                let palette: Vec<Mat4> = joints
                    .iter()
                    .map(|joint| Mat4::from(pose.world_matrix(joint.node)) * joint.inverse_bind)
                    .collect();

                for range in entry.primitives.iter().filter(|r| r.is_drawable()) {
                    for vertex in 0..range.vertex_count {
                        let Some(position) = meshes.primitive_position(range, vertex) else {
                            continue;
                        };
                        let influence = meshes
                            .primitive_skin_influence(range, vertex)
                            .unwrap_or_default();
                        points.push(transform_position(position, &palette, &influence));
                    }
                }
            }
        }
    }

    BoundingSphere::from_points(&points)
}
