//! Manikin — a runtime for animated, skinned 3D models.
//!
//! The crate sits between an asset importer and a GPU backend:
//! importers feed it decoded mesh primitives and skeleton hierarchies,
//! and it hands the backend consolidated vertex/index ranges plus live
//! world and skin matrices each frame.
//!
//! - [`armature`]: topologically ordered node hierarchies and their
//!   per-frame pose evaluation, including weighted track blending.
//! - [`animation`]: keyframe curves, animatable properties, and the
//!   playback clock.
//! - [`mesh`]: skin influence encoding, vertex layout signatures, and
//!   consolidation of heterogeneous primitives into shared buffers.
//! - [`model`]: drawable/model templates shared across instances, and
//!   the per-instance state derived from them.
//! - [`scene`]: the instance container and camera-ordered batching.

pub mod animation;
pub mod armature;
pub mod errors;
pub mod mesh;
pub mod model;
pub mod scene;

pub use animation::{AnimatableProperty, AnimationPlayer, InterpolationMode, KeyframeTrack, LoopMode};
pub use armature::{
    AnimationTrackInfo, ArmatureInstance, ArmatureTemplate, BlendInput, LocalTransform,
    NodeTemplate,
};
pub use errors::{ManikinError, Result};
pub use mesh::{
    BoundingBox, BoundingSphere, ConsolidatedMeshes, MaterialRef, MeshConsolidator, PrimitiveRange,
    SkinInfluence, SourceMesh, SourcePrimitive, VertexAttributes, VertexData, VertexLayout,
    transform_position,
};
pub use model::{BlendMode, DrawableKind, DrawableTemplate, ModelInstance, ModelTemplate, SkinJoint};
pub use scene::{DrawCommand, Environment, ModelKey, Scene, SceneBatch};
