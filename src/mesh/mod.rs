//! Mesh data plumbing: skin influence encoding, vertex layout
//! signatures, bounding volumes, and consolidation of heterogeneous
//! source meshes into shared vertex/index buffers.

pub mod bounds;
pub mod consolidate;
pub mod skin;
pub mod vertex;

pub use bounds::{BoundingBox, BoundingSphere};
pub use consolidate::{
    ConsolidatedMeshes, IndexBufferBucket, MaterialRef, MeshConsolidator, MeshEntry,
    PrimitiveRange, SourceMesh, SourcePrimitive, VertexBufferBucket,
};
pub use skin::{MAX_INFLUENCES, SkinInfluence, transform_position};
pub use vertex::{VertexAttributes, VertexData, VertexLayout};
