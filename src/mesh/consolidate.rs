use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::errors::{ManikinError, Result};
use crate::mesh::skin::SkinInfluence;
use crate::mesh::vertex::{VertexAttributes, VertexData, VertexLayout};

/// Opaque material handle supplied by the importer and passed through
/// untouched to the GPU backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialRef(pub u32);

/// One decoded primitive from an external importer: a vertex stream, a
/// triangle index list, and a material reference.
#[derive(Debug, Clone)]
pub struct SourcePrimitive {
    pub vertices: VertexData,
    pub indices: Vec<u32>,
    pub material: MaterialRef,
}

/// One decoded source mesh: an ordered list of primitives.
#[derive(Debug, Clone)]
pub struct SourceMesh {
    pub name: String,
    pub primitives: Vec<SourcePrimitive>,
}

/// Shared vertex storage for all primitives of one structural layout.
///
/// Append-only during consolidation: once a primitive's range is
/// recorded, earlier bytes are never relocated, so recorded offsets stay
/// valid for late binding.
#[derive(Debug, Clone)]
pub struct VertexBufferBucket {
    pub layout: VertexLayout,
    data: Vec<u8>,
    vertex_count: u32,
}

impl VertexBufferBucket {
    fn new(layout: VertexLayout) -> Self {
        Self {
            layout,
            data: Vec::new(),
            vertex_count: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Reads one attribute of one vertex back out of the interleaved
    /// stream. `None` when the vertex or attribute is absent.
    fn attribute_bytes(&self, vertex: u32, attribute: VertexAttributes, size: usize) -> Option<&[u8]> {
        if vertex >= self.vertex_count {
            return None;
        }
        let offset = self.layout.offset_of(attribute)? as usize;
        let start = vertex as usize * self.layout.stride as usize + offset;
        self.data.get(start..start + size)
    }

    /// Position of `vertex`, read back from the interleaved bytes.
    ///
    /// Used by the template bounds pass; positions always sit at offset
    /// zero of the canonical layout.
    #[must_use]
    pub fn position_at(&self, vertex: u32) -> Option<Vec3> {
        let bytes = self.attribute_bytes(vertex, VertexAttributes::POSITION, 12)?;
        Some(Vec3::from(bytemuck::pod_read_unaligned::<[f32; 3]>(bytes)))
    }

    /// Skin influence of `vertex`, when the layout carries skin data.
    #[must_use]
    pub fn skin_influence_at(&self, vertex: u32) -> Option<SkinInfluence> {
        let bytes = self.attribute_bytes(vertex, VertexAttributes::SKIN, 24)?;
        Some(bytemuck::pod_read_unaligned::<SkinInfluence>(bytes))
    }
}

/// Shared triangle-index storage. Indices are layout-independent, so a
/// single bucket is reused across every primitive of a collection.
#[derive(Debug, Clone, Default)]
pub struct IndexBufferBucket {
    data: Vec<u8>,
    index_count: u32,
}

impl IndexBufferBucket {
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Index element at `element`, read back from the raw bytes.
    #[must_use]
    pub fn index_at(&self, element: u32) -> Option<u32> {
        let start = element as usize * 4;
        let bytes = self.data.get(start..start + 4)?;
        Some(bytemuck::pod_read_unaligned::<u32>(bytes))
    }
}

/// Where one primitive landed in the consolidated buffers.
///
/// `base_vertex`/`index_offset` are element offsets (not bytes); the
/// recorded indices are primitive-local, so backends draw with
/// `base_vertex` applied.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveRange {
    pub vertex_buffer: usize,
    pub base_vertex: u32,
    pub vertex_count: u32,
    pub index_buffer: usize,
    pub index_offset: u32,
    pub triangle_count: u32,
    pub material: MaterialRef,
}

impl PrimitiveRange {
    /// Whether the primitive contributed geometry. Zero-triangle
    /// primitives keep their material/mesh association but draw nothing.
    #[inline]
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.triangle_count > 0
    }
}

/// Per-source-mesh record of primitive ranges.
#[derive(Debug, Clone)]
pub struct MeshEntry {
    pub name: String,
    pub primitives: Vec<PrimitiveRange>,
}

/// The immutable result of consolidation, shared by every model
/// template that draws from this collection.
#[derive(Debug, Clone)]
pub struct ConsolidatedMeshes {
    pub vertex_buffers: Vec<VertexBufferBucket>,
    pub index_buffers: Vec<IndexBufferBucket>,
    pub meshes: Vec<MeshEntry>,
}

impl ConsolidatedMeshes {
    #[must_use]
    pub fn mesh(&self, index: usize) -> Option<&MeshEntry> {
        self.meshes.get(index)
    }

    /// Position of one vertex of a recorded primitive range.
    #[must_use]
    pub fn primitive_position(&self, range: &PrimitiveRange, vertex: u32) -> Option<Vec3> {
        if vertex >= range.vertex_count {
            return None;
        }
        self.vertex_buffers
            .get(range.vertex_buffer)?
            .position_at(range.base_vertex + vertex)
    }

    /// Skin influence of one vertex of a recorded primitive range.
    #[must_use]
    pub fn primitive_skin_influence(
        &self,
        range: &PrimitiveRange,
        vertex: u32,
    ) -> Option<SkinInfluence> {
        if vertex >= range.vertex_count {
            return None;
        }
        self.vertex_buffers
            .get(range.vertex_buffer)?
            .skin_influence_at(range.base_vertex + vertex)
    }
}

/// Buckets decoded source meshes into a minimal set of shared vertex and
/// index buffers.
///
/// Primitives land in the vertex bucket whose layout signature matches
/// exactly; a new bucket opens otherwise. All index data shares one
/// bucket. Runs once at load time, then [`Self::finish`] freezes the
/// result.
#[derive(Debug, Default)]
pub struct MeshConsolidator {
    vertex_buffers: Vec<VertexBufferBucket>,
    index_buffer: IndexBufferBucket,
    meshes: Vec<MeshEntry>,
    layout_lookup: FxHashMap<VertexLayout, usize>,
}

impl MeshConsolidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every primitive of `mesh` and returns the mesh index used
    /// by drawable templates.
    pub fn add_mesh(&mut self, mesh: &SourceMesh) -> Result<usize> {
        let mut primitives = Vec::with_capacity(mesh.primitives.len());
        for (primitive_index, primitive) in mesh.primitives.iter().enumerate() {
            primitives.push(self.append_primitive(primitive, &mesh.name, primitive_index)?);
        }

        self.meshes.push(MeshEntry {
            name: mesh.name.clone(),
            primitives,
        });
        Ok(self.meshes.len() - 1)
    }

    /// Freezes the buckets into an immutable collection.
    #[must_use]
    pub fn finish(self) -> ConsolidatedMeshes {
        ConsolidatedMeshes {
            vertex_buffers: self.vertex_buffers,
            index_buffers: vec![self.index_buffer],
            meshes: self.meshes,
        }
    }

    fn append_primitive(
        &mut self,
        primitive: &SourcePrimitive,
        mesh_name: &str,
        primitive_index: usize,
    ) -> Result<PrimitiveRange> {
        let vertex_count = primitive.vertices.len() as u32;

        if primitive.indices.len() % 3 != 0 {
            return Err(ManikinError::InvalidArgument(format!(
                "primitive {primitive_index} of mesh '{mesh_name}' holds {} indices, not a multiple of 3",
                primitive.indices.len()
            )));
        }
        if let Some(&out_of_range) = primitive.indices.iter().find(|&&i| i >= vertex_count) {
            return Err(ManikinError::InvalidArgument(format!(
                "primitive {primitive_index} of mesh '{mesh_name}' references vertex {out_of_range} of {vertex_count}"
            )));
        }

        let triangle_count = (primitive.indices.len() / 3) as u32;
        if triangle_count == 0 {
            // Degenerate: no geometry. Keep the material association
            // with zero counts so diagnostics can still see it.
            log::debug!(
                "Skipping zero-triangle primitive {primitive_index} of mesh '{mesh_name}'"
            );
            return Ok(PrimitiveRange {
                vertex_buffer: 0,
                base_vertex: 0,
                vertex_count: 0,
                index_buffer: 0,
                index_offset: 0,
                triangle_count: 0,
                material: primitive.material,
            });
        }

        let layout = primitive.vertices.layout()?;
        let vertex_buffer = self.bucket_for(layout);

        let bucket = &mut self.vertex_buffers[vertex_buffer];
        let base_vertex = bucket.vertex_count;
        bucket.data.extend_from_slice(&primitive.vertices.interleave());
        bucket.vertex_count += vertex_count;

        let index_offset = self.index_buffer.index_count;
        self.index_buffer
            .data
            .extend_from_slice(bytemuck::cast_slice(&primitive.indices));
        self.index_buffer.index_count += primitive.indices.len() as u32;

        Ok(PrimitiveRange {
            vertex_buffer,
            base_vertex,
            vertex_count,
            index_buffer: 0,
            index_offset,
            triangle_count,
            material: primitive.material,
        })
    }

    /// Finds the bucket whose layout matches exactly, opening a new one
    /// when none does.
    fn bucket_for(&mut self, layout: VertexLayout) -> usize {
        if let Some(&index) = self.layout_lookup.get(&layout) {
            return index;
        }

        let index = self.vertex_buffers.len();
        log::debug!(
            "Opening vertex bucket {index} for layout {:?} (stride {})",
            layout.attributes,
            layout.stride
        );
        self.vertex_buffers.push(VertexBufferBucket::new(layout));
        self.layout_lookup.insert(layout, index);
        index
    }
}
