use bitflags::bitflags;
use glam::{Vec2, Vec3, Vec4};

use crate::errors::{ManikinError, Result};
use crate::mesh::skin::SkinInfluence;

bitflags! {
    /// The set of vertex attributes a primitive carries.
    ///
    /// This set, together with the canonical attribute order below, is
    /// the layout signature used to bucket compatible primitives into
    /// shared vertex buffers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct VertexAttributes: u32 {
        const POSITION   = 1 << 0;
        const NORMAL     = 1 << 1;
        const TANGENT    = 1 << 2;
        const COLOR_0    = 1 << 3;
        const COLOR_1    = 1 << 4;
        const TEXCOORD_0 = 1 << 5;
        const TEXCOORD_1 = 1 << 6;
        const SKIN       = 1 << 7;
    }
}

/// Canonical interleave order with the per-attribute byte size.
///
/// Position/normal are `f32x3`, tangent and colors `f32x4`, texture
/// coordinates `f32x2`, skin data `u16x4` joints + `f32x4` weights.
const ATTRIBUTE_SIZES: [(VertexAttributes, u32); 8] = [
    (VertexAttributes::POSITION, 12),
    (VertexAttributes::NORMAL, 12),
    (VertexAttributes::TANGENT, 16),
    (VertexAttributes::COLOR_0, 16),
    (VertexAttributes::COLOR_1, 16),
    (VertexAttributes::TEXCOORD_0, 8),
    (VertexAttributes::TEXCOORD_1, 8),
    (VertexAttributes::SKIN, 24),
];

/// A structural vertex layout: attribute set plus derived stride.
///
/// Two primitives may share a vertex bucket only when their layouts
/// compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    pub attributes: VertexAttributes,
    pub stride: u32,
}

impl VertexLayout {
    /// Derives a layout from an attribute set.
    ///
    /// A set without `POSITION` (in particular, an empty one) is not a
    /// renderable layout and fails with
    /// [`ManikinError::UnsupportedLayout`].
    pub fn from_attributes(attributes: VertexAttributes) -> Result<Self> {
        if !attributes.contains(VertexAttributes::POSITION) {
            return Err(ManikinError::UnsupportedLayout(format!(
                "vertex layout {attributes:?} lacks a position attribute"
            )));
        }

        let stride = ATTRIBUTE_SIZES
            .iter()
            .filter(|(flag, _)| attributes.contains(*flag))
            .map(|(_, size)| size)
            .sum();

        Ok(Self { attributes, stride })
    }

    /// Byte offset of `attribute` within one interleaved vertex, or
    /// `None` when the layout does not carry it.
    #[must_use]
    pub fn offset_of(&self, attribute: VertexAttributes) -> Option<u32> {
        if !self.attributes.contains(attribute) {
            return None;
        }

        let mut offset = 0;
        for (flag, size) in ATTRIBUTE_SIZES {
            if flag == attribute {
                return Some(offset);
            }
            if self.attributes.contains(flag) {
                offset += size;
            }
        }
        None
    }
}

/// Importer-facing per-primitive vertex channels.
///
/// `positions` is mandatory; every other channel is optional and, when
/// present, must match the position count exactly.
#[derive(Debug, Clone, Default)]
pub struct VertexData {
    pub positions: Vec<Vec3>,
    pub normals: Option<Vec<Vec3>>,
    pub tangents: Option<Vec<Vec4>>,
    pub colors: [Option<Vec<Vec4>>; 2],
    pub tex_coords: [Option<Vec<Vec2>>; 2],
    pub skin: Option<Vec<SkinInfluence>>,
}

impl VertexData {
    #[must_use]
    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The attribute set this data carries.
    #[must_use]
    pub fn attributes(&self) -> VertexAttributes {
        let mut attributes = VertexAttributes::POSITION;
        if self.normals.is_some() {
            attributes |= VertexAttributes::NORMAL;
        }
        if self.tangents.is_some() {
            attributes |= VertexAttributes::TANGENT;
        }
        if self.colors[0].is_some() {
            attributes |= VertexAttributes::COLOR_0;
        }
        if self.colors[1].is_some() {
            attributes |= VertexAttributes::COLOR_1;
        }
        if self.tex_coords[0].is_some() {
            attributes |= VertexAttributes::TEXCOORD_0;
        }
        if self.tex_coords[1].is_some() {
            attributes |= VertexAttributes::TEXCOORD_1;
        }
        if self.skin.is_some() {
            attributes |= VertexAttributes::SKIN;
        }
        attributes
    }

    /// Derives the structural layout, checking channel lengths.
    pub fn layout(&self) -> Result<VertexLayout> {
        self.validate()?;
        VertexLayout::from_attributes(self.attributes())
    }

    /// Verifies every present channel matches the position count.
    pub fn validate(&self) -> Result<()> {
        let count = self.positions.len();

        let check = |name: &str, len: Option<usize>| -> Result<()> {
            match len {
                Some(len) if len != count => Err(ManikinError::InvalidArgument(format!(
                    "{name} channel holds {len} entries for {count} positions"
                ))),
                _ => Ok(()),
            }
        };

        check("normal", self.normals.as_ref().map(Vec::len))?;
        check("tangent", self.tangents.as_ref().map(Vec::len))?;
        check("color 0", self.colors[0].as_ref().map(Vec::len))?;
        check("color 1", self.colors[1].as_ref().map(Vec::len))?;
        check("texcoord 0", self.tex_coords[0].as_ref().map(Vec::len))?;
        check("texcoord 1", self.tex_coords[1].as_ref().map(Vec::len))?;
        check("skin", self.skin.as_ref().map(Vec::len))?;
        Ok(())
    }

    /// Packs the channels into one interleaved byte stream following the
    /// canonical attribute order. Callers validate first via
    /// [`Self::layout`].
    #[must_use]
    pub fn interleave(&self) -> Vec<u8> {
        let attributes = self.attributes();
        let stride = ATTRIBUTE_SIZES
            .iter()
            .filter(|(flag, _)| attributes.contains(*flag))
            .map(|(_, size)| *size as usize)
            .sum::<usize>();

        let mut data = Vec::with_capacity(self.positions.len() * stride);

        for i in 0..self.positions.len() {
            data.extend_from_slice(bytemuck::bytes_of(&self.positions[i]));
            if let Some(normals) = &self.normals {
                data.extend_from_slice(bytemuck::bytes_of(&normals[i]));
            }
            if let Some(tangents) = &self.tangents {
                data.extend_from_slice(bytemuck::bytes_of(&tangents[i]));
            }
            for colors in self.colors.iter().flatten() {
                data.extend_from_slice(bytemuck::bytes_of(&colors[i]));
            }
            for tex_coords in self.tex_coords.iter().flatten() {
                data.extend_from_slice(bytemuck::bytes_of(&tex_coords[i]));
            }
            if let Some(skin) = &self.skin {
                data.extend_from_slice(bytemuck::bytes_of(&skin[i]));
            }
        }

        data
    }
}
