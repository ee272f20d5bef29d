use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use smallvec::SmallVec;

/// Number of bone influences kept per vertex.
pub const MAX_INFLUENCES: usize = 4;

/// Fixed four-slot bone influence for one vertex.
///
/// Slots are sorted by descending weight and the kept weights sum to 1
/// whenever at least one input influence existed. GPU-facing: `Pod`, 24
/// bytes, interleaved directly into vertex buffers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SkinInfluence {
    pub indices: [u16; MAX_INFLUENCES],
    pub weights: [f32; MAX_INFLUENCES],
}

impl SkinInfluence {
    /// The canonical default: everything bound to joint 0 with full
    /// weight. Returned for vertices with no influences at all, so the
    /// weighted sum never silently zeroes a vertex out.
    pub const DEFAULT: Self = Self {
        indices: [0; MAX_INFLUENCES],
        weights: [1.0, 0.0, 0.0, 0.0],
    };

    /// Reduces an arbitrary-length influence list to four slots.
    ///
    /// Sorts descending by weight, keeps at most [`MAX_INFLUENCES`], and
    /// renormalizes the kept weights to sum to 1. Inputs with no
    /// positive weight yield [`Self::DEFAULT`].
    #[must_use]
    pub fn from_influences(influences: &[(u16, f32)]) -> Self {
        let mut sorted: SmallVec<[(u16, f32); 8]> = influences
            .iter()
            .copied()
            .filter(|&(_, weight)| weight > 0.0)
            .collect();

        if sorted.is_empty() {
            return Self::DEFAULT;
        }

        sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        sorted.truncate(MAX_INFLUENCES);

        let total: f32 = sorted.iter().map(|&(_, weight)| weight).sum();

        let mut result = Self::zeroed();
        for (slot, &(index, weight)) in sorted.iter().enumerate() {
            result.indices[slot] = index;
            result.weights[slot] = weight / total;
        }
        result
    }

    /// Sum of the four slot weights.
    #[must_use]
    pub fn weight_sum(&self) -> f32 {
        self.weights.iter().sum()
    }
}

impl Default for SkinInfluence {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Applies a four-slot influence to one position:
/// `Σ weightᵢ · (jointMatrices[indexᵢ] · p)` over the non-zero slots.
///
/// Pure and GPU-free, so hosts can run it off the render path (the
/// template bounds pass does). Slots whose joint index falls outside
/// `joint_matrices` are skipped rather than read out of range.
#[must_use]
pub fn transform_position(
    local: Vec3,
    joint_matrices: &[Mat4],
    influence: &SkinInfluence,
) -> Vec3 {
    let mut result = Vec3::ZERO;
    for slot in 0..MAX_INFLUENCES {
        let weight = influence.weights[slot];
        if weight == 0.0 {
            continue;
        }
        let Some(matrix) = joint_matrices.get(influence.indices[slot] as usize) else {
            continue;
        };
        result += matrix.transform_point3(local) * weight;
    }
    result
}
