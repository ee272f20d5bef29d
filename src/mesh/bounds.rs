use glam::{Affine3A, Vec3};

#[derive(Debug, Clone, Copy, Default)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Smallest box enclosing `points`; `None` for an empty set.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for &point in points {
            min = min.min(point);
            max = max.max(point);
        }
        Some(Self { min, max })
    }
}

/// Precomputed bounding volume of a model template, evaluated once over
/// the rest-pose geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    /// Fits a sphere around `points`: centered on the point cloud's box
    /// center, radius reaching the farthest point. A degenerate (empty)
    /// set yields the default zero sphere.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some(bbox) = BoundingBox::from_points(points) else {
            return Self::default();
        };

        let center = bbox.center();
        let radius = points
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0_f32, f32::max);

        Self { center, radius }
    }

    /// The sphere carried through an affine transform. The radius scales
    /// by the largest axis scale, so the result always encloses the
    /// transformed geometry (conservative under non-uniform scale).
    #[must_use]
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        let center = matrix.transform_point3(self.center);

        let max_scale = matrix
            .matrix3
            .x_axis
            .length()
            .max(matrix.matrix3.y_axis.length())
            .max(matrix.matrix3.z_axis.length());

        Self {
            center,
            radius: self.radius * max_scale,
        }
    }
}
