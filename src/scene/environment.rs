use glam::{Mat4, Vec3};

/// Per-frame camera/lighting descriptor handed to batch building.
///
/// The view/projection matrices are carried through for the backend to
/// push once per effect; the runtime itself only reads the camera basis
/// for depth ordering.
#[derive(Debug, Clone, Copy)]
pub struct Environment {
    pub camera_position: Vec3,
    /// Unit vector the camera looks along.
    pub camera_forward: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
}

impl Environment {
    #[must_use]
    pub fn new(camera_position: Vec3, camera_forward: Vec3) -> Self {
        Self {
            camera_position,
            camera_forward: camera_forward.normalize_or_zero(),
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        }
    }

    #[must_use]
    pub fn with_matrices(mut self, view: Mat4, projection: Mat4) -> Self {
        self.view = view;
        self.projection = projection;
        self
    }

    /// Signed depth of a world-space origin along the camera forward
    /// axis: positive in front of the camera and increasing with
    /// distance, so an ascending sort yields front-to-back order.
    #[must_use]
    pub fn signed_depth(&self, world_origin: Vec3) -> f32 {
        self.camera_forward.dot(world_origin - self.camera_position)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::NEG_Z)
    }
}
