use glam::{Affine3A, EulerRot, Mat3, Mat4, Quat, Vec3};

/// Local transform of an animation node.
///
/// Holds the scale, rotation and translation that the mixer blends into every
/// frame. The local matrix is composed in scale → rotation → translation order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    pub scale: Vec3,
    pub rotation: Quat,
    pub translation: Vec3,
}

impl NodeTransform {
    pub const IDENTITY: Self = Self {
        scale: Vec3::ONE,
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
    };

    #[must_use]
    pub fn new(scale: Vec3, rotation: Quat, translation: Vec3) -> Self {
        Self {
            scale,
            rotation,
            translation,
        }
    }

    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Composes `T * R * S`.
    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    // ========================================================================
    // Rotation helpers
    // ========================================================================

    /// Sets the rotation from XYZ euler angles (radians).
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }

    /// Returns the rotation as XYZ euler angles (radians).
    #[must_use]
    pub fn rotation_euler(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }

    /// Orients the node so its -Z axis points at `target`.
    ///
    /// `target` and `up` are expressed in the parent's space. Degenerate
    /// inputs (target on the up axis or at the node's position) leave the
    /// rotation unchanged.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let Some(forward) = (target - self.translation).try_normalize() else {
            return;
        };

        if forward.cross(up).length_squared() < 1e-4 {
            return;
        }

        let right = forward.cross(up).normalize();
        let new_up = right.cross(forward).normalize();

        let rot_mat = Mat3::from_cols(right, new_up, -forward);
        self.rotation = Quat::from_mat3(&rot_mat);
    }

    // ========================================================================
    // Matrix conversion
    // ========================================================================

    /// Decomposes an affine matrix into scale, rotation and translation.
    ///
    /// Shear is lost in the decomposition.
    #[must_use]
    pub fn from_matrix(mat: &Affine3A) -> Self {
        let (scale, rotation, translation) = mat.to_scale_rotation_translation();
        Self {
            scale,
            rotation,
            translation,
        }
    }

    #[must_use]
    pub fn from_mat4(mat: &Mat4) -> Self {
        Self::from_matrix(&Affine3A::from_mat4(*mat))
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
