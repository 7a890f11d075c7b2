use glam::Vec3;

/// Orthonormal shading/geometry frame; `n` is the normal, `s` and `t` span
/// the tangent plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub s: Vec3,
    pub t: Vec3,
    pub n: Vec3,
}

impl Frame {
    /// Builds a frame around the (unit) normal `n`, picking an arbitrary but
    /// deterministic tangent.
    pub fn from_normal(n: Vec3) -> Self {
        let (s, t) = n.any_orthonormal_pair();

        Self { s, t, n }
    }

    pub fn to_local(&self, v: Vec3) -> Vec3 {
        Vec3::new(v.dot(self.s), v.dot(self.t), v.dot(self.n))
    }

    pub fn to_world(&self, v: Vec3) -> Vec3 {
        self.s * v.x + self.t * v.y + self.n * v.z
    }

    /// Cosine of the angle between a local-space direction and the normal.
    pub fn cos_theta(v: Vec3) -> f32 {
        v.z
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            s: Vec3::X,
            t: Vec3::Y,
            n: Vec3::Z,
        }
    }
}
