use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
    inv_direction: Vec3,

    /// Smallest distance that counts as a hit
    pub mint: f32,

    /// Largest distance that counts as a hit (exclusive)
    pub maxt: f32,
}

impl Ray {
    /// Default `mint` of freshly created rays; keeps secondary rays from
    /// re-hitting the surface they start on.
    pub const EPSILON: f32 = 1e-4;

    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::segment(origin, direction, Self::EPSILON, f32::INFINITY)
    }

    pub fn segment(origin: Vec3, direction: Vec3, mint: f32, maxt: f32) -> Self {
        Self {
            origin,
            direction,
            inv_direction: 1.0 / direction,
            mint,
            maxt,
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn inv_direction(&self) -> Vec3 {
        self.inv_direction
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    pub fn with_maxt(mut self, maxt: f32) -> Self {
        self.maxt = maxt;
        self
    }

    pub fn with_mint(mut self, mint: f32) -> Self {
        self.mint = mint;
        self
    }

    /// Returns whether `t` lies within `mint ..maxt`.
    pub fn contains(&self, t: f32) -> bool {
        t >= self.mint && t < self.maxt
    }
}
