mod normals;
mod simple;

use glam::Vec3;
use octrace_math::Ray;

pub use self::normals::*;
pub use self::simple::*;
use crate::Accel;

/// Linear RGB radiance.
pub type Color3 = Vec3;

/// Estimates the radiance arriving along a camera ray.
pub trait Integrator {
    fn li(&self, accel: &Accel, ray: &Ray) -> Color3;
}
