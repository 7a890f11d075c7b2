use octrace_math::Ray;

use crate::{Accel, Color3, Integrator};

/// Visualizes shading normals: the color is the componentwise absolute value
/// of the normal at the closest hit, black on a miss.
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalIntegrator;

impl Integrator for NormalIntegrator {
    fn li(&self, accel: &Accel, ray: &Ray) -> Color3 {
        accel
            .ray_intersect(ray)
            .map_or(Color3::ZERO, |hit| hit.sh_frame.n.abs())
    }
}
