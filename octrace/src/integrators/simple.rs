use std::f32::consts::PI;

use glam::Vec3;
use octrace_math::Ray;

use crate::{Accel, Color3, Integrator};

/// Direct lighting from a single point light, with hard shadows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimpleIntegrator {
    pub position: Vec3,
    pub energy: Color3,
}

impl SimpleIntegrator {
    pub fn new(position: Vec3, energy: Color3) -> Self {
        Self { position, energy }
    }
}

impl Integrator for SimpleIntegrator {
    fn li(&self, accel: &Accel, ray: &Ray) -> Color3 {
        let Some(hit) = accel.ray_intersect(ray) else {
            return Color3::ZERO;
        };

        let to_light = self.position - hit.p;
        let distance_sq = to_light.length_squared();
        let distance = distance_sq.sqrt();
        let dir = to_light / distance;

        // Anything behind the light doesn't cast a shadow
        let shadow = Ray::segment(hit.p, dir, Ray::EPSILON, distance);

        if accel.ray_occluded(&shadow) {
            return Color3::ZERO;
        }

        let cos_theta = hit.sh_frame.n.dot(dir).max(0.0);

        self.energy * (cos_theta / (4.0 * PI * PI * distance_sq))
    }
}
