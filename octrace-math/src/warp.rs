//! Warps that turn uniformly distributed samples from `[0, 1)^2` into
//! samples of other distributions, together with their densities.
//!
//! Every `square_to_*` function has a matching `*_pdf` that returns the
//! density of the produced distribution (zero outside of its support);
//! directional densities are per unit solid angle.

use std::f32::consts::{FRAC_1_PI, PI};

use glam::{vec2, vec3, Vec2, Vec3};

pub fn square_to_uniform_square(sample: Vec2) -> Vec2 {
    sample
}

pub fn square_to_uniform_square_pdf(p: Vec2) -> f32 {
    if p.cmpge(Vec2::ZERO).all() && p.cmple(Vec2::ONE).all() {
        1.0
    } else {
        0.0
    }
}

/// Separable tent filter over `[-1, 1]^2`.
pub fn square_to_tent(sample: Vec2) -> Vec2 {
    fn tent(x: f32) -> f32 {
        if x < 0.5 {
            (2.0 * x).sqrt() - 1.0
        } else {
            1.0 - (2.0 - 2.0 * x).sqrt()
        }
    }

    vec2(tent(sample.x), tent(sample.y))
}

pub fn square_to_tent_pdf(p: Vec2) -> f32 {
    if p.x.abs() > 1.0 || p.y.abs() > 1.0 {
        return 0.0;
    }

    (1.0 - p.x.abs()) * (1.0 - p.y.abs())
}

pub fn square_to_uniform_disk(sample: Vec2) -> Vec2 {
    let r = sample.x.sqrt();
    let phi = 2.0 * PI * sample.y;

    vec2(r * phi.cos(), r * phi.sin())
}

pub fn square_to_uniform_disk_pdf(p: Vec2) -> f32 {
    if p.length_squared() <= 1.0 {
        FRAC_1_PI
    } else {
        0.0
    }
}

pub fn square_to_uniform_sphere(sample: Vec2) -> Vec3 {
    let z = 1.0 - 2.0 * sample.x;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * sample.y;

    vec3(r * phi.cos(), r * phi.sin(), z)
}

pub fn square_to_uniform_sphere_pdf(v: Vec3) -> f32 {
    if is_unit(v) {
        1.0 / (4.0 * PI)
    } else {
        0.0
    }
}

pub fn square_to_uniform_hemisphere(sample: Vec2) -> Vec3 {
    let z = 1.0 - sample.x;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * sample.y;

    vec3(r * phi.cos(), r * phi.sin(), z)
}

pub fn square_to_uniform_hemisphere_pdf(v: Vec3) -> f32 {
    if is_unit(v) && v.z >= 0.0 {
        1.0 / (2.0 * PI)
    } else {
        0.0
    }
}

/// Malley's method: uniform disk sample lifted onto the hemisphere.
pub fn square_to_cosine_hemisphere(sample: Vec2) -> Vec3 {
    let p = square_to_uniform_disk(sample);
    let z = (1.0 - p.length_squared()).max(0.0).sqrt();

    p.extend(z)
}

pub fn square_to_cosine_hemisphere_pdf(v: Vec3) -> f32 {
    if is_unit(v) && v.z >= 0.0 {
        v.z * FRAC_1_PI
    } else {
        0.0
    }
}

/// Samples microfacet normals proportionally to `D(m) * cos(theta_m)` of the
/// Beckmann distribution with roughness `alpha`.
pub fn square_to_beckmann(sample: Vec2, alpha: f32) -> Vec3 {
    let phi = 2.0 * PI * sample.x;
    let tan2_theta = -alpha * alpha * (1.0 - sample.y).ln();
    let cos_theta = 1.0 / (1.0 + tan2_theta).sqrt();
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

    vec3(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

pub fn square_to_beckmann_pdf(m: Vec3, alpha: f32) -> f32 {
    if !is_unit(m) || m.z <= 0.0 {
        return 0.0;
    }

    let cos_theta = m.z;
    let cos2_theta = cos_theta * cos_theta;
    let tan2_theta = (1.0 - cos2_theta) / cos2_theta;
    let alpha2 = alpha * alpha;

    (-tan2_theta / alpha2).exp() / (PI * alpha2 * cos2_theta * cos_theta)
}

fn is_unit(v: Vec3) -> bool {
    (v.length_squared() - 1.0).abs() < 1e-4
}
