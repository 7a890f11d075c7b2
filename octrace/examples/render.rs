//! Renders a procedural scene (a sphere resting on a floor) and saves it as
//! a PNG.
//!
//! ```text
//! cargo run --release --example render -- [normals|simple] [output.png]
//! ```

use std::f32::consts::PI;
use std::{env, thread};

use glam::{vec3, Vec3};
use image::{ImageBuffer, Rgb};
use octrace::{
    Accel, Color3, Integrator, Mesh, NormalIntegrator, OctreeConfig, Ray,
    SimpleIntegrator,
};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;
const FOV: f32 = 40.0;

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let integrator = args.next().unwrap_or_else(|| "normals".into());
    let output = args.next().unwrap_or_else(|| "render.png".into());

    let integrator: Box<dyn Integrator + Sync> = match integrator.as_str() {
        "normals" => Box::new(NormalIntegrator),

        "simple" => Box::new(SimpleIntegrator::new(
            vec3(-2.0, 4.0, 3.0),
            Color3::splat(1000.0),
        )),

        other => {
            eprintln!("unknown integrator: {other}");
            std::process::exit(1);
        }
    };

    let mut accel = Accel::with_config(OctreeConfig::default());

    accel.add_mesh(scene()).unwrap();
    accel.build().unwrap();

    let image = render(&accel, integrator.as_ref());

    image.save(&output).unwrap();

    log::info!("Saved {}", output);
}

fn scene() -> Mesh {
    const RINGS: u32 = 48;
    const SEGMENTS: u32 = 96;

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    // Sphere
    for ring in 0..=RINGS {
        let theta = PI * ring as f32 / RINGS as f32;

        for segment in 0..=SEGMENTS {
            let phi = 2.0 * PI * segment as f32 / SEGMENTS as f32;

            let normal = vec3(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            );

            positions.push(normal + Vec3::Y);
            normals.push(normal);
        }
    }

    for ring in 0..RINGS {
        for segment in 0..SEGMENTS {
            let a = ring * (SEGMENTS + 1) + segment;
            let b = a + SEGMENTS + 1;

            // Triangles touching the poles would be degenerate
            if ring > 0 {
                indices.push([a, b, a + 1]);
            }

            if ring < RINGS - 1 {
                indices.push([a + 1, b, b + 1]);
            }
        }
    }

    // Floor
    let base = positions.len() as u32;

    for (x, z) in [(-5.0, -5.0), (5.0, -5.0), (5.0, 5.0), (-5.0, 5.0)] {
        positions.push(vec3(x, 0.0, z));
        normals.push(Vec3::Y);
    }

    indices.push([base, base + 2, base + 1]);
    indices.push([base, base + 3, base + 2]);

    Mesh::new(positions, indices)
        .and_then(|mesh| mesh.with_normals(normals))
        .unwrap()
        .with_name("sphere-on-floor")
}

fn render(
    accel: &Accel,
    integrator: &(dyn Integrator + Sync),
) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    let eye = vec3(0.0, 2.0, 6.0);
    let forward = (vec3(0.0, 0.8, 0.0) - eye).normalize();
    let right = forward.cross(Vec3::Y).normalize();
    let up = right.cross(forward);

    let scale = (FOV.to_radians() * 0.5).tan();
    let aspect = WIDTH as f32 / HEIGHT as f32;

    let mut image = ImageBuffer::<Rgb<u8>, _>::new(WIDTH, HEIGHT);
    let threads = thread::available_parallelism().map_or(4, |n| n.get());
    let rows_per_thread = (HEIGHT as usize).div_ceil(threads);
    let row_len = 3 * WIDTH as usize;

    thread::scope(|scope| {
        for (chunk_idx, chunk) in
            image.chunks_mut(rows_per_thread * row_len).enumerate()
        {
            scope.spawn(move || {
                for (pixel_idx, pixel) in chunk.chunks_mut(3).enumerate() {
                    let x = (pixel_idx % WIDTH as usize) as f32;

                    let y = (chunk_idx * rows_per_thread
                        + pixel_idx / WIDTH as usize)
                        as f32;

                    let u = (2.0 * (x + 0.5) / WIDTH as f32 - 1.0) * aspect;
                    let v = 1.0 - 2.0 * (y + 0.5) / HEIGHT as f32;

                    let dir =
                        (forward + right * (u * scale) + up * (v * scale))
                            .normalize();

                    let color = integrator.li(accel, &Ray::new(eye, dir));

                    pixel.copy_from_slice(&to_srgb(color));
                }
            });
        }
    });

    image
}

fn to_srgb(color: Color3) -> [u8; 3] {
    color.to_array().map(|c| {
        let c = c.clamp(0.0, 1.0);

        let c = if c <= 0.0031308 {
            12.92 * c
        } else {
            1.055 * c.powf(1.0 / 2.4) - 0.055
        };

        (c * 255.0).round() as u8
    })
}
