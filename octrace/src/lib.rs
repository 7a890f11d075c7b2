//! Octree-accelerated ray intersection for a single triangle mesh.
//!
//! ```no_run
//! use octrace::glam::{vec3, Vec3};
//! use octrace::{Accel, Mesh, Ray};
//!
//! let mesh = Mesh::new(
//!     vec![
//!         vec3(-1.0, -1.0, 0.0),
//!         vec3(1.0, -1.0, 0.0),
//!         vec3(0.0, 1.0, 0.0),
//!     ],
//!     vec![[0, 1, 2]],
//! )?;
//!
//! let mut accel = Accel::new();
//!
//! accel.add_mesh(mesh)?;
//! accel.build()?;
//!
//! let hit = accel.ray_intersect(&Ray::new(vec3(0.0, 0.0, -1.0), Vec3::Z));
//!
//! assert!(hit.is_some());
//! # Ok::<(), octrace::Error>(())
//! ```

#![allow(clippy::len_without_is_empty)]

mod accel;
mod config;
mod error;
mod integrators;
mod intersection;
mod mesh;
mod mesh_triangle;
mod metrics;
mod octree;

pub use octrace_math::*;

pub use self::accel::*;
pub use self::config::*;
pub use self::error::*;
pub use self::integrators::*;
pub use self::intersection::*;
pub use self::mesh::*;
pub use self::mesh_triangle::*;
pub use self::octree::*;
