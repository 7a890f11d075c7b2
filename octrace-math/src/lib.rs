//! Geometric primitives shared by octrace's accelerator, meshes and
//! integrators.

#![allow(clippy::len_without_is_empty)]
#![allow(clippy::manual_range_contains)]

mod bounding_box;
mod frame;
mod ray;
pub mod warp;

pub use glam;

pub use self::bounding_box::*;
pub use self::frame::*;
pub use self::ray::*;
