use std::ops::{Add, AddAssign};

use glam::{vec3, Vec3};

use crate::Ray;

/// Relative slack applied to the exit distance of slab tests so that
/// rounding never turns a grazing hit into a miss.
const SLAB_SLACK: f32 = {
    let eps = f32::EPSILON * 0.5;

    2.0 * (3.0 * eps) / (1.0 - 3.0 * eps)
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    min: Vec3,
    max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(
            min.cmple(max).all(),
            "bounding box must satisfy min <= max (got {min} and {max})"
        );

        Self { min, max }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points.into_iter().collect()
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn extent(&self) -> Vec3 {
        self.max() - self.min()
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_area(&self) -> f32 {
        if !self.is_set() {
            return 0.0;
        }

        let extent = self.extent();

        extent.x * extent.y + extent.y * extent.z + extent.z * extent.x
    }

    /// Returns whether at least one point has been added to this box.
    pub fn is_set(&self) -> bool {
        self.min.x <= self.max.x
    }

    /// Returns whether both boxes share at least one point; boxes that only
    /// touch on a face, an edge or a corner overlap too.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.min.cmple(point).all() && self.max.cmpge(point).all()
    }

    pub fn contains_box(&self, other: &Self) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }

    /// Returns one of the eight boxes created by bisecting every axis at the
    /// center; bit 0 of `octant` selects the upper half along X, bit 1 along
    /// Y and bit 2 along Z.
    pub fn octant(&self, octant: usize) -> Self {
        debug_assert!(octant < 8);

        let mid = self.center();

        let pick = |bit: usize, lo: f32, mid: f32, hi: f32| {
            if octant & bit > 0 {
                (mid, hi)
            } else {
                (lo, mid)
            }
        };

        let (min_x, max_x) = pick(1, self.min.x, mid.x, self.max.x);
        let (min_y, max_y) = pick(2, self.min.y, mid.y, self.max.y);
        let (min_z, max_z) = pick(4, self.min.z, mid.z, self.max.z);

        Self {
            min: vec3(min_x, min_y, min_z),
            max: vec3(max_x, max_y, max_z),
        }
    }

    pub fn octants(&self) -> [Self; 8] {
        std::array::from_fn(|octant| self.octant(octant))
    }

    pub fn ray_intersect(&self, ray: &Ray) -> bool {
        self.ray_interval(ray).is_some()
    }

    /// Clips `ray.mint ..= ray.maxt` against this box using the slab test and
    /// returns the distances at which the ray enters and leaves the box.
    ///
    /// The test errs on the side of reporting hits: rays running parallel to
    /// an axis are only rejected when they pass outside of that slab, and
    /// the exit distance gets a small rounding allowance.
    pub fn ray_interval(&self, ray: &Ray) -> Option<(f32, f32)> {
        if !self.is_set() {
            return None;
        }

        let origin = ray.origin();
        let direction = ray.direction();
        let inv_direction = ray.inv_direction();

        let mut near = ray.mint;
        let mut far = ray.maxt;

        for axis in 0..3 {
            if direction[axis] == 0.0 {
                if origin[axis] < self.min[axis]
                    || origin[axis] > self.max[axis]
                {
                    return None;
                }

                continue;
            }

            let mut t0 = (self.min[axis] - origin[axis]) * inv_direction[axis];
            let mut t1 = (self.max[axis] - origin[axis]) * inv_direction[axis];

            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t1 += t1.abs() * SLAB_SLACK;

            near = near.max(t0);
            far = far.min(t1);

            if near > far {
                return None;
            }
        }

        Some((near, far))
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            min: Vec3::MAX,
            max: Vec3::MIN,
        }
    }
}

impl Add<Vec3> for BoundingBox {
    type Output = Self;

    fn add(mut self, rhs: Vec3) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<Vec3> for BoundingBox {
    fn add_assign(&mut self, rhs: Vec3) {
        self.min = self.min.min(rhs);
        self.max = self.max.max(rhs);
    }
}

impl FromIterator<Vec3> for BoundingBox {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Vec3>,
    {
        let mut this = Self::default();

        for item in iter {
            this += item;
        }

        this
    }
}

impl Add<Self> for BoundingBox {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<Self> for BoundingBox {
    fn add_assign(&mut self, rhs: Self) {
        if rhs.is_set() {
            *self += rhs.min;
            *self += rhs.max;
        }
    }
}

impl FromIterator<Self> for BoundingBox {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Self>,
    {
        let mut this = Self::default();

        for item in iter {
            this += item;
        }

        this
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn unit() -> BoundingBox {
        BoundingBox::new(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn from_points() {
        let target = BoundingBox::from_points([
            vec3(1.0, -2.0, 3.0),
            vec3(-1.0, 5.0, 0.0),
            vec3(0.0, 0.0, 4.0),
        ]);

        assert_eq!(vec3(-1.0, -2.0, 0.0), target.min());
        assert_eq!(vec3(1.0, 5.0, 4.0), target.max());
        assert_eq!(vec3(2.0, 7.0, 4.0), target.extent());
    }

    #[test]
    fn default_is_empty() {
        let target = BoundingBox::default();

        assert!(!target.is_set());
        assert_eq!(0.0, target.half_area());
        assert!(!target.overlaps(&unit()));

        let target = target + unit();

        assert_eq!(unit(), target);
    }

    #[test]
    fn overlaps() {
        let a = unit();

        // Sharing a volume
        let b = BoundingBox::new(Vec3::splat(0.5), Vec3::splat(1.5));

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        // Touching at a face
        let c = BoundingBox::new(vec3(1.0, 0.0, 0.0), vec3(2.0, 1.0, 1.0));

        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));

        // Flat box lying on a face
        let d = BoundingBox::new(vec3(0.2, 0.2, 1.0), vec3(0.4, 0.4, 1.0));

        assert!(a.overlaps(&d));

        // Disjoint
        let e = BoundingBox::new(Vec3::splat(1.1), Vec3::splat(2.0));

        assert!(!a.overlaps(&e));
        assert!(!e.overlaps(&a));
    }

    #[test]
    fn octants() {
        let target = BoundingBox::new(vec3(-2.0, 0.0, 4.0), vec3(2.0, 2.0, 8.0));
        let octants = target.octants();

        assert_eq!(
            BoundingBox::new(vec3(-2.0, 0.0, 4.0), vec3(0.0, 1.0, 6.0)),
            octants[0],
        );

        assert_eq!(
            BoundingBox::new(vec3(0.0, 0.0, 4.0), vec3(2.0, 1.0, 6.0)),
            octants[1],
        );

        assert_eq!(
            BoundingBox::new(vec3(-2.0, 1.0, 4.0), vec3(0.0, 2.0, 6.0)),
            octants[2],
        );

        assert_eq!(
            BoundingBox::new(vec3(0.0, 1.0, 6.0), vec3(2.0, 2.0, 8.0)),
            octants[7],
        );

        let volume: f32 = octants
            .iter()
            .map(|octant| octant.extent().x * octant.extent().y * octant.extent().z)
            .sum();

        assert_relative_eq!(4.0 * 2.0 * 4.0, volume);

        for octant in octants {
            assert!(target.contains_box(&octant));
        }
    }

    #[test]
    fn ray_interval() {
        let ray = Ray::new(vec3(-1.0, 0.5, 0.5), Vec3::X);
        let (near, far) = unit().ray_interval(&ray).unwrap();

        assert_relative_eq!(1.0, near);
        assert_relative_eq!(2.0, far, max_relative = 1e-5);

        // Starting inside of the box
        let ray = Ray::new(Vec3::splat(0.5), vec3(0.0, -1.0, 0.0));
        let (near, far) = unit().ray_interval(&ray).unwrap();

        assert_eq!(Ray::EPSILON, near);
        assert_relative_eq!(0.5, far, max_relative = 1e-5);

        // Pointing away
        let ray = Ray::new(vec3(-1.0, 0.5, 0.5), -Vec3::X);

        assert!(unit().ray_interval(&ray).is_none());

        // Stopping before the box
        let ray = Ray::new(vec3(-1.0, 0.5, 0.5), Vec3::X).with_maxt(0.5);

        assert!(!unit().ray_intersect(&ray));
    }

    #[test]
    fn ray_interval_along_split_plane() {
        // The ray runs exactly over the plane shared by two neighbouring
        // octants - both of them have to report a hit
        let ray = Ray::new(vec3(0.5, 0.25, -1.0), Vec3::Z);
        let [left, right, ..] = unit().octants();

        assert!(left.ray_intersect(&ray));
        assert!(right.ray_intersect(&ray));

        // ... but a parallel ray outside of the slab misses
        let ray = Ray::new(vec3(1.5, 0.25, -1.0), Vec3::Z);

        assert!(!unit().ray_intersect(&ray));
    }
}
