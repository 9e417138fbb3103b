mod vector3_f64;
pub use vector3_f64::*;

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

///////////////////////////////////////////////////

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: num_traits::identities::Zero + Copy> Vector3<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self {
        Vector3 { x, y, z }
    }

    #[inline]
    pub fn zeros() -> Vector3<T> {
        Vector3 {
            x: T::zero(),
            y: T::zero(),
            z: T::zero(),
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        vec![self.x, self.y, self.z]
    }

    pub fn to_array(&self) -> [T; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn set_zeros(&mut self) {
        self.x = T::zero();
        self.y = T::zero();
        self.z = T::zero();
    }

    // cyclic permutation of the components: shift = 1 maps (x, y, z) -> (z, x, y)
    pub fn rolled(&self, shift: usize) -> Vector3<T> {
        let v = self.to_array();
        let mut out = v;

        for (i, value) in v.iter().enumerate() {
            out[(i + shift) % 3] = *value;
        }

        Vector3::from(out)
    }
}

impl<T: Copy> From<[T; 3]> for Vector3<T> {
    fn from(v: [T; 3]) -> Self {
        Vector3 {
            x: v[0],
            y: v[1],
            z: v[2],
        }
    }
}

// component access by axis index: 0 -> x, 1 -> y, 2 -> z
impl<T> Index<usize> for Vector3<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 index {} out of range", i),
        }
    }
}

impl<T> IndexMut<usize> for Vector3<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vector3 index {} out of range", i),
        }
    }
}
