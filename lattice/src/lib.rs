use nalgebra::{Matrix3, Vector3};
use vector3::*;

use std::{f64::consts, fmt};

// Lattice vectors a, b, c stored as the columns of a 3x3 matrix (Angstrom).
//
// A zero matrix stands for a non-periodic (molecular) cell; every helper
// below is defined for it, see `is_periodic`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    data: Matrix3<f64>,
}

impl Default for Lattice {
    fn default() -> Self {
        Lattice::zeros()
    }
}

impl Lattice {
    pub fn new(a: &[f64], b: &[f64], c: &[f64]) -> Lattice {
        let data = Matrix3::new(a[0], b[0], c[0], a[1], b[1], c[1], a[2], b[2], c[2]);

        Lattice { data }
    }

    pub fn from_vectors(a: &Vector3f64, b: &Vector3f64, c: &Vector3f64) -> Lattice {
        Lattice::new(&a.to_array(), &b.to_array(), &c.to_array())
    }

    pub fn from_matrix(data: Matrix3<f64>) -> Lattice {
        Lattice { data }
    }

    pub fn zeros() -> Lattice {
        Lattice {
            data: Matrix3::zeros(),
        }
    }

    // orthorhombic cell with edge lengths a, b, c
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Lattice {
        Lattice::new(&[a, 0.0, 0.0], &[0.0, b, 0.0], &[0.0, 0.0, c])
    }

    pub fn as_matrix(&self) -> &Matrix3<f64> {
        &self.data
    }

    pub fn as_2d_array_row_major(&self) -> [[f64; 3]; 3] {
        let mut latt = [[0.0f64; 3]; 3];

        for i in 0..3 {
            for j in 0..3 {
                latt[i][j] = self.data[(j, i)];
            }
        }

        latt
    }

    // ( a x b ) . c
    pub fn volume(&self) -> f64 {
        let a = self.get_vector_a();
        let b = self.get_vector_b();
        let c = self.get_vector_c();

        a.cross_product(&b).dot_product(&c)
    }

    pub fn is_periodic(&self) -> bool {
        self.volume() != 0.0
    }

    // ra = 2 x PI x (b x c) / volume
    // rb = 2 x PI x (c x a) / volume
    // rc = 2 x PI x (a x b) / volume
    pub fn reciprocal(&self) -> Lattice {
        let factor = 2.0 * consts::PI / self.volume();

        let a = self.get_vector_a();
        let b = self.get_vector_b();
        let c = self.get_vector_c();

        let blatt_a = b.cross_product(&c) * factor;
        let blatt_b = c.cross_product(&a) * factor;
        let blatt_c = a.cross_product(&b) * factor;

        Lattice::from_vectors(&blatt_a, &blatt_b, &blatt_c)
    }

    pub fn get_vector(&self, i: usize) -> Vector3f64 {
        let v = self.data.column(i);

        Vector3f64 {
            x: v[0],
            y: v[1],
            z: v[2],
        }
    }

    pub fn get_vector_a(&self) -> Vector3f64 {
        self.get_vector(0)
    }

    pub fn get_vector_b(&self) -> Vector3f64 {
        self.get_vector(1)
    }

    pub fn get_vector_c(&self) -> Vector3f64 {
        self.get_vector(2)
    }

    pub fn set_vector(&mut self, i: usize, v: &Vector3f64) {
        self.data.set_column(i, &Vector3::new(v.x, v.y, v.z));
    }

    // |a|, |b|, |c|
    pub fn lengths(&self) -> [f64; 3] {
        [
            self.get_vector_a().norm2(),
            self.get_vector_b().norm2(),
            self.get_vector_c().norm2(),
        ]
    }

    // alpha = angle(b, c), beta = angle(c, a), gamma = angle(a, b), in degrees
    pub fn angles(&self) -> [f64; 3] {
        let a = self.get_vector_a();
        let b = self.get_vector_b();
        let c = self.get_vector_c();

        [b.angle_deg(&c), c.angle_deg(&a), a.angle_deg(&b)]
    }

    pub fn scaled_by(&mut self, f: f64) {
        self.data.iter_mut().for_each(|v| *v *= f);
    }

    // lattice vectors cyclically moved by `shift` positions: shift = 1 gives (c, a, b)
    pub fn rolled(&self, shift: usize) -> Lattice {
        let mut out = self.clone();

        for i in 0..3 {
            out.set_vector((i + shift) % 3, &self.get_vector(i));
        }

        out
    }

    // every lattice vector rotated by `rot`
    pub fn rotated(&self, rot: &Matrix3<f64>) -> Lattice {
        Lattice {
            data: rot * self.data,
        }
    }

    pub fn frac_to_cart(&self, pos_f: &Vector3f64) -> Vector3f64 {
        let v = self.data * Vector3::new(pos_f.x, pos_f.y, pos_f.z);

        Vector3f64::new(v[0], v[1], v[2])
    }

    // Cartesian -> fractional. A singular (non-periodic) cell has no
    // fractional frame, its positions are returned unchanged.
    pub fn cart_to_frac(&self, pos_c: &Vector3f64) -> Vector3f64 {
        self.cart_to_frac_all(std::slice::from_ref(pos_c))[0]
    }

    // Same as cart_to_frac for a batch, with one inversion of the cell.
    pub fn cart_to_frac_all(&self, pos_c: &[Vector3f64]) -> Vec<Vector3f64> {
        match self.data.try_inverse() {
            Some(inv) => pos_c
                .iter()
                .map(|p| {
                    let v = inv * Vector3::new(p.x, p.y, p.z);
                    Vector3f64::new(v[0], v[1], v[2])
                })
                .collect(),
            None => pos_c.to_vec(),
        }
    }
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let a = self.get_vector_a();
        let b = self.get_vector_b();
        let c = self.get_vector_c();

        write!(f,
               "{}\n{:25.16}\t{:25.16}\t{:25.16}\n{:25.16}\t{:25.16}\t{:25.16}\n{:25.16}\t{:25.16}\t{:25.16}", "Lattice",
               a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z)
    }
}
