use vector3::Vector3f64;

/// Integer 3x3 rotation acting on fractional coordinates.
pub type Rotation = [[i32; 3]; 3];

pub const IDENTITY: Rotation = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];

/// Affine operation `x' = R x + t` in fractional coordinates, `t` in [0, 1).
#[derive(Debug, Clone, PartialEq)]
pub struct SymOp {
    rotation: Rotation,
    translation: Vector3f64,
}

impl SymOp {
    pub fn new(rotation: Rotation, translation: Vector3f64) -> SymOp {
        SymOp {
            rotation,
            translation: wrap_vector(&translation),
        }
    }

    pub fn identity() -> SymOp {
        SymOp::new(IDENTITY, Vector3f64::zeros())
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    pub fn translation(&self) -> Vector3f64 {
        self.translation
    }

    // not reduced into the cell
    pub fn apply(&self, v: &Vector3f64) -> Vector3f64 {
        rotate(&self.rotation, v) + self.translation
    }
}

pub fn determinant(r: &Rotation) -> i32 {
    r[0][0] * (r[1][1] * r[2][2] - r[1][2] * r[2][1])
        - r[0][1] * (r[1][0] * r[2][2] - r[1][2] * r[2][0])
        + r[0][2] * (r[1][0] * r[2][1] - r[1][1] * r[2][0])
}

pub fn trace(r: &Rotation) -> i32 {
    r[0][0] + r[1][1] + r[2][2]
}

pub fn multiply(lhs: &Rotation, rhs: &Rotation) -> Rotation {
    let mut out = [[0; 3]; 3];

    for i in 0..3 {
        for j in 0..3 {
            out[i][j] = (0..3).map(|k| lhs[i][k] * rhs[k][j]).sum();
        }
    }

    out
}

pub fn rotate(r: &Rotation, v: &Vector3f64) -> Vector3f64 {
    let mut out = Vector3f64::zeros();

    for i in 0..3 {
        out[i] = r[i][0] as f64 * v.x + r[i][1] as f64 * v.y + r[i][2] as f64 * v.z;
    }

    out
}

pub fn wrap_vector(v: &Vector3f64) -> Vector3f64 {
    let mut out = *v;

    for i in 0..3 {
        out[i] = v[i] - v[i].floor();
        if out[i] >= 1.0 {
            out[i] -= 1.0;
        }
    }

    out
}

// difference reduced to the nearest periodic image, components in [-0.5, 0.5]
pub fn nearest_image(d: &Vector3f64) -> Vector3f64 {
    let mut out = *d;

    for i in 0..3 {
        out[i] = d[i] - d[i].round();
    }

    out
}
