use crate::{roll_axes, Axis};
use crystal::Crystal;
use log::{info, warn};
use nalgebra::{Matrix3, Vector3};
use vector3::Vector3f64;

// Reference directions and weights of the rotation fit: the slab normal
// first, the in-plane vector a as a soft secondary target.
const TARGET_NORMAL: [f64; 3] = [0.0, 0.0, 1.0];
const TARGET_INPLANE: [f64; 3] = [1.0, 0.0, 0.0];
const WEIGHT_NORMAL: f64 = 1.0;
const WEIGHT_INPLANE: f64 = 0.1;

// Rotates the structure so that the slab axis points along z and a along x.
// An a or b slab axis is first rolled to c. Per-atom constraints are dropped.
pub fn align_slab_axis_to_z(crystal: &Crystal, axis: Axis) -> Crystal {
    let rolled = if axis != Axis::C {
        info!("slab axis ({}) is not c axis, rolling", axis);
        roll_axes(crystal, axis, Axis::C)
    } else {
        crystal.clone()
    };

    info!("aligning c->[001] and a->[100]");

    if rolled.has_constraints() {
        warn!("constraints are not preserved by the alignment");
    }

    let latt = rolled.get_latt();

    let rot = fit_rotation(
        &[
            (latt.get_vector_c(), TARGET_NORMAL, WEIGHT_NORMAL),
            (latt.get_vector_a(), TARGET_INPLANE, WEIGHT_INPLANE),
        ],
    );

    let positions: Vec<Vector3f64> = rolled
        .get_atom_positions()
        .iter()
        .map(|p| {
            let v = rot * Vector3::new(p.x, p.y, p.z);
            Vector3f64::new(v[0], v[1], v[2])
        })
        .collect();

    Crystal::new(
        latt.rotated(&rot),
        positions,
        rolled.get_atom_species().to_vec(),
    )
}

// Weighted least-squares rotation R minimising sum w |t - R s|^2 over the
// (source, target, weight) pairs (Kabsch). Sources enter with their length,
// so the effective weight of a lattice vector is w |s|. A proper rotation is
// always returned.
pub fn fit_rotation(pairs: &[(Vector3f64, [f64; 3], f64)]) -> Matrix3<f64> {
    let mut h = Matrix3::<f64>::zeros();

    for (src, tgt, w) in pairs.iter() {
        let s = Vector3::new(src.x, src.y, src.z);
        let t = Vector3::new(tgt[0], tgt[1], tgt[2]);

        h += *w * s * t.transpose();
    }

    // nothing to align, e.g. the zero lattice of a molecule
    if h.norm() < f64::EPSILON {
        return Matrix3::identity();
    }

    let svd = h.svd(true, true);

    let (u, v_t) = match (svd.u, svd.v_t) {
        (Some(u), Some(v_t)) => (u, v_t),
        _ => {
            warn!("rotation fit did not converge, keeping the orientation");
            return Matrix3::identity();
        }
    };

    let v = v_t.transpose();
    let ut = u.transpose();

    let d = if (v * ut).determinant() < 0.0 { -1.0 } else { 1.0 };

    v * Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, d)) * ut
}
