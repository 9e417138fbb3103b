use crate::{align_slab_axis_to_z, wrap_separated_slab, Axis};
use crystal::Crystal;
use log::{info, warn};

// Aligns the slab to z and stretches c so that the empty space along z is
// `vacuum` Angstrom. A structure without a detected slab axis is aligned
// along its c axis.
pub fn set_vacuum(crystal: &Crystal, vacuum: f64, min_gap: f64, padding: f64) -> Crystal {
    let mut wrapped = crystal.clone();

    let axis = wrap_separated_slab(&mut wrapped, min_gap, padding).unwrap_or_else(|| {
        warn!("no slab axis found, using c axis");
        Axis::C
    });

    let mut aligned = align_slab_axis_to_z(&wrapped, axis);

    if !aligned.is_periodic() {
        warn!("structure is not periodic, vacuum is left unchanged");
        return aligned;
    }

    let zs: Vec<f64> = aligned.get_atom_positions().iter().map(|p| p.z).collect();

    let zdiff = match (
        zs.iter().cloned().reduce(f64::min),
        zs.iter().cloned().reduce(f64::max),
    ) {
        (Some(lo), Some(hi)) => hi - lo,
        _ => 0.0,
    };

    let zlen = aligned.get_latt().lengths()[2];

    info!(
        "setting vacuum to {:.3} A (slab thickness {:.3} A, c = {:.3} A)",
        vacuum, zdiff, zlen
    );

    aligned.add_vacuum(vacuum - zlen + zdiff);

    aligned
}
