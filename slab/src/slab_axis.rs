use crate::{project, Axis};
use crystal::Crystal;
use log::info;
use vector3::Vector3f64;

pub const DEFAULT_SLAB_MIN_GAP: f64 = 12.0;
pub const DEFAULT_SLAB_WRAP_PADDING: f64 = 5.0;

// Vacuum axis of a slab, None when no axis has a gap of at least `min_gap`.
//
// Axes are tried in the order c, b, a and the first hit wins, whatever the
// gap sizes on the other axes. A non-periodic structure is a slab along c.
pub fn identify_slab_axis(crystal: &Crystal, min_gap: f64) -> Option<Axis> {
    find_slab_gap(crystal, min_gap).map(|(axis, _)| axis)
}

// Same as `identify_slab_axis`, but a slab whose vacuum gap sits inside the
// cell is translated along the slab axis and wrapped so that the vacuum
// crosses the cell boundary. Mutates `crystal`.
pub fn wrap_separated_slab(crystal: &mut Crystal, min_gap: f64, padding: f64) -> Option<Axis> {
    let (axis, shift) = find_slab_gap(crystal, min_gap)?;

    if let Some(shift) = shift.map(|s| s + padding) {
        info!(
            "separated slab, shifting {:.3} A in {} axis",
            shift, axis
        );

        let slen = crystal.get_latt().lengths()[axis.index()];

        let mut frac = Vector3f64::zeros();
        frac[axis.index()] = shift / slen;

        let cart = crystal.get_latt().frac_to_cart(&frac);

        crystal.translate(&cart);
        crystal.wrap();
    }

    Some(axis)
}

// slab axis and, when the largest gap is not the wrap-around one, the
// unpadded shift that moves it onto the cell boundary
fn find_slab_gap(crystal: &Crystal, min_gap: f64) -> Option<(Axis, Option<f64>)> {
    if !crystal.is_periodic() {
        return Some((Axis::C, None));
    }

    let proj = project(crystal, false);
    let natoms = crystal.get_n_atoms();

    for axis in [Axis::C, Axis::B, Axis::A] {
        let ax = axis.index();

        let (imax, maxgap) = proj.max_gap(ax)?;

        if maxgap >= min_gap {
            let shift = if imax + 1 < natoms {
                let above = proj.get_sorted_positions(ax)[imax + 1];
                Some(proj.get_cell_lengths()[ax] - above)
            } else {
                None
            };

            return Some((axis, shift));
        }
    }

    None
}
