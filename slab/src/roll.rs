use crate::Axis;
use crystal::Crystal;
use log::warn;

// Cyclically renames the lattice vectors so that `src` becomes `tgt`.
// Rolling a to c gives a->c, b->a, c->b. Atom fractional coordinates are
// wrapped into the cell and rolled the same way.
//
// Per-atom constraints are not carried over unless src == tgt.
pub fn roll_axes(crystal: &Crystal, src: Axis, tgt: Axis) -> Crystal {
    if src == tgt {
        return crystal.clone();
    }

    if crystal.has_constraints() {
        warn!("rolling {} -> {}, constraints are not preserved", src, tgt);
    }

    let shift = (tgt.index() + 3 - src.index()) % 3;

    let species = crystal.get_atom_species().to_vec();

    // no fractional frame, relabel the Cartesian components instead
    if !crystal.is_periodic() {
        let positions = crystal
            .get_atom_positions()
            .iter()
            .map(|p| p.rolled(shift))
            .collect();

        return Crystal::new(crystal.get_latt().clone(), positions, species);
    }

    let mut wrapped = crystal.clone();
    wrapped.wrap();

    let frac: Vec<_> = wrapped
        .get_atom_positions_frac()
        .iter()
        .map(|f| f.rolled(shift))
        .collect();

    Crystal::from_frac(crystal.get_latt().rolled(shift), &frac, species)
}
