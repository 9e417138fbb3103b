use std::os::raw::*;

// spglib 1.x dataset layout
#[repr(C)]
pub struct SpglibDataset {
    pub spacegroup_number: c_int,
    pub hall_number: c_int,
    pub international_symbol: [c_char; 11],
    pub hall_symbol: [c_char; 17],
    pub choice: [c_char; 6],
    pub transformation_matrix: [[f64; 3]; 3],
    pub origin_shift: [f64; 3],
    pub n_operations: c_int,
    pub rotations: *mut [[c_int; 3]; 3],
    pub translations: *mut [f64; 3],
    pub n_atoms: c_int,
    pub wyckoffs: *mut c_int,
    pub site_symmetry_symbols: *mut [c_char; 7],
    pub equivalent_atoms: *mut c_int,
    pub crystallographic_orbits: *mut c_int,
    pub primitive_lattice: [[f64; 3]; 3],
    pub mapping_to_primitive: *mut c_int,
    pub n_std_atoms: c_int,
    pub std_lattice: [[f64; 3]; 3],
    pub std_types: *mut c_int,
    pub std_positions: *mut [f64; 3],
    pub std_rotation_matrix: [[f64; 3]; 3],
    pub std_mapping_to_primitive: *mut c_int,
    pub pointgroup_symbol: [c_char; 6],
}

extern "C" {
    pub fn spg_get_dataset(
        lattice: *const [f64; 3],
        position: *const [f64; 3],
        types: *const c_int,
        num_atom: c_int,
        symprec: f64,
    ) -> *mut SpglibDataset;

    pub fn spg_free_dataset(dataset: *mut SpglibDataset);

    // in place; returns the new number of atoms, 0 on failure
    pub fn spg_standardize_cell(
        lattice: *mut [f64; 3],
        position: *mut [f64; 3],
        types: *mut c_int,
        num_atom: c_int,
        to_primitive: c_int,
        no_idealize: c_int,
        symprec: f64,
    ) -> c_int;

    pub fn spg_get_error_code() -> c_int;

    pub fn spg_get_error_message(error: c_int) -> *mut c_char;
}
