use crate::spglib_sys as ffi;
use crate::*;
use log::debug;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};

// Symmetry finder backed by the spglib C library. The primitive cell is the
// one found by `spg_standardize_cell` without idealization.
#[derive(Debug, Default, Clone, Copy)]
pub struct Spglib;

impl Spglib {
    pub fn new() -> Spglib {
        Spglib
    }
}

impl SymmetryAnalyzer for Spglib {
    fn get_dataset(
        &self,
        latt: &Lattice,
        positions: &[Vector3f64],
        types: &[i32],
        symprec: f64,
    ) -> Result<SymmetryDataset, SymmetryError> {
        check_inputs(latt, positions, types, symprec)?;

        let lattice = to_spglib_lattice(latt);
        let position: Vec<[f64; 3]> = positions.iter().map(|p| p.to_array()).collect();
        let types: Vec<c_int> = types.to_vec();
        let natoms = position.len() as c_int;

        let ptr = unsafe {
            ffi::spg_get_dataset(
                lattice.as_ptr(),
                position.as_ptr(),
                types.as_ptr(),
                natoms,
                symprec,
            )
        };

        if ptr.is_null() {
            return Err(last_error());
        }

        let (number, international, point_group, operations) = {
            let ds = unsafe { &*ptr };

            let n_operations = ds.n_operations.max(0) as usize;

            let operations: Vec<SymOp> = if n_operations == 0 {
                Vec::new()
            } else {
                let rotations = unsafe { std::slice::from_raw_parts(ds.rotations, n_operations) };
                let translations =
                    unsafe { std::slice::from_raw_parts(ds.translations, n_operations) };

                rotations
                    .iter()
                    .zip(translations.iter())
                    .map(|(r, t)| SymOp::new(*r, Vector3f64::from(*t)))
                    .collect()
            };

            (
                ds.spacegroup_number,
                c_string(&ds.international_symbol),
                c_string(&ds.pointgroup_symbol),
                operations,
            )
        };

        unsafe { ffi::spg_free_dataset(ptr) };

        if number == 0 || operations.is_empty() {
            return Err(last_error());
        }

        let (primitive_lattice, primitive_positions, primitive_types) =
            primitive_cell(lattice, position, types, symprec)?;

        debug!(
            "spglib: {} ({}), point group {}, {} operations, {} atoms in the primitive cell",
            international,
            number,
            point_group,
            operations.len(),
            primitive_types.len()
        );

        Ok(SymmetryDataset::new(
            &international,
            number,
            &point_group,
            operations,
            primitive_lattice,
            primitive_positions,
            primitive_types,
        ))
    }
}

fn primitive_cell(
    mut lattice: [[f64; 3]; 3],
    mut position: Vec<[f64; 3]>,
    mut types: Vec<c_int>,
    symprec: f64,
) -> Result<(Lattice, Vec<Vector3f64>, Vec<i32>), SymmetryError> {
    let natoms = unsafe {
        ffi::spg_standardize_cell(
            lattice.as_mut_ptr(),
            position.as_mut_ptr(),
            types.as_mut_ptr(),
            position.len() as c_int,
            1,
            1,
            symprec,
        )
    };

    if natoms <= 0 {
        return Err(last_error());
    }

    let natoms = natoms as usize;
    position.truncate(natoms);
    types.truncate(natoms);

    let positions = position.into_iter().map(Vector3f64::from).collect();

    Ok((from_spglib_lattice(&lattice), positions, types))
}

// spglib stores the basis vectors as columns
fn to_spglib_lattice(latt: &Lattice) -> [[f64; 3]; 3] {
    let m = latt.as_matrix();
    let mut out = [[0.0; 3]; 3];

    for (i, row) in out.iter_mut().enumerate() {
        for (j, v) in row.iter_mut().enumerate() {
            *v = m[(i, j)];
        }
    }

    out
}

fn from_spglib_lattice(l: &[[f64; 3]; 3]) -> Lattice {
    Lattice::new(
        &[l[0][0], l[1][0], l[2][0]],
        &[l[0][1], l[1][1], l[2][1]],
        &[l[0][2], l[1][2], l[2][2]],
    )
}

fn c_string(chars: &[c_char]) -> String {
    unsafe { CStr::from_ptr(chars.as_ptr()) }
        .to_string_lossy()
        .trim()
        .to_string()
}

fn last_error() -> SymmetryError {
    let message = unsafe {
        let code = ffi::spg_get_error_code();
        let ptr = ffi::spg_get_error_message(code);

        if ptr.is_null() {
            format!("error code {}", code)
        } else {
            CStr::from_ptr(ptr).to_string_lossy().into_owned()
        }
    };

    SymmetryError::Spglib(message)
}
