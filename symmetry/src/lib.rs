use lattice::Lattice;
use thiserror::Error;
use vector3::Vector3f64;

mod operation;
mod pointgroup;
mod search;

#[cfg(feature = "spglib")]
mod spglib;
#[cfg(feature = "spglib")]
mod spglib_sys;

pub use operation::*;
pub use pointgroup::*;
pub use search::*;

#[cfg(feature = "spglib")]
pub use crate::spglib::Spglib;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SymmetryError {
    #[error("structure has no atoms")]
    EmptyStructure,
    #[error("mismatched inputs: {positions} positions but {types} atom types")]
    MismatchedInputs { positions: usize, types: usize },
    #[error("lattice has zero volume")]
    NonPeriodic,
    #[error("symmetry tolerance must be positive, got {0}")]
    NonPositiveTolerance(f64),
    #[error("no symmetry operation found at the requested tolerance")]
    NoOperationsDetected,
    #[error("rotations are not closed: op {left} x op {right} is missing")]
    NotClosed { left: usize, right: usize },
    #[error("rotation-type counts {0:?} match no crystallographic point group")]
    UnknownPointGroup([usize; 10]),
    #[error("spglib: {0}")]
    Spglib(String),
}

// Symmetry information of a periodic structure. A space-group number of 0
// means the group was not determined; the point group is always set.
#[derive(Debug, Clone)]
pub struct SymmetryDataset {
    international: String,
    number: i32,
    point_group: String,
    operations: Vec<SymOp>,
    primitive_lattice: Lattice,
    primitive_positions: Vec<Vector3f64>,
    primitive_types: Vec<i32>,
}

impl SymmetryDataset {
    pub fn new(
        international: &str,
        number: i32,
        point_group: &str,
        operations: Vec<SymOp>,
        primitive_lattice: Lattice,
        primitive_positions: Vec<Vector3f64>,
        primitive_types: Vec<i32>,
    ) -> SymmetryDataset {
        SymmetryDataset {
            international: international.to_string(),
            number,
            point_group: point_group.to_string(),
            operations,
            primitive_lattice,
            primitive_positions,
            primitive_types,
        }
    }

    pub fn get_international(&self) -> &str {
        &self.international
    }

    pub fn get_spacegroup_number(&self) -> i32 {
        self.number
    }

    pub fn get_point_group(&self) -> &str {
        &self.point_group
    }

    pub fn get_n_sym_ops(&self) -> usize {
        self.operations.len()
    }

    pub fn get_operations(&self) -> &[SymOp] {
        &self.operations
    }

    pub fn get_primitive_lattice(&self) -> &Lattice {
        &self.primitive_lattice
    }

    pub fn get_primitive_positions(&self) -> &[Vector3f64] {
        &self.primitive_positions
    }

    pub fn get_primitive_types(&self) -> &[i32] {
        &self.primitive_types
    }

    pub fn display(&self) {
        println!("   {:-^88}", " symmetry ");
        println!();
        if self.number > 0 {
            println!("   spacegroup       = {} ({})", self.international, self.number);
        } else {
            println!("   spacegroup       = undetermined");
        }
        println!("   point group      = {}", self.point_group);
        println!("   n_sym_ops        = {}", self.operations.len());
        println!();

        for (i, op) in self.operations.iter().enumerate() {
            let r = op.rotation();
            let t = op.translation();

            println!(
                "   {:>4} : {:>2} {:>2} {:>2} | {:>2} {:>2} {:>2} | {:>2} {:>2} {:>2}   {:10.6} {:10.6} {:10.6}",
                i + 1,
                r[0][0],
                r[0][1],
                r[0][2],
                r[1][0],
                r[1][1],
                r[1][2],
                r[2][0],
                r[2][1],
                r[2][2],
                t.x,
                t.y,
                t.z
            );
        }

        println!();
    }
}

// Boundary to a crystallographic symmetry finder.
//
// `positions` are fractional, `types` one integer per atom, `symprec` a
// distance tolerance in Angstrom.
pub trait SymmetryAnalyzer {
    fn get_dataset(
        &self,
        latt: &Lattice,
        positions: &[Vector3f64],
        types: &[i32],
        symprec: f64,
    ) -> Result<SymmetryDataset, SymmetryError>;
}

// Analyzer used when the caller has no preference: spglib when the library
// is linked, the built-in operation search otherwise.
#[cfg(feature = "spglib")]
pub fn default_analyzer() -> Box<dyn SymmetryAnalyzer> {
    Box::new(Spglib::new())
}

#[cfg(not(feature = "spglib"))]
pub fn default_analyzer() -> Box<dyn SymmetryAnalyzer> {
    Box::new(OperationSearch::new())
}

pub(crate) fn check_inputs(
    latt: &Lattice,
    positions: &[Vector3f64],
    types: &[i32],
    symprec: f64,
) -> Result<(), SymmetryError> {
    if positions.is_empty() {
        return Err(SymmetryError::EmptyStructure);
    }

    if positions.len() != types.len() {
        return Err(SymmetryError::MismatchedInputs {
            positions: positions.len(),
            types: types.len(),
        });
    }

    if symprec <= 0.0 {
        return Err(SymmetryError::NonPositiveTolerance(symprec));
    }

    if !latt.is_periodic() {
        return Err(SymmetryError::NonPeriodic);
    }

    Ok(())
}
