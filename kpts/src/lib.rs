mod bravais;
pub use bravais::*;

mod table;
pub use table::*;

mod kpath2d;
pub use kpath2d::*;

mod line;
pub use line::*;

mod output;
pub use output::*;

use lattice::Lattice;
use symmetry::SymmetryError;
use thiserror::Error;
use vector3::Vector3f64;

#[derive(Debug, Error)]
pub enum KPathError {
    #[error("could not get symmetry info: {0}")]
    Symmetry(#[from] SymmetryError),
    #[error("rhombic cell with gamma = {angle:.4} degree has no finite C point")]
    DegenerateRhombicCell { angle: f64 },
    #[error("path segment refers to unknown point '{0}'")]
    UnknownPoint(String),
    #[error("'{text}': invalid k-point coordinate '{value}'")]
    InvalidCoordinate { text: String, value: String },
    #[error("unsupported k-path format '{0}'")]
    UnsupportedFormat(String),
    #[error("cannot read k-path file: {0}")]
    Io(#[from] std::io::Error),
}

// K-point provider interface.
pub trait KPTS {
    fn get_k_frac(&self, k_index: usize) -> Vector3f64;
    fn get_k_degeneracy(&self, k_index: usize) -> usize;
    fn get_k_weight(&self, k_index: usize) -> f64;
    fn get_n_kpts(&self) -> usize;
    fn frac_to_cart(&self, k_frac: &Vector3f64, blatt: &Lattice) -> Vector3f64;
    fn display(&self);
}
