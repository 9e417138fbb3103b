use crate::{GeomOp, OpError};
use control::Control;
use crystal::Crystal;
use std::cmp::Ordering;

#[rustfmt::skip]
const ELEMENTS: [&str; 118] = [
    "H", "He",
    "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar",
    "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr",
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe",
    "Cs", "Ba",
    "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu",
    "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn",
    "Fr", "Ra",
    "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr",
    "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn",
    "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

pub fn atomic_number(symbol: &str) -> Option<usize> {
    ELEMENTS.iter().position(|&e| e == symbol).map(|i| i + 1)
}

// Known elements by atomic number, anything else after them by name.
fn species_order(a: &str, b: &str) -> Ordering {
    match (atomic_number(a), atomic_number(b)) {
        (Some(za), Some(zb)) => za.cmp(&zb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

// Cartesian components on a 0.01 Angstrom grid, so that atoms of one plane
// compare equal.
fn grid(x: f64) -> i64 {
    (x * 100.0).round() as i64
}

// elsort: stable sort by element.
pub struct SortByElement;

impl GeomOp for SortByElement {
    fn key(&self) -> &'static str {
        "elsort"
    }

    fn process(&self, crystal: &Crystal, _args: &str, _control: &Control) -> Result<Crystal, OpError> {
        let species = crystal.get_atom_species();

        let mut order: Vec<usize> = (0..crystal.get_n_atoms()).collect();
        order.sort_by(|&i, &j| species_order(&species[i], &species[j]));

        Ok(crystal.select_atoms(&order))
    }

    fn output_suffix(&self, _args: &str) -> String {
        String::new()
    }
}

// zsort: stable sort by z, then y, then x.
pub struct SortByPosition;

impl GeomOp for SortByPosition {
    fn key(&self) -> &'static str {
        "zsort"
    }

    fn process(&self, crystal: &Crystal, _args: &str, _control: &Control) -> Result<Crystal, OpError> {
        let keys: Vec<(i64, i64, i64)> = crystal
            .get_atom_positions()
            .iter()
            .map(|p| (grid(p.z), grid(p.y), grid(p.x)))
            .collect();

        let mut order: Vec<usize> = (0..crystal.get_n_atoms()).collect();
        order.sort_by_key(|&i| keys[i]);

        Ok(crystal.select_atoms(&order))
    }

    fn output_suffix(&self, _args: &str) -> String {
        String::new()
    }
}
