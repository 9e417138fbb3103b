use itertools::Itertools;
use lattice::Lattice;
use vector3::*;

// Wrapped fractional coordinates land in [-WRAP_EPS, 1 - WRAP_EPS), so atoms
// sitting numerically on the upper cell face come back to 0 and not to 1.
const WRAP_EPS: f64 = 1.0e-7;

// Per-atom constraint metadata. Carried through read-only analysis untouched
// and never interpreted by the geometry code.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Constraint {
    #[default]
    Free,
    Fixed,
    // true components are held fixed
    Mask([bool; 3]),
}

// Periodic atomic structure.
//
// Coordinates:
// - lattice vectors stored in Angstrom, a zero lattice means non-periodic
// - atomic positions stored in Cartesian coordinates (Angstrom)
// - helper conversions provide fractional views when needed
#[derive(Debug, Default, Clone)]
pub struct Crystal {
    latt: Lattice,
    atom_positions: Vec<Vector3f64>,
    atom_species: Vec<String>,
    constraints: Vec<Constraint>,
}

impl Crystal {
    pub fn new(latt: Lattice, atom_positions: Vec<Vector3f64>, atom_species: Vec<String>) -> Crystal {
        assert_eq!(
            atom_positions.len(),
            atom_species.len(),
            "every atom needs exactly one position and one specie"
        );

        let constraints = vec![Constraint::Free; atom_positions.len()];

        Crystal {
            latt,
            atom_positions,
            atom_species,
            constraints,
        }
    }

    pub fn from_frac(latt: Lattice, atoms_frac: &[Vector3f64], atom_species: Vec<String>) -> Crystal {
        let atom_positions = atoms_frac.iter().map(|f| latt.frac_to_cart(f)).collect();

        Crystal::new(latt, atom_positions, atom_species)
    }

    pub fn with_constraints(mut self, constraints: Vec<Constraint>) -> Crystal {
        assert_eq!(constraints.len(), self.atom_positions.len());

        self.constraints = constraints;

        self
    }

    pub fn get_latt(&self) -> &Lattice {
        &self.latt
    }

    pub fn is_periodic(&self) -> bool {
        self.latt.is_periodic()
    }

    pub fn get_n_atoms(&self) -> usize {
        self.atom_positions.len()
    }

    pub fn get_atom_positions(&self) -> &[Vector3f64] {
        &self.atom_positions
    }

    // Fractional coordinates, not reduced into [0, 1).
    pub fn get_atom_positions_frac(&self) -> Vec<Vector3f64> {
        self.latt.cart_to_frac_all(&self.atom_positions)
    }

    pub fn get_atom_species(&self) -> &[String] {
        &self.atom_species
    }

    pub fn get_constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn has_constraints(&self) -> bool {
        self.constraints.iter().any(|c| *c != Constraint::Free)
    }

    pub fn get_unique_species(&self) -> Vec<String> {
        // Preserve first-occurrence order while removing duplicates.
        self.atom_species.iter().unique().cloned().collect()
    }

    // 1-based specie index of every atom, numbered by first occurrence
    pub fn get_atom_types(&self) -> Vec<i32> {
        let unique = self.get_unique_species();

        self.atom_species
            .iter()
            .map(|sp| {
                unique
                    .iter()
                    .position(|u| u == sp)
                    .map_or(0, |isp| isp as i32 + 1)
            })
            .collect()
    }

    pub fn set_lattice_vectors(&mut self, latt: &Lattice) {
        // Cartesian positions are kept, only the cell changes.
        self.latt = latt.clone();
    }

    pub fn set_atom_positions_from_cart(&mut self, atoms_cart: &[Vector3f64]) {
        assert_eq!(atoms_cart.len(), self.atom_positions.len());

        self.atom_positions = atoms_cart.to_vec();
    }

    pub fn set_atom_positions_from_frac(&mut self, atoms_frac: &[Vector3f64]) {
        assert_eq!(atoms_frac.len(), self.atom_positions.len());

        self.atom_positions = atoms_frac.iter().map(|f| self.latt.frac_to_cart(f)).collect();
    }

    pub fn translate(&mut self, shift: &Vector3f64) {
        for pos in self.atom_positions.iter_mut() {
            *pos += *shift;
        }
    }

    // Move every atom into the primary cell. No-op for non-periodic cells.
    pub fn wrap(&mut self) {
        if !self.is_periodic() {
            return;
        }

        let wrapped: Vec<Vector3f64> = self
            .get_atom_positions_frac()
            .iter()
            .map(|f| {
                let mut w = *f;
                for i in 0..3 {
                    w[i] = wrap_fractional(f[i]);
                }
                w
            })
            .collect();

        self.set_atom_positions_from_frac(&wrapped);
    }

    // Lengthen c so that the slab gains `vacuum` Angstrom of empty space
    // measured along the normal of the (a, b) plane.
    pub fn add_vacuum(&mut self, vacuum: f64) {
        let a = self.latt.get_vector_a();
        let b = self.latt.get_vector_b();
        let c = self.latt.get_vector_c();

        let normal = a.cross_product(&b);
        let cos_theta = normal.dot_product(&c) / normal.norm2() / c.norm2();

        let length = c.norm2();
        let new_length = length + vacuum / cos_theta;

        self.latt.set_vector(2, &(c * (new_length / length)));
    }

    // New crystal without the atoms listed in `indices`.
    pub fn remove_atoms(&self, indices: &[usize]) -> Crystal {
        let keep: Vec<usize> = (0..self.get_n_atoms())
            .filter(|i| !indices.contains(i))
            .collect();

        self.select_atoms(&keep)
    }

    // New crystal made of the atoms `indices`, in that order.
    pub fn select_atoms(&self, indices: &[usize]) -> Crystal {
        Crystal {
            latt: self.latt.clone(),
            atom_positions: indices.iter().map(|&i| self.atom_positions[i]).collect(),
            atom_species: indices.iter().map(|&i| self.atom_species[i].clone()).collect(),
            constraints: indices.iter().map(|&i| self.constraints[i]).collect(),
        }
    }

    pub fn clear_constraints(&mut self) {
        for c in self.constraints.iter_mut() {
            *c = Constraint::Free;
        }
    }

    pub fn display(&self) {
        println!("   {:-^88}", " crystal structure ");
        println!();

        println!("   lattice_vectors");
        println!();

        for (name, v) in ["a", "b", "c"].iter().zip(0..3) {
            let vec = self.latt.get_vector(v);
            println!(
                "   {} = {:20.12}  {:20.12}  {:20.12}",
                name, vec.x, vec.y, vec.z
            );
        }

        println!();
        println!("   natoms = {}", self.get_n_atoms());
        println!("   atom_positions\n");
        println!("                fractional                                                cartesian (A)");
        println!();

        for (i, (frac, cart)) in self
            .get_atom_positions_frac()
            .iter()
            .zip(self.atom_positions.iter())
            .enumerate()
        {
            println!(
                "   {:<3} {:>4} : {:16.12}  {:16.12}  {:16.12}  {:20.12}  {:20.12}  {:20.12}",
                i + 1,
                self.atom_species[i],
                frac.x,
                frac.y,
                frac.z,
                cart.x,
                cart.y,
                cart.z
            );
        }

        println!();
    }
}

fn wrap_fractional(x: f64) -> f64 {
    let shifted = x + WRAP_EPS;

    shifted - shifted.floor() - WRAP_EPS
}

#[cfg(test)]
mod tests;
