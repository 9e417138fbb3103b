use crate::*;
use control::Control;
use crystal::Crystal;
use log::info;
use slab::{align_slab_axis_to_z, Axis};
use symmetry::{SymmetryAnalyzer, SymmetryDataset};

// Band path of a slab together with the symmetry of the aligned cell.
#[derive(Debug, Clone)]
pub struct KPath2D {
    bravais: BravaisLattice2D,
    table: PathTable,
    spacegroup_international: String,
    spacegroup_number: i32,
    point_group: String,
    primitive_lattice: Lattice,
    primitive_positions: Vec<Vector3f64>,
    primitive_types: Vec<i32>,
}

impl KPath2D {
    pub fn get_bravais(&self) -> BravaisLattice2D {
        self.bravais
    }

    pub fn get_path_table(&self) -> &PathTable {
        &self.table
    }

    pub fn get_spacegroup_international(&self) -> &str {
        &self.spacegroup_international
    }

    pub fn get_spacegroup_number(&self) -> i32 {
        self.spacegroup_number
    }

    pub fn get_point_group(&self) -> &str {
        &self.point_group
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

    // Path text in the `kpath_format` of `control`. The aligned cell has its
    // slab axis, and the path its out-of-plane direction, along c.
    pub fn render(&self, control: &Control) -> Result<KPathWriter, KPathError> {
        let format = control.get_kpath_format().parse::<KPathFormat>()?;

        let (writer, _) = write_path(&self.table, format, Some(Axis::C), Some(Axis::C))?;

        Ok(writer)
    }

    pub fn display(&self) {
        println!("   {:-^88}", " 2d k-path ");
        println!();
        println!(
            "   bravais          = {} ({}, {})",
            self.bravais.extended_name(),
            self.bravais.short_name(),
            self.bravais.index()
        );
        if self.spacegroup_number > 0 {
            println!(
                "   spacegroup       = {} ({})",
                self.spacegroup_international, self.spacegroup_number
            );
        }
        println!("   point group      = {}", self.point_group);
        println!();

        for p in self.table.get_points().iter() {
            println!(
                "   {:<8} {:12.6} {:12.6} {:12.6}",
                p.label, p.k_frac.x, p.k_frac.y, p.k_frac.z
            );
        }

        println!();

        let path: Vec<String> = self
            .table
            .get_segments()
            .iter()
            .map(|(from, to)| format!("{}-{}", from, to))
            .collect();

        println!("   path             = {}", path.join(", "));
        println!();
    }
}

// Path table of `bravais` for a cell aligned with its slab axis along z.
// The rhombic classes get their C point from the in-plane angle.
pub fn build_path(
    crystal: &Crystal,
    bravais: BravaisLattice2D,
    dataset: &SymmetryDataset,
) -> Result<KPath2D, KPathError> {
    let mut table = PathTable::for_bravais(bravais);

    if bravais.is_rhombic() {
        let gamma = crystal.get_latt().angles()[2];
        table.set_point("C", rhombic_c_point(bravais, gamma)?);
    }

    Ok(KPath2D {
        bravais,
        table,
        spacegroup_international: dataset.get_international().to_string(),
        spacegroup_number: dataset.get_spacegroup_number(),
        point_group: dataset.get_point_group().to_string(),
        primitive_lattice: dataset.get_primitive_lattice().clone(),
        primitive_positions: dataset.get_primitive_positions().to_vec(),
        primitive_types: dataset.get_primitive_types().to_vec(),
    })
}

// Aligns the slab axis to z, looks up the symmetry of the aligned cell,
// classifies its 2-D lattice and builds the path. Returns the aligned crystal
// with the path.
pub fn kpath_2d(
    crystal: &Crystal,
    slab_axis: Axis,
    analyzer: &dyn SymmetryAnalyzer,
    control: &Control,
) -> Result<(Crystal, KPath2D), KPathError> {
    let aligned = align_slab_axis_to_z(crystal, slab_axis);

    let dataset = analyzer.get_dataset(
        aligned.get_latt(),
        &aligned.get_atom_positions_frac(),
        &aligned.get_atom_types(),
        control.get_symprec(),
    )?;

    let tol = BravaisTolerance {
        length: control.get_bravais_length_tolerance(),
        angle: control.get_bravais_angle_tolerance(),
    };

    let bravais = classify_bravais_2d(aligned.get_latt(), dataset.get_spacegroup_number(), &tol);

    info!(
        "[kpath-2d] {}({}) ({:.2} degree)",
        bravais.extended_name(),
        bravais.index(),
        aligned.get_latt().angles()[2]
    );

    let kpath = build_path(&aligned, bravais, &dataset)?;

    Ok((aligned, kpath))
}
