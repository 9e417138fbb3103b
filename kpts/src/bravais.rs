use lattice::Lattice;
use serde::{Deserialize, Serialize};

// Two-dimensional Bravais classes of the in-plane (a, b) lattice.
//
// The negative variants enumerate both senses of the high-symmetry points
// (P1 hexagonal) or describe the obtuse setting of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BravaisLattice2D {
    Square,
    Rectangular,
    CenteredRectangular,
    Hexagonal,
    HexagonalP1,
    ObliqueAcute,
    ObliqueObtuse,
    Hexagonal2,
    Hexagonal2P1,
    RhombicAcute,
    RhombicObtuse,
}

impl BravaisLattice2D {
    pub const ALL: [BravaisLattice2D; 11] = [
        BravaisLattice2D::Square,
        BravaisLattice2D::Rectangular,
        BravaisLattice2D::CenteredRectangular,
        BravaisLattice2D::Hexagonal,
        BravaisLattice2D::HexagonalP1,
        BravaisLattice2D::ObliqueAcute,
        BravaisLattice2D::ObliqueObtuse,
        BravaisLattice2D::Hexagonal2,
        BravaisLattice2D::Hexagonal2P1,
        BravaisLattice2D::RhombicAcute,
        BravaisLattice2D::RhombicObtuse,
    ];

    pub fn index(&self) -> i32 {
        match self {
            BravaisLattice2D::Square => 1,
            BravaisLattice2D::Rectangular => 2,
            BravaisLattice2D::CenteredRectangular => 3,
            BravaisLattice2D::Hexagonal => 4,
            BravaisLattice2D::HexagonalP1 => -4,
            BravaisLattice2D::ObliqueAcute => 5,
            BravaisLattice2D::ObliqueObtuse => -5,
            BravaisLattice2D::Hexagonal2 => 6,
            BravaisLattice2D::Hexagonal2P1 => -6,
            BravaisLattice2D::RhombicAcute => 7,
            BravaisLattice2D::RhombicObtuse => -7,
        }
    }

    pub fn from_index(index: i32) -> Option<BravaisLattice2D> {
        BravaisLattice2D::ALL
            .iter()
            .find(|b| b.index() == index)
            .copied()
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            BravaisLattice2D::Square => "sq",
            BravaisLattice2D::Rectangular => "rec",
            BravaisLattice2D::CenteredRectangular => "crec",
            BravaisLattice2D::Hexagonal => "hex",
            BravaisLattice2D::HexagonalP1 => "hexP1",
            BravaisLattice2D::ObliqueAcute => "obla",
            BravaisLattice2D::ObliqueObtuse => "oblo",
            BravaisLattice2D::Hexagonal2 => "hex2",
            BravaisLattice2D::Hexagonal2P1 => "hex2P1",
            BravaisLattice2D::RhombicAcute => "rhoa",
            BravaisLattice2D::RhombicObtuse => "rhoo",
        }
    }

    pub fn extended_name(&self) -> &'static str {
        match self {
            BravaisLattice2D::Square => "square",
            BravaisLattice2D::Rectangular => "rectangular",
            BravaisLattice2D::CenteredRectangular => "centered rectangular",
            BravaisLattice2D::Hexagonal => "hexagonal",
            BravaisLattice2D::HexagonalP1 => "hexagonal P1",
            BravaisLattice2D::ObliqueAcute => "oblique acute",
            BravaisLattice2D::ObliqueObtuse => "oblique obtuse",
            BravaisLattice2D::Hexagonal2 => "hexagonal2",
            BravaisLattice2D::Hexagonal2P1 => "hexagonal2P1",
            BravaisLattice2D::RhombicAcute => "rhombus acute",
            BravaisLattice2D::RhombicObtuse => "rhombus obtuse",
        }
    }

    pub fn is_rhombic(&self) -> bool {
        matches!(
            self,
            BravaisLattice2D::RhombicAcute | BravaisLattice2D::RhombicObtuse
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BravaisTolerance {
    pub length: f64, // Angstrom
    pub angle: f64,  // degree
}

impl Default for BravaisTolerance {
    fn default() -> Self {
        BravaisTolerance {
            length: 0.1,
            angle: 0.1,
        }
    }
}

// Classifies the (a, b) lattice of a cell whose slab axis is already c.
//
// Space groups 1 and 2 (no in-plane symmetry beyond inversion) turn the
// hexagonal classes into their P1 variants. Never fails.
pub fn classify_bravais_2d(
    latt: &Lattice,
    group_number: i32,
    tol: &BravaisTolerance,
) -> BravaisLattice2D {
    let lengths = latt.lengths();
    let phi = latt.angles()[2];

    let equal_len = (lengths[0] - lengths[1]).abs() <= tol.length;
    let angle_is = |target: f64| (phi - target).abs() <= tol.angle;

    let low_symmetry = group_number == 1 || group_number == 2;

    if angle_is(90.0) && equal_len {
        BravaisLattice2D::Square
    } else if angle_is(90.0) {
        BravaisLattice2D::Rectangular
    } else if equal_len && angle_is(120.0) {
        if low_symmetry {
            BravaisLattice2D::HexagonalP1
        } else {
            BravaisLattice2D::Hexagonal
        }
    } else if equal_len && angle_is(60.0) {
        if low_symmetry {
            BravaisLattice2D::Hexagonal2P1
        } else {
            BravaisLattice2D::Hexagonal2
        }
    } else if equal_len && phi > 90.0 {
        BravaisLattice2D::RhombicObtuse
    } else if equal_len && phi < 90.0 {
        BravaisLattice2D::RhombicAcute
    } else if phi > 90.0 {
        BravaisLattice2D::ObliqueObtuse
    } else {
        BravaisLattice2D::ObliqueAcute
    }
}
