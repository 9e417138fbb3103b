use crate::{BravaisLattice2D, KPathError};
use log::warn;
use serde::{Deserialize, Serialize};
use vector3::Vector3f64;

use std::fs;
use std::path::Path;

pub const GAMMA: &str = "GAMMA";

// Label and fractional reciprocal coordinates of a special k-point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighSymmetryPoint {
    pub label: String,
    pub k_frac: Vector3f64,
}

// Named points plus the ordered (from, to) segments of a band path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathTable {
    points: Vec<HighSymmetryPoint>,
    segments: Vec<(String, String)>,
}

impl PathTable {
    pub fn new() -> PathTable {
        PathTable::default()
    }

    // Fixed table of the 2-D class. The C point of the rhombic classes is
    // left at the origin, see `rhombic_c_point`.
    pub fn for_bravais(bravais: BravaisLattice2D) -> PathTable {
        match bravais {
            BravaisLattice2D::Square => build_table(
                &[
                    (GAMMA, [0.0, 0.0, 0.0]),
                    ("M", [0.5, 0.5, 0.0]),
                    ("X", [0.5, 0.0, 0.0]),
                    ("Y", [0.0, 0.5, 0.0]),
                ],
                &[
                    ("M", GAMMA),
                    (GAMMA, "X"),
                    ("X", "M"),
                    ("M", "Y"),
                    ("Y", GAMMA),
                ],
            ),

            BravaisLattice2D::Rectangular => build_table(
                &[
                    (GAMMA, [0.0, 0.0, 0.0]),
                    ("X", [0.5, 0.0, 0.0]),
                    ("Y", [0.0, 0.5, 0.0]),
                    ("S", [0.5, 0.5, 0.0]),
                ],
                &[
                    ("S", "X"),
                    ("X", GAMMA),
                    (GAMMA, "S"),
                    ("S", "Y"),
                    ("Y", GAMMA),
                ],
            ),

            BravaisLattice2D::CenteredRectangular => build_table(
                &[
                    (GAMMA, [0.0, 0.0, 0.0]),
                    ("X", [0.5, 0.5, 0.0]),
                    ("Y1", [0.25, 0.75, 0.0]),
                    ("Y", [-0.25, 0.25, 0.0]),
                    ("C", [0.0, 0.5, 0.0]),
                ],
                &[("Y1", "X"), ("X", GAMMA), (GAMMA, "Y"), ("Y", "C")],
            ),

            BravaisLattice2D::Hexagonal => build_table(
                &[
                    (GAMMA, [0.0, 0.0, 0.0]),
                    ("M", [0.5, 0.0, 0.0]),
                    ("K", [1.0 / 3.0, 1.0 / 3.0, 0.0]),
                ],
                &[("K", "M"), ("M", GAMMA), (GAMMA, "K")],
            ),

            BravaisLattice2D::HexagonalP1 => build_table(
                &[
                    (GAMMA, [0.0, 0.0, 0.0]),
                    ("M", [0.5, 0.0, 0.0]),
                    ("K", [1.0 / 3.0, 1.0 / 3.0, 0.0]),
                    ("M'", [0.0, 0.5, 0.0]),
                ],
                &[
                    ("K", "M"),
                    ("M", GAMMA),
                    (GAMMA, "K"),
                    ("K", "M'"),
                    ("M'", GAMMA),
                ],
            ),

            BravaisLattice2D::Hexagonal2 => build_table(
                &[
                    (GAMMA, [0.0, 0.0, 0.0]),
                    ("M", [0.5, 0.0, 0.0]),
                    ("K", [2.0 / 3.0, 1.0 / 3.0, 0.0]),
                ],
                &[("M", "K"), ("K", GAMMA), (GAMMA, "M")],
            ),

            BravaisLattice2D::Hexagonal2P1 => build_table(
                &[
                    (GAMMA, [0.0, 0.0, 0.0]),
                    ("M", [0.5, 0.0, 0.0]),
                    ("K", [2.0 / 3.0, 1.0 / 3.0, 0.0]),
                    ("M'", [0.0, 0.5, 0.0]),
                    ("K'", [1.0 / 3.0, 2.0 / 3.0, 0.0]),
                ],
                &[
                    (GAMMA, "M"),
                    ("M", "K"),
                    ("K", GAMMA),
                    (GAMMA, "M'"),
                    ("M'", "K'"),
                    ("K'", GAMMA),
                ],
            ),

            BravaisLattice2D::ObliqueAcute => build_table(
                &[
                    (GAMMA, [0.0, 0.0, 0.0]),
                    ("X", [0.5, 0.0, 0.0]),
                    ("Y", [0.0, 0.5, 0.0]),
                    ("A", [0.5, 0.5, 0.0]),
                ],
                &[("X", GAMMA), (GAMMA, "Y"), ("A", GAMMA)],
            ),

            BravaisLattice2D::ObliqueObtuse => build_table(
                &[
                    (GAMMA, [0.0, 0.0, 0.0]),
                    ("X", [0.5, 0.0, 0.0]),
                    ("Y", [0.0, 0.5, 0.0]),
                    ("A", [0.5, -0.5, 0.0]),
                ],
                &[("A", GAMMA), (GAMMA, "X"), (GAMMA, "Y")],
            ),

            BravaisLattice2D::RhombicAcute => build_table(
                &[
                    (GAMMA, [0.0, 0.0, 0.0]),
                    ("X", [0.5, 0.0, 0.0]),
                    ("Y", [0.0, 0.5, 0.0]),
                    ("A", [0.5, 0.5, 0.0]),
                    ("C", [0.0, 0.0, 0.0]),
                ],
                &[
                    ("C", "X"),
                    ("X", GAMMA),
                    (GAMMA, "C"),
                    ("C", "A"),
                    ("A", GAMMA),
                ],
            ),

            BravaisLattice2D::RhombicObtuse => build_table(
                &[
                    (GAMMA, [0.0, 0.0, 0.0]),
                    ("X", [0.5, 0.0, 0.0]),
                    ("Y", [0.0, 0.5, 0.0]),
                    ("A", [0.5, -0.5, 0.0]),
                    ("C", [0.0, 0.0, 0.0]),
                ],
                &[
                    ("C", "X"),
                    ("X", GAMMA),
                    (GAMMA, "C"),
                    ("C", "A"),
                    ("A", GAMMA),
                ],
            ),
        }
    }

    pub fn get_points(&self) -> &[HighSymmetryPoint] {
        &self.points
    }

    pub fn get_point(&self, label: &str) -> Option<Vector3f64> {
        self.points
            .iter()
            .find(|p| p.label == label)
            .map(|p| p.k_frac)
    }

    // Adds the point, or moves it when the label already exists.
    pub fn set_point(&mut self, label: &str, k_frac: Vector3f64) {
        match self.points.iter_mut().find(|p| p.label == label) {
            Some(p) => p.k_frac = k_frac,
            None => self.points.push(HighSymmetryPoint {
                label: label.to_string(),
                k_frac,
            }),
        }
    }

    pub fn get_segments(&self) -> &[(String, String)] {
        &self.segments
    }

    pub fn get_n_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn push_segment(&mut self, from: &str, to: &str) {
        self.segments.push((from.to_string(), to.to_string()));
    }

    // Coordinates of both ends of every segment.
    pub fn segment_coords(&self) -> Result<Vec<(Vector3f64, Vector3f64)>, KPathError> {
        self.segments
            .iter()
            .map(|(from, to)| {
                let k1 = self
                    .get_point(from)
                    .ok_or_else(|| KPathError::UnknownPoint(from.clone()))?;
                let k2 = self
                    .get_point(to)
                    .ok_or_else(|| KPathError::UnknownPoint(to.clone()))?;

                Ok((k1, k2))
            })
            .collect()
    }

    // User path, one segment per line or '@'-separated:
    //
    //   From kx ky kz To kx ky kz
    //
    // Lines without exactly 8 fields are skipped.
    pub fn parse_segments(text: &str) -> Result<PathTable, KPathError> {
        let mut table = PathTable::new();

        for line in text.split(|c: char| c == '\n' || c == '@') {
            let s: Vec<&str> = line.split_whitespace().collect();

            if s.len() != 8 {
                if !line.trim().is_empty() {
                    warn!("'{}' is ignored", line);
                }
                continue;
            }

            let k1 = parse_k(line, &s[1..4])?;
            let k2 = parse_k(line, &s[5..8])?;

            table.set_point(s[0], k1);
            table.set_point(s[4], k2);
            table.push_segment(s[0], s[4]);
        }

        Ok(table)
    }

    // `option` is either a path file or an inline '@'-separated path.
    pub fn from_user_option(option: &str) -> Result<PathTable, KPathError> {
        if Path::new(option).is_file() {
            let content = fs::read_to_string(option)?;
            PathTable::parse_segments(&content)
        } else {
            PathTable::parse_segments(option)
        }
    }
}

fn build_table(points: &[(&str, [f64; 3])], segments: &[(&str, &str)]) -> PathTable {
    let mut table = PathTable::new();

    for (label, k) in points.iter() {
        table.set_point(label, Vector3f64::from(*k));
    }

    for (from, to) in segments.iter() {
        table.push_segment(from, to);
    }

    table
}

fn parse_k(text: &str, fields: &[&str]) -> Result<Vector3f64, KPathError> {
    let mut k = Vector3f64::zeros();

    for (i, v) in fields.iter().enumerate() {
        k[i] = v.parse::<f64>().map_err(|_| KPathError::InvalidCoordinate {
            text: text.to_string(),
            value: v.to_string(),
        })?;
    }

    Ok(k)
}

// Extra C point of the rhombic classes from the in-plane angle gamma:
//
//   alpha = (180 - gamma) / 2
//   k = 1 / (2 (sign cos(180 - 2 alpha) + 1))
//   C = (1 - k, sign k, 0)
//
// with sign = +1 for the acute and -1 for the obtuse class.
pub fn rhombic_c_point(bravais: BravaisLattice2D, gamma: f64) -> Result<Vector3f64, KPathError> {
    let sign = if bravais.index() < 0 { -1.0 } else { 1.0 };

    let alpha = (180.0 - gamma) / 2.0;
    let denom = 2.0 * (sign * (180.0 - 2.0 * alpha).to_radians().cos() + 1.0);

    if denom.abs() < 1.0e-8 {
        return Err(KPathError::DegenerateRhombicCell { angle: gamma });
    }

    let k = 1.0 / denom;

    Ok(Vector3f64::new(1.0 - k, sign * k, 0.0))
}
