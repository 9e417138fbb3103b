use crate::{determinant, trace, Rotation};

// Rotation types in the order used by the counting signature.
pub const ROTATION_TYPES: [i32; 10] = [-6, -4, -3, -2, -1, 1, 2, 3, 4, 6];

// Crystallographic point group and its rotation-type counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointGroup {
    pub symbol: &'static str,
    pub counts: [usize; 10],
}

const fn pg(symbol: &'static str, counts: [usize; 10]) -> PointGroup {
    PointGroup { symbol, counts }
}

// counts by rotation type: -6 -4 -3 -2 -1  1  2  3  4  6
pub const POINT_GROUPS: [PointGroup; 32] = [
    pg("1", [0, 0, 0, 0, 0, 1, 0, 0, 0, 0]),
    pg("-1", [0, 0, 0, 0, 1, 1, 0, 0, 0, 0]),
    pg("2", [0, 0, 0, 0, 0, 1, 1, 0, 0, 0]),
    pg("m", [0, 0, 0, 1, 0, 1, 0, 0, 0, 0]),
    pg("2/m", [0, 0, 0, 1, 1, 1, 1, 0, 0, 0]),
    pg("222", [0, 0, 0, 0, 0, 1, 3, 0, 0, 0]),
    pg("mm2", [0, 0, 0, 2, 0, 1, 1, 0, 0, 0]),
    pg("mmm", [0, 0, 0, 3, 1, 1, 3, 0, 0, 0]),
    pg("4", [0, 0, 0, 0, 0, 1, 1, 0, 2, 0]),
    pg("-4", [0, 2, 0, 0, 0, 1, 1, 0, 0, 0]),
    pg("4/m", [0, 2, 0, 1, 1, 1, 1, 0, 2, 0]),
    pg("422", [0, 0, 0, 0, 0, 1, 5, 0, 2, 0]),
    pg("4mm", [0, 0, 0, 4, 0, 1, 1, 0, 2, 0]),
    pg("-42m", [0, 2, 0, 2, 0, 1, 3, 0, 0, 0]),
    pg("4/mmm", [0, 2, 0, 5, 1, 1, 5, 0, 2, 0]),
    pg("3", [0, 0, 0, 0, 0, 1, 0, 2, 0, 0]),
    pg("-3", [0, 0, 2, 0, 1, 1, 0, 2, 0, 0]),
    pg("32", [0, 0, 0, 0, 0, 1, 3, 2, 0, 0]),
    pg("3m", [0, 0, 0, 3, 0, 1, 0, 2, 0, 0]),
    pg("-3m", [0, 0, 2, 3, 1, 1, 3, 2, 0, 0]),
    pg("6", [0, 0, 0, 0, 0, 1, 1, 2, 0, 2]),
    pg("-6", [2, 0, 0, 1, 0, 1, 0, 2, 0, 0]),
    pg("6/m", [2, 0, 2, 1, 1, 1, 1, 2, 0, 2]),
    pg("622", [0, 0, 0, 0, 0, 1, 7, 2, 0, 2]),
    pg("6mm", [0, 0, 0, 6, 0, 1, 1, 2, 0, 2]),
    pg("-6m2", [2, 0, 0, 4, 0, 1, 3, 2, 0, 0]),
    pg("6/mmm", [2, 0, 2, 7, 1, 1, 7, 2, 0, 2]),
    pg("23", [0, 0, 0, 0, 0, 1, 3, 8, 0, 0]),
    pg("m-3", [0, 0, 8, 3, 1, 1, 3, 8, 0, 0]),
    pg("432", [0, 0, 0, 0, 0, 1, 9, 8, 6, 0]),
    pg("-43m", [0, 6, 0, 6, 0, 1, 3, 8, 0, 0]),
    pg("m-3m", [0, 6, 8, 9, 1, 1, 9, 8, 6, 0]),
];

// Rotation type (n for an n-fold axis, -n for a rotoinversion) from the
// determinant and trace of an integer rotation.
pub fn rotation_type(r: &Rotation) -> Option<i32> {
    match (determinant(r), trace(r)) {
        (1, 3) => Some(1),
        (1, -1) => Some(2),
        (1, 0) => Some(3),
        (1, 1) => Some(4),
        (1, 2) => Some(6),
        (-1, -3) => Some(-1),
        (-1, 1) => Some(-2),
        (-1, 0) => Some(-3),
        (-1, -1) => Some(-4),
        (-1, -2) => Some(-6),
        _ => None,
    }
}

pub fn rotation_type_counts(rotations: &[Rotation]) -> [usize; 10] {
    let mut counts = [0; 10];

    for r in rotations.iter() {
        if let Some(ipos) = rotation_type(r).and_then(|t| ROTATION_TYPES.iter().position(|&x| x == t)) {
            counts[ipos] += 1;
        }
    }

    counts
}

pub fn find_point_group(counts: &[usize; 10]) -> Option<&'static PointGroup> {
    POINT_GROUPS.iter().find(|pg| pg.counts == *counts)
}
