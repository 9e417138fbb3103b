use crate::*;
use log::{debug, warn};

// Tolerance scale applied after a search whose rotations are not closed.
const TOLERANCE_REDUCTION: f64 = 0.95;
const MAX_ATTEMPTS: usize = 200;

// Symmetry finder working directly on the atom list.
//
// 1. enumerate integer rotations with entries in {-1, 0, 1} that keep the
//    lattice lengths and angles within the tolerance
// 2. seed translations by mapping one anchor atom onto every atom of its type
// 3. keep (R, t) that send every atom onto an atom of the same type within
//    the tolerance in Angstrom (nearest periodic image)
// 4. if the rotations do not form a group, shrink the tolerance and repeat
// 5. identify the point group from the rotation-type counts
//
// The space group is reported only when the point group fixes it (P1, P-1),
// otherwise its number is 0. The primitive cell is the input cell.
#[derive(Debug, Default, Clone, Copy)]
pub struct OperationSearch;

impl OperationSearch {
    pub fn new() -> OperationSearch {
        OperationSearch
    }
}

impl SymmetryAnalyzer for OperationSearch {
    fn get_dataset(
        &self,
        latt: &Lattice,
        positions: &[Vector3f64],
        types: &[i32],
        symprec: f64,
    ) -> Result<SymmetryDataset, SymmetryError> {
        check_inputs(latt, positions, types, symprec)?;

        let positions: Vec<Vector3f64> = positions.iter().map(wrap_vector).collect();

        let mut tolerance = symprec;
        let mut last_err = SymmetryError::NoOperationsDetected;

        for attempt in 0..MAX_ATTEMPTS {
            match search_operations(latt, &positions, types, tolerance) {
                Ok((operations, pg)) => {
                    if attempt > 0 {
                        warn!(
                            "symmetry tolerance reduced from {} to {:.6} Angstrom",
                            symprec, tolerance
                        );
                    }

                    let (international, number) = space_group_of(pg);

                    debug!(
                        "{} operations, point group {}, space group {}",
                        operations.len(),
                        pg.symbol,
                        number
                    );

                    return Ok(SymmetryDataset::new(
                        international,
                        number,
                        pg.symbol,
                        operations,
                        latt.clone(),
                        positions,
                        types.to_vec(),
                    ));
                }

                Err(e) if is_retryable(&e) => {
                    debug!("{} at tolerance {:.6}, reducing", e, tolerance);
                    last_err = e;
                    tolerance *= TOLERANCE_REDUCTION;
                }

                Err(e) => return Err(e),
            }
        }

        Err(last_err)
    }
}

fn is_retryable(err: &SymmetryError) -> bool {
    matches!(
        err,
        SymmetryError::NotClosed { .. } | SymmetryError::UnknownPointGroup(_)
    )
}

// Only the triclinic point groups fix the space-group type.
fn space_group_of(pg: &PointGroup) -> (&'static str, i32) {
    match pg.symbol {
        "1" => ("P1", 1),
        "-1" => ("P-1", 2),
        _ => ("", 0),
    }
}

fn search_operations(
    latt: &Lattice,
    positions: &[Vector3f64],
    types: &[i32],
    symprec: f64,
) -> Result<(Vec<SymOp>, &'static PointGroup), SymmetryError> {
    let rotations = lattice_rotations(latt, symprec);

    debug!("{} metric-preserving rotations", rotations.len());

    let mut operations: Vec<SymOp> = Vec::new();

    for rot in rotations.iter() {
        let anchor = rotate(rot, &positions[0]);

        for (j, target) in positions.iter().enumerate() {
            if types[j] != types[0] {
                continue;
            }

            let op = SymOp::new(*rot, *target - anchor);

            let duplicate = operations.iter().any(|o| {
                o.rotation() == op.rotation()
                    && cart_distance(latt, &(o.translation() - op.translation())) < symprec
            });

            if !duplicate && maps_all_atoms(latt, &op, positions, types, symprec) {
                operations.push(op);
            }
        }
    }

    if operations.is_empty() {
        return Err(SymmetryError::NoOperationsDetected);
    }

    let mut point_ops: Vec<Rotation> = Vec::new();
    for op in operations.iter() {
        if !point_ops.contains(op.rotation()) {
            point_ops.push(*op.rotation());
        }
    }

    check_closure(&point_ops)?;

    let counts = rotation_type_counts(&point_ops);

    let pg = find_point_group(&counts).ok_or(SymmetryError::UnknownPointGroup(counts))?;

    Ok((operations, pg))
}

// Rotations R whose transformed basis a'_i = sum_k R_ki a_k keeps every
// length within `symprec` and every angle within `symprec` measured as the
// sideways shift sin(d_theta) (|a_i| + |a_j|) / 2.
fn lattice_rotations(latt: &Lattice, symprec: f64) -> Vec<Rotation> {
    let vecs = [latt.get_vector_a(), latt.get_vector_b(), latt.get_vector_c()];
    let lengths = latt.lengths();

    let mut out = Vec::new();

    for code in 0..3usize.pow(9) {
        let mut x = code;
        let mut r = [[0i32; 3]; 3];

        for row in r.iter_mut() {
            for v in row.iter_mut() {
                *v = (x % 3) as i32 - 1;
                x /= 3;
            }
        }

        let det = determinant(&r);
        if det != 1 && det != -1 {
            continue;
        }

        let mut rvecs = [Vector3f64::zeros(); 3];
        for (i, rv) in rvecs.iter_mut().enumerate() {
            for (k, v) in vecs.iter().enumerate() {
                *rv += *v * r[k][i] as f64;
            }
        }

        if keeps_metric(&vecs, &rvecs, &lengths, symprec) {
            out.push(r);
        }
    }

    out
}

fn keeps_metric(
    vecs: &[Vector3f64; 3],
    rvecs: &[Vector3f64; 3],
    lengths: &[f64; 3],
    symprec: f64,
) -> bool {
    let rlengths = [rvecs[0].norm2(), rvecs[1].norm2(), rvecs[2].norm2()];

    for i in 0..3 {
        if (rlengths[i] - lengths[i]).abs() > symprec {
            return false;
        }
    }

    for (i, j) in [(0, 1), (0, 2), (1, 2)] {
        let cos0 = vecs[i].dot_product(&vecs[j]) / (lengths[i] * lengths[j]);
        let cos1 = rvecs[i].dot_product(&rvecs[j]) / (rlengths[i] * rlengths[j]);

        let sin0 = (1.0 - cos0 * cos0).max(0.0).sqrt();
        let sin1 = (1.0 - cos1 * cos1).max(0.0).sqrt();

        // sin(theta1 - theta0)
        let dsin = sin1 * cos0 - cos1 * sin0;

        if dsin.abs() * 0.5 * (lengths[i] + lengths[j]) > symprec {
            return false;
        }
    }

    true
}

// Every atom lands on a distinct atom of the same type.
fn maps_all_atoms(
    latt: &Lattice,
    op: &SymOp,
    positions: &[Vector3f64],
    types: &[i32],
    symprec: f64,
) -> bool {
    let mut used = vec![false; positions.len()];

    for (i, pos) in positions.iter().enumerate() {
        let mapped = op.apply(pos);

        let found = (0..positions.len()).find(|&j| {
            !used[j]
                && types[j] == types[i]
                && cart_distance(latt, &(mapped - positions[j])) < symprec
        });

        match found {
            Some(j) => used[j] = true,
            None => return false,
        }
    }

    true
}

fn check_closure(rotations: &[Rotation]) -> Result<(), SymmetryError> {
    for (left, r1) in rotations.iter().enumerate() {
        for (right, r2) in rotations.iter().enumerate() {
            if !rotations.contains(&multiply(r1, r2)) {
                return Err(SymmetryError::NotClosed { left, right });
            }
        }
    }

    Ok(())
}

fn cart_distance(latt: &Lattice, dfrac: &Vector3f64) -> f64 {
    latt.frac_to_cart(&nearest_image(dfrac)).norm2()
}
