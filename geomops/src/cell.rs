use crate::{safe_name_with, GeomOp, OpError};
use control::Control;
use crystal::Crystal;
use lattice::Lattice;
use log::{debug, info, warn};
use vector3::Vector3f64;

// Minimum fractional margin at the cell faces, so an atom on a face is kept
// exactly once.
const FACE_EPS: f64 = 1.0e-8;

const TOREC_TOLERANCE: f64 = 0.1;
const REPEAT_TOLERANCE: f64 = 0.01;

// Cell spanned by `rows` (each row a combination of a, b, c) filled with the
// periodic images of the atoms that fall inside it. An image within
// `tolerance` Angstrom below a lower face is kept, one within `tolerance`
// below an upper face is not. Cartesian positions are not moved.
//
// None for a non-periodic structure or a degenerate target cell.
pub fn cut(crystal: &Crystal, rows: &[[f64; 3]; 3], tolerance: f64) -> Option<Crystal> {
    let latt = crystal.get_latt();
    if !latt.is_periodic() {
        return None;
    }

    let vecs = [latt.get_vector_a(), latt.get_vector_b(), latt.get_vector_c()];

    let mut new_vecs = [Vector3f64::zeros(); 3];
    for (nv, row) in new_vecs.iter_mut().zip(rows.iter()) {
        for (v, r) in vecs.iter().zip(row.iter()) {
            *nv += *v * *r;
        }
    }

    let new_latt = Lattice::from_vectors(&new_vecs[0], &new_vecs[1], &new_vecs[2]);

    let volume = new_latt.volume().abs();
    if volume < 1.0e-8 {
        return None;
    }

    // tolerance in units of the spacing between opposite faces
    let mut margin = [0.0; 3];
    for (j, m) in margin.iter_mut().enumerate() {
        let area = new_vecs[(j + 1) % 3]
            .cross_product(&new_vecs[(j + 2) % 3])
            .norm2();
        *m = (tolerance * area / volume).max(FACE_EPS);
    }

    // old-cell translations that can reach into the new cell
    let mut lo = [0.0f64; 3];
    let mut hi = [0.0f64; 3];
    for corner in 0..8usize {
        let s = [
            (corner & 1) as f64,
            ((corner >> 1) & 1) as f64,
            ((corner >> 2) & 1) as f64,
        ];

        for k in 0..3 {
            let x: f64 = (0..3).map(|j| s[j] * rows[j][k]).sum();
            lo[k] = lo[k].min(x);
            hi[k] = hi[k].max(x);
        }
    }

    let range = |k: usize| (lo[k].floor() as i64 - 1)..=(hi[k].ceil() as i64 + 1);

    let frac: Vec<Vector3f64> = crystal
        .get_atom_positions_frac()
        .iter()
        .map(|f| Vector3f64::new(f.x - f.x.floor(), f.y - f.y.floor(), f.z - f.z.floor()))
        .collect();

    let mut candidates = Vec::new();
    let mut owners = Vec::new();

    for na in range(0) {
        for nb in range(1) {
            for nc in range(2) {
                let shift = Vector3f64::new(na as f64, nb as f64, nc as f64);

                for (i, f) in frac.iter().enumerate() {
                    candidates.push(latt.frac_to_cart(&(*f + shift)));
                    owners.push(i);
                }
            }
        }
    }

    let new_frac = new_latt.cart_to_frac_all(&candidates);

    let mut positions = Vec::new();
    let mut picked = Vec::new();

    for ((s, cart), &i) in new_frac.iter().zip(candidates.iter()).zip(owners.iter()) {
        let inside = (0..3).all(|j| s[j] >= -margin[j] && s[j] < 1.0 - margin[j]);

        if inside {
            positions.push(*cart);
            picked.push(i);
        }
    }

    debug!(
        "cut: {} of {} images inside the new cell",
        positions.len(),
        candidates.len()
    );

    let species = picked
        .iter()
        .map(|&i| crystal.get_atom_species()[i].clone())
        .collect();
    let constraints = picked.iter().map(|&i| crystal.get_constraints()[i]).collect();

    Some(Crystal::new(new_latt, positions, species).with_constraints(constraints))
}

// na x nb x nc supercell made of whole copies of the cell, positions not
// wrapped.
pub fn repeat_cells(crystal: &Crystal, n: [usize; 3]) -> Crystal {
    let latt = crystal.get_latt();
    let vecs = [latt.get_vector_a(), latt.get_vector_b(), latt.get_vector_c()];

    let mut positions = Vec::new();
    let mut species = Vec::new();
    let mut constraints = Vec::new();

    for ia in 0..n[0] {
        for ib in 0..n[1] {
            for ic in 0..n[2] {
                let shift = vecs[0] * ia as f64 + vecs[1] * ib as f64 + vecs[2] * ic as f64;

                for (i, p) in crystal.get_atom_positions().iter().enumerate() {
                    positions.push(*p + shift);
                    species.push(crystal.get_atom_species()[i].clone());
                    constraints.push(crystal.get_constraints()[i]);
                }
            }
        }
    }

    let new_latt = Lattice::from_vectors(
        &(vecs[0] * n[0] as f64),
        &(vecs[1] * n[1] as f64),
        &(vecs[2] * n[2] as f64),
    );

    Crystal::new(new_latt, positions, species).with_constraints(constraints)
}

fn check_count(op: &'static str, expected: usize, out: &Crystal) -> Result<(), OpError> {
    if out.get_n_atoms() == expected {
        Ok(())
    } else {
        Err(OpError::AtomCount {
            op,
            expected,
            found: out.get_n_atoms(),
        })
    }
}

// torec: the hexagonal plane (two equal lengths at 60 or 120 degrees) is
// replaced by the rectangle (u + v, v - u). Twice the atoms.
pub struct ToRectangular;

impl ToRectangular {
    // Lattice shift that brings the hexagonal plane to (a, b), c checked first.
    fn hexagonal_shift(latt: &Lattice) -> Option<usize> {
        let lengths = latt.lengths();
        let angles = latt.angles();

        (0..3).rev().find_map(|i| {
            let ia = (i + 1) % 3;
            let ib = (i + 2) % 3;

            let hexagonal = (angles[i] - 60.0).abs() < TOREC_TOLERANCE
                || (angles[i] - 120.0).abs() < TOREC_TOLERANCE;

            if hexagonal && (lengths[ia] - lengths[ib]).abs() < TOREC_TOLERANCE {
                Some((i + 1) % 3)
            } else {
                None
            }
        })
    }
}

impl GeomOp for ToRectangular {
    fn key(&self) -> &'static str {
        "torec"
    }

    fn process(&self, crystal: &Crystal, _args: &str, _control: &Control) -> Result<Crystal, OpError> {
        if !crystal.is_periodic() {
            return Err(OpError::NonPeriodic(self.key()));
        }

        let shift = ToRectangular::hexagonal_shift(crystal.get_latt()).ok_or_else(|| {
            let l = crystal.get_latt().lengths();
            let a = crystal.get_latt().angles();
            OpError::InvalidArgument {
                op: self.key(),
                value: format!(
                    "no hexagonal plane in ({:.3} {:.3} {:.3} {:.2} {:.2} {:.2})",
                    l[0], l[1], l[2], a[0], a[1], a[2]
                ),
            }
        })?;

        let base = [[1.0, 1.0, 0.0], [-1.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

        let mut rows = [[0.0; 3]; 3];
        for (row, b) in rows.iter_mut().zip(base.iter()) {
            for (k, v) in row.iter_mut().enumerate() {
                *v = b[(k + 3 - shift) % 3];
            }
        }

        let out = cut(crystal, &rows, TOREC_TOLERANCE).ok_or(OpError::NonPeriodic(self.key()))?;

        check_count(self.key(), 2 * crystal.get_n_atoms(), &out)?;

        info!("torec: {} -> {} atoms", crystal.get_n_atoms(), out.get_n_atoms());

        Ok(out)
    }

    fn output_suffix(&self, _args: &str) -> String {
        "_Rect".to_string()
    }
}

// repeat: "na,nb,nc[,opt]". Factors may be fractions such as 1/2, which cut
// the cell down. `opt` is the face tolerance in Angstrom (default 0.01, then
// 0 is tried), or -1 to stack whole unwrapped copies.
pub struct Repeat;

impl Repeat {
    fn parse_factor(&self, tok: &str) -> Result<f64, OpError> {
        let mut parts = tok.split('/').map(|p| p.trim().parse::<f64>());

        let first = match parts.next() {
            Some(Ok(v)) => v,
            _ => return Err(self.invalid(tok)),
        };

        parts.try_fold(first, |acc, p| match p {
            Ok(d) if d != 0.0 => Ok(acc / d),
            _ => Err(self.invalid(tok)),
        })
    }

    fn invalid(&self, value: &str) -> OpError {
        OpError::InvalidArgument {
            op: self.key(),
            value: value.to_string(),
        }
    }
}

impl GeomOp for Repeat {
    fn key(&self) -> &'static str {
        "repeat"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["r"]
    }

    fn process(&self, crystal: &Crystal, args: &str, _control: &Control) -> Result<Crystal, OpError> {
        let values = args
            .split(',')
            .map(|t| self.parse_factor(t))
            .collect::<Result<Vec<f64>, OpError>>()?;

        if values.len() < 3 || values.len() > 4 || values[..3].iter().any(|&f| f <= 0.0) {
            return Err(self.invalid(args));
        }

        if !crystal.is_periodic() {
            return Err(OpError::NonPeriodic(self.key()));
        }

        let factors = [values[0], values[1], values[2]];
        let opt = values.get(3).copied().unwrap_or(REPEAT_TOLERANCE);

        let expected = (crystal.get_n_atoms() as f64 * factors.iter().product::<f64>()).round() as usize;

        if opt == -1.0 {
            info!("repeat: supercell mode");

            if factors.iter().any(|f| f.fract() != 0.0) {
                return Err(self.invalid(args));
            }

            let n = [factors[0] as usize, factors[1] as usize, factors[2] as usize];
            return Ok(repeat_cells(crystal, n));
        }

        let rows = [
            [factors[0], 0.0, 0.0],
            [0.0, factors[1], 0.0],
            [0.0, 0.0, factors[2]],
        ];

        let mut last = None;

        for tolerance in [opt, 0.0] {
            let out = cut(crystal, &rows, tolerance).ok_or(OpError::NonPeriodic(self.key()))?;

            if out.get_n_atoms() == expected {
                return Ok(out);
            }

            warn!(
                "repeat: {} atoms with tolerance {}, expected {}",
                out.get_n_atoms(),
                tolerance,
                expected
            );

            last = Some(out);
        }

        Err(OpError::AtomCount {
            op: self.key(),
            expected,
            found: last.map_or(0, |c| c.get_n_atoms()),
        })
    }

    fn output_suffix(&self, args: &str) -> String {
        format!("_{}", safe_name_with(&args.replace('/', "%"), "x"))
    }
}
