use crate::{safe_name, safe_name_with, GeomOp, OpError};
use control::Control;
use crystal::Crystal;
use lattice::Lattice;
use log::{debug, info};
use nalgebra::{Matrix3, Rotation3, Unit, Vector3};
use regex::Regex;
use slab::identify_slab_axis;
use vector3::Vector3f64;

fn invalid(op: &'static str, value: &str) -> OpError {
    OpError::InvalidArgument {
        op,
        value: value.to_string(),
    }
}

fn pattern(op: &'static str, re: &str) -> Result<Regex, OpError> {
    Regex::new(re).map_err(|e| invalid(op, &e.to_string()))
}

fn to_na(v: &Vector3f64) -> Vector3<f64> {
    Vector3::new(v.x, v.y, v.z)
}

// Rotation about the origin applied to the atoms, and to the cell when
// `rotate_cell` is set. Constraints are carried over as they are.
pub fn rotate_crystal(crystal: &Crystal, rot: &Matrix3<f64>, rotate_cell: bool) -> Crystal {
    let positions = crystal
        .get_atom_positions()
        .iter()
        .map(|p| {
            let v = rot * to_na(p);
            Vector3f64::new(v[0], v[1], v[2])
        })
        .collect();

    let latt = if rotate_cell {
        crystal.get_latt().rotated(rot)
    } else {
        crystal.get_latt().clone()
    };

    Crystal::new(latt, positions, crystal.get_atom_species().to_vec())
        .with_constraints(crystal.get_constraints().to_vec())
}

// Proper rotation taking the direction of `src` onto that of `tgt`. Opposite
// vectors are turned by 180 degrees about an axis normal to `tgt`.
pub fn rotation_onto(src: &Vector3f64, tgt: &Vector3f64) -> Option<Matrix3<f64>> {
    let s = to_na(src);
    let t = to_na(tgt);

    if s.norm() == 0.0 || t.norm() == 0.0 {
        return None;
    }

    if let Some(rot) = Rotation3::rotation_between(&s, &t) {
        return Some(rot.into_inner());
    }

    let mut axis = t.cross(&Vector3::x());
    if axis.norm() < 1.0e-4 {
        axis = t.cross(&Vector3::y());
    }

    Some(Rotation3::from_axis_angle(&Unit::new_normalize(axis), std::f64::consts::PI).into_inner())
}

fn cartesian_axis(c: char) -> Vector3f64 {
    match c {
        'x' => Vector3f64::new(1.0, 0.0, 0.0),
        'y' => Vector3f64::new(0.0, 1.0, 0.0),
        _ => Vector3f64::new(0.0, 0.0, 1.0),
    }
}

// Direction named by a letter: a-c the current lattice vector, x-z the
// Cartesian axis.
fn named_axis(latt: &Lattice, c: char) -> Vector3f64 {
    match c {
        'a' => latt.get_vector_a(),
        'b' => latt.get_vector_b(),
        'c' => latt.get_vector_c(),
        _ => cartesian_axis(c),
    }
}

// scale: "F" or "Fx,Fy,Fz" applied to a, b, c with the atoms following the
// cell. A single factor leaves the slab axis alone. A molecule has its
// Cartesian components scaled instead.
pub struct Scale;

impl GeomOp for Scale {
    fn key(&self) -> &'static str {
        "scale"
    }

    fn process(&self, crystal: &Crystal, args: &str, control: &Control) -> Result<Crystal, OpError> {
        let factors = args
            .split(',')
            .map(|t| t.trim().parse::<f64>().map_err(|_| invalid(self.key(), t)))
            .collect::<Result<Vec<f64>, OpError>>()?;

        let factors = match factors.len() {
            1 => {
                let mut f = [factors[0]; 3];
                if let Some(axis) = identify_slab_axis(crystal, control.get_slab_min_gap()) {
                    debug!("scale: slab axis {} kept", axis);
                    f[axis.index()] = 1.0;
                }
                f
            }
            3 => [factors[0], factors[1], factors[2]],
            _ => return Err(invalid(self.key(), args)),
        };

        let mut out = crystal.clone();

        if !crystal.is_periodic() {
            let scaled: Vec<Vector3f64> = crystal
                .get_atom_positions()
                .iter()
                .map(|p| Vector3f64::new(p.x * factors[0], p.y * factors[1], p.z * factors[2]))
                .collect();
            out.set_atom_positions_from_cart(&scaled);
            return Ok(out);
        }

        let frac = crystal.get_atom_positions_frac();

        let latt = crystal.get_latt();
        let scaled = Lattice::from_vectors(
            &(latt.get_vector_a() * factors[0]),
            &(latt.get_vector_b() * factors[1]),
            &(latt.get_vector_c() * factors[2]),
        );

        out.set_lattice_vectors(&scaled);
        out.set_atom_positions_from_frac(&frac);

        Ok(out)
    }

    fn output_suffix(&self, args: &str) -> String {
        format!("_SC{}", safe_name_with(args, "_"))
    }
}

// rotate: "[C]deg[-]axis[,...]" with axis one of a-c or x-z, about the
// origin, right-handed. With C the cell turns too.
pub struct Rotate;

impl GeomOp for Rotate {
    fn key(&self) -> &'static str {
        "rotate"
    }

    fn process(&self, crystal: &Crystal, args: &str, _control: &Control) -> Result<Crystal, OpError> {
        let re = pattern(
            self.key(),
            r"(?P<cmd>C)?(?P<degree>[+-]?([0-9]*[.])?[0-9]+)(?P<sign>-?)(?P<axis>[x-za-c])",
        )?;

        let mut out = crystal.clone();
        let mut matched = false;

        for tok in args.split(',') {
            for cap in re.captures_iter(tok) {
                matched = true;

                let rotate_cell = cap.name("cmd").is_some();

                let degree = cap["degree"]
                    .parse::<f64>()
                    .map_err(|_| invalid(self.key(), tok))?;

                let axis_char = cap["axis"].chars().next().unwrap_or('z');
                let mut axis = named_axis(out.get_latt(), axis_char);
                if &cap["sign"] == "-" {
                    axis = -axis;
                }

                if axis.norm2() == 0.0 {
                    return Err(invalid(self.key(), tok));
                }

                info!(
                    "rotate: {} degree about {}{}{}",
                    degree,
                    &cap["sign"],
                    axis_char,
                    if rotate_cell { " with the cell" } else { "" }
                );

                let rot = Rotation3::from_axis_angle(
                    &Unit::new_normalize(to_na(&axis)),
                    degree.to_radians(),
                )
                .into_inner();

                out = rotate_crystal(&out, &rot, rotate_cell);
            }
        }

        if !matched {
            return Err(invalid(self.key(), args));
        }

        Ok(out)
    }

    fn output_suffix(&self, args: &str) -> String {
        format!("_R{}", safe_name(args))
    }
}

// align: "{a-c}{x-z}[,...]", each pair turns atoms and cell so that the
// lattice vector points along the Cartesian axis.
pub struct Align;

impl GeomOp for Align {
    fn key(&self) -> &'static str {
        "align"
    }

    fn process(&self, crystal: &Crystal, args: &str, _control: &Control) -> Result<Crystal, OpError> {
        let re = pattern(self.key(), r"(?P<src>[a-c])(?P<tgt>[x-z])")?;

        let mut out = crystal.clone();
        let mut matched = false;

        for tok in args.split(',') {
            for cap in re.captures_iter(tok) {
                matched = true;

                let src = named_axis(out.get_latt(), cap["src"].chars().next().unwrap_or('a'));
                let tgt = cartesian_axis(cap["tgt"].chars().next().unwrap_or('x'));

                let rot = rotation_onto(&src, &tgt).ok_or_else(|| invalid(self.key(), tok))?;

                out = rotate_crystal(&out, &rot, true);
            }
        }

        if !matched {
            return Err(invalid(self.key(), args));
        }

        Ok(out)
    }

    fn output_suffix(&self, args: &str) -> String {
        format!("_A{}", safe_name(args))
    }
}
