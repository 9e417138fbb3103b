use crate::{safe_name, safe_name_with, GeomOp, OpError};
use control::Control;
use crystal::Crystal;
use lattice::Lattice;
use log::{info, warn};
use slab::{
    align_slab_axis_to_z, identify_slab_axis, remove_layers, set_vacuum, wrap_separated_slab,
};
use vector3::Vector3f64;

// w: every atom into the primary cell.
pub struct Wrap;

impl GeomOp for Wrap {
    fn key(&self) -> &'static str {
        "w"
    }

    fn process(&self, crystal: &Crystal, _args: &str, _control: &Control) -> Result<Crystal, OpError> {
        let mut out = crystal.clone();
        out.wrap();

        Ok(out)
    }

    fn output_suffix(&self, _args: &str) -> String {
        String::new()
    }
}

// noc: drop every per-atom constraint.
pub struct ClearConstraints;

impl GeomOp for ClearConstraints {
    fn key(&self) -> &'static str {
        "noc"
    }

    fn process(&self, crystal: &Crystal, _args: &str, _control: &Control) -> Result<Crystal, OpError> {
        let mut out = crystal.clone();
        out.clear_constraints();

        Ok(out)
    }

    fn output_suffix(&self, _args: &str) -> String {
        "_NoC".to_string()
    }
}

// wslab: move a slab split by the periodic boundary back into one piece.
pub struct WrapSlab;

impl GeomOp for WrapSlab {
    fn key(&self) -> &'static str {
        "wslab"
    }

    fn process(&self, crystal: &Crystal, _args: &str, control: &Control) -> Result<Crystal, OpError> {
        let mut out = crystal.clone();

        match wrap_separated_slab(
            &mut out,
            control.get_slab_min_gap(),
            control.get_slab_wrap_padding(),
        ) {
            Some(axis) => info!("wslab: slab axis {}", axis),
            None => warn!("wslab: no separated slab, structure unchanged"),
        }

        Ok(out)
    }

    fn output_suffix(&self, _args: &str) -> String {
        String::new()
    }
}

// rmlayer: "l1[,l2...][,mingap]", layer 0 is the lowest one.
pub struct RemoveLayers;

impl RemoveLayers {
    fn parse_args(&self, args: &str, default_gap: f64) -> Result<(Vec<usize>, f64), OpError> {
        let mut layers = Vec::new();
        let mut min_gap = default_gap;

        for tok in args.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if tok.chars().all(|c| c.is_ascii_digit()) {
                let i = tok.parse::<usize>().map_err(|_| self.invalid(tok))?;
                if !layers.contains(&i) {
                    layers.push(i);
                }
            } else {
                min_gap = tok.parse::<f64>().map_err(|_| self.invalid(tok))?;
            }
        }

        Ok((layers, min_gap))
    }

    fn invalid(&self, value: &str) -> OpError {
        OpError::InvalidArgument {
            op: self.key(),
            value: value.to_string(),
        }
    }
}

impl GeomOp for RemoveLayers {
    fn key(&self) -> &'static str {
        "rmlayer"
    }

    fn process(&self, crystal: &Crystal, args: &str, control: &Control) -> Result<Crystal, OpError> {
        let (layers, min_gap) = self.parse_args(args, control.get_layer_min_gap())?;

        let axis = match identify_slab_axis(crystal, control.get_slab_min_gap()) {
            Some(axis) => axis,
            None => {
                warn!("rmlayer: no slab axis, structure unchanged");
                return Ok(crystal.clone());
            }
        };

        Ok(remove_layers(crystal, axis, &layers, min_gap))
    }

    fn output_suffix(&self, args: &str) -> String {
        format!("_RL{}", safe_name(args))
    }
}

fn parse_length(op: &'static str, args: &str) -> Result<f64, OpError> {
    args.trim()
        .parse::<f64>()
        .map_err(|_| OpError::InvalidArgument {
            op,
            value: args.to_string(),
        })
}

// vset: vacuum along z set to the given value (Angstrom).
pub struct SetVacuum;

impl GeomOp for SetVacuum {
    fn key(&self) -> &'static str {
        "vset"
    }

    fn process(&self, crystal: &Crystal, args: &str, control: &Control) -> Result<Crystal, OpError> {
        let vacuum = parse_length(self.key(), args)?;

        Ok(set_vacuum(
            crystal,
            vacuum,
            control.get_slab_min_gap(),
            control.get_slab_wrap_padding(),
        ))
    }

    fn output_suffix(&self, args: &str) -> String {
        format!("_SV{}", safe_name(args))
    }
}

// vadd: extra vacuum on c. A molecule gets a box that leaves the given
// space around its extent.
pub struct AddVacuum;

impl GeomOp for AddVacuum {
    fn key(&self) -> &'static str {
        "vadd"
    }

    fn process(&self, crystal: &Crystal, args: &str, _control: &Control) -> Result<Crystal, OpError> {
        let vacuum = parse_length(self.key(), args)?;

        let mut out = crystal.clone();

        if out.is_periodic() {
            out.add_vacuum(vacuum);
            return Ok(out);
        }

        let positions = out.get_atom_positions();
        if positions.is_empty() {
            return Ok(out);
        }

        let mut lo = positions[0];
        let mut hi = positions[0];
        for p in positions.iter() {
            for i in 0..3 {
                lo[i] = lo[i].min(p[i]);
                hi[i] = hi[i].max(p[i]);
            }
        }

        let size = hi - lo;
        out.set_lattice_vectors(&Lattice::orthorhombic(
            size.x + vacuum,
            size.y + vacuum,
            size.z + vacuum,
        ));
        out.translate(&(-lo));

        Ok(out)
    }

    fn output_suffix(&self, args: &str) -> String {
        format!("_V{}", args)
    }
}

// zalign: slab axis to z, a to x.
pub struct AlignZ;

impl GeomOp for AlignZ {
    fn key(&self) -> &'static str {
        "zalign"
    }

    fn process(&self, crystal: &Crystal, _args: &str, control: &Control) -> Result<Crystal, OpError> {
        let axis = identify_slab_axis(crystal, control.get_slab_min_gap())
            .ok_or(OpError::NoSlabAxis(self.key()))?;

        Ok(align_slab_axis_to_z(crystal, axis))
    }

    fn output_suffix(&self, _args: &str) -> String {
        "_Z".to_string()
    }
}

// translate: "dx,dy,dz" in Angstrom.
pub struct Translate;

impl GeomOp for Translate {
    fn key(&self) -> &'static str {
        "translate"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["l"]
    }

    fn process(&self, crystal: &Crystal, args: &str, _control: &Control) -> Result<Crystal, OpError> {
        let d: Vec<&str> = args.split(',').map(str::trim).collect();

        if d.len() != 3 {
            return Err(OpError::InvalidArgument {
                op: self.key(),
                value: args.to_string(),
            });
        }

        let mut shift = Vector3f64::zeros();
        for i in 0..3 {
            shift[i] = parse_length(self.key(), d[i])?;
        }

        let mut out = crystal.clone();
        out.translate(&shift);

        Ok(out)
    }

    fn output_suffix(&self, args: &str) -> String {
        format!("_T{}", safe_name_with(args, "_"))
    }
}
