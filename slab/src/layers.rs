use crate::{project, Axis};
use crystal::Crystal;
use log::{debug, warn};

pub const DEFAULT_LAYER_MIN_GAP: f64 = 1.9;

// Atoms sharing one atomic plane along an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    members: Vec<usize>,
    lo_bound: f64,
    hi_bound: f64,
}

impl Layer {
    // original atom indices, in sorted order along the axis
    pub fn get_members(&self) -> &[usize] {
        &self.members
    }

    pub fn get_lo_bound(&self) -> f64 {
        self.lo_bound
    }

    pub fn get_hi_bound(&self) -> f64 {
        self.hi_bound
    }

    pub fn get_n_atoms(&self) -> usize {
        self.members.len()
    }
}

// Splits the atoms into layers along `axis`. A layer ends wherever the sorted
// projected gap exceeds `min_gap`; the last sorted atom always closes the
// topmost layer, so the layers partition the atom set.
//
// Layers straddling the periodic boundary are not merged, wrap the slab
// first (see `wrap_separated_slab`).
pub fn identify_layers(crystal: &Crystal, axis: Axis, min_gap: f64) -> Vec<Layer> {
    let proj = project(crystal, false);

    let ax = axis.index();
    let order = proj.get_sort_order(ax);
    let sorted = proj.get_sorted_positions(ax);
    let gaps = proj.get_gaps(ax);

    let natoms = order.len();

    let mut layers = Vec::new();
    let mut start = 0;

    for i in 0..natoms {
        if gaps[i] > min_gap || i == natoms - 1 {
            layers.push(Layer {
                members: order[start..=i].to_vec(),
                lo_bound: sorted[start],
                hi_bound: sorted[i],
            });

            start = i + 1;
        }
    }

    debug!(
        "{} layers along {} axis with min_gap = {:.3}",
        layers.len(),
        axis,
        min_gap
    );

    layers
}

// (hi edges, lo edges) of the layers
pub fn layer_edges(layers: &[Layer]) -> (Vec<f64>, Vec<f64>) {
    let hi = layers.iter().map(|l| l.hi_bound).collect();
    let lo = layers.iter().map(|l| l.lo_bound).collect();

    (hi, lo)
}

// New crystal without the atoms of the listed layers, 0 being the lowest.
pub fn remove_layers(
    crystal: &Crystal,
    axis: Axis,
    layer_indices: &[usize],
    min_gap: f64,
) -> Crystal {
    let layers = identify_layers(crystal, axis, min_gap);

    let mut atoms = Vec::new();

    for &il in layer_indices.iter() {
        match layers.get(il) {
            Some(layer) => atoms.extend_from_slice(layer.get_members()),
            None => warn!(
                "layer {} does not exist, only {} layers along {} axis",
                il,
                layers.len(),
                axis
            ),
        }
    }

    crystal.remove_atoms(&atoms)
}
