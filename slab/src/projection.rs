use crystal::Crystal;
use log::debug;

// Length used for every axis of a non-periodic structure.
pub const NON_PERIODIC_LENGTH: f64 = 1.0e10;

// Atom positions projected on the three lattice directions, sorted per axis.
//
// The projected coordinate of an atom along axis i is its unwrapped
// fractional coordinate times |a_i|. For a non-periodic structure it is the
// Cartesian coordinate.
//
// Per axis, `sorted_positions` holds the N sorted projections followed by the
// periodic image of the lowest atom (+ cell length). With `insert_bottom` the
// image of the highest atom (- cell length) is prepended as well. `gaps[k]` is
// `sorted_positions[k + 1] - sorted_positions[k]`.
#[derive(Debug, Clone)]
pub struct Projection {
    cell_lengths: [f64; 3],
    sort_order: [Vec<usize>; 3],
    sorted_positions: [Vec<f64>; 3],
    gaps: [Vec<f64>; 3],
    bottom_inserted: bool,
}

impl Projection {
    pub fn get_cell_lengths(&self) -> [f64; 3] {
        self.cell_lengths
    }

    // original atom index occupying each sorted slot
    pub fn get_sort_order(&self, axis: usize) -> &[usize] {
        &self.sort_order[axis]
    }

    pub fn get_sorted_positions(&self, axis: usize) -> &[f64] {
        &self.sorted_positions[axis]
    }

    pub fn get_gaps(&self, axis: usize) -> &[f64] {
        &self.gaps[axis]
    }

    pub fn has_bottom_image(&self) -> bool {
        self.bottom_inserted
    }

    // (index, value) of the largest gap along `axis`, first one on ties
    pub fn max_gap(&self, axis: usize) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;

        for (i, &g) in self.gaps[axis].iter().enumerate() {
            match best {
                Some((_, v)) if g <= v => {}
                _ => best = Some((i, g)),
            }
        }

        best
    }
}

pub fn project(crystal: &Crystal, insert_bottom: bool) -> Projection {
    let (cell_lengths, projected): ([f64; 3], Vec<[f64; 3]>) = if crystal.is_periodic() {
        let lengths = crystal.get_latt().lengths();

        let projected = crystal
            .get_atom_positions_frac()
            .iter()
            .map(|f| [f.x * lengths[0], f.y * lengths[1], f.z * lengths[2]])
            .collect();

        (lengths, projected)
    } else {
        let projected = crystal
            .get_atom_positions()
            .iter()
            .map(|c| c.to_array())
            .collect();

        ([NON_PERIODIC_LENGTH; 3], projected)
    };

    let mut sort_order: [Vec<usize>; 3] = Default::default();
    let mut sorted_positions: [Vec<f64>; 3] = Default::default();
    let mut gaps: [Vec<f64>; 3] = Default::default();

    for ax in 0..3 {
        let mut order: Vec<usize> = (0..projected.len()).collect();
        order.sort_by(|&i, &j| projected[i][ax].total_cmp(&projected[j][ax]));

        let sorted: Vec<f64> = order.iter().map(|&i| projected[i][ax]).collect();

        let mut rows = Vec::with_capacity(sorted.len() + 2);

        if let (Some(&lowest), Some(&highest)) = (sorted.first(), sorted.last()) {
            if insert_bottom {
                rows.push(highest - cell_lengths[ax]);
            }
            rows.extend_from_slice(&sorted);
            rows.push(lowest + cell_lengths[ax]);
        }

        gaps[ax] = rows.windows(2).map(|w| w[1] - w[0]).collect();

        debug!("projection axis {} : gaps = {:?}", ax + 1, gaps[ax]);

        sort_order[ax] = order;
        sorted_positions[ax] = rows;
    }

    Projection {
        cell_lengths,
        sort_order,
        sorted_positions,
        gaps,
        bottom_inserted: insert_bottom,
    }
}
