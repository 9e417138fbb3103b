use crate::{KPathError, PathTable, KPTS};
use lattice::Lattice;
use vector3::*;

// K-points sampled along the segments of a band path.
pub struct KptsLine {
    k_frac: Vec<Vector3f64>,
    k_degeneracy: Vec<usize>,
    k_weight: Vec<f64>,
}

impl KptsLine {
    // `npts` evenly spaced points per segment, both ends included.
    pub fn from_path(table: &PathTable, npts: usize) -> Result<KptsLine, KPathError> {
        let mut k_frac = Vec::new();

        for (k1, k2) in table.segment_coords()?.iter() {
            if npts < 2 {
                k_frac.push(*k1);
                continue;
            }

            let space = (*k2 - *k1) / ((npts - 1) as f64);

            for i in 0..npts {
                k_frac.push(*k1 + space * i as f64);
            }
        }

        let nk = k_frac.len();

        let k_weight = vec![1.0 / nk as f64; nk];

        let k_degeneracy = vec![1; nk];

        Ok(KptsLine {
            k_frac,
            k_degeneracy,
            k_weight,
        })
    }
}

impl KPTS for KptsLine {
    fn get_k_frac(&self, k_index: usize) -> Vector3f64 {
        self.k_frac[k_index]
    }

    fn get_k_weight(&self, k_index: usize) -> f64 {
        self.k_weight[k_index]
    }

    fn get_k_degeneracy(&self, k_index: usize) -> usize {
        self.k_degeneracy[k_index]
    }

    fn get_n_kpts(&self) -> usize {
        self.k_frac.len()
    }

    fn frac_to_cart(&self, k_frac: &Vector3f64, blatt: &Lattice) -> Vector3f64 {
        blatt.frac_to_cart(k_frac)
    }

    fn display(&self) {
        println!();
        println!("   {:-^88}", " k-points (fractional) ");
        println!();

        println!("{:12} {:^6} {}", "", "nkpt =", self.get_n_kpts());
        println!();

        println!(
            "{:12} {:^6} {:^16} {:^16} {:^16} {:^12}",
            "", "index", "k1", "k2", "k3", "degeneracy"
        );

        for ik in 0..self.get_n_kpts() {
            let xk_frac = self.get_k_frac(ik);
            let xk_degeneracy = self.get_k_degeneracy(ik);

            println!(
                "{:12} {:^6} {:16.12} {:16.12} {:16.12} {:^12}",
                "",
                ik + 1,
                xk_frac.x,
                xk_frac.y,
                xk_frac.z,
                xk_degeneracy
            );
        }
    }
}
