use crate::{KPathError, PathTable, GAMMA};
use log::info;
use slab::Axis;
use vector3::Vector3f64;

use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KPathFormat {
    Vasp,
    Aims,
    Rmg,
}

impl FromStr for KPathFormat {
    type Err = KPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vasp" => Ok(KPathFormat::Vasp),
            "aims" => Ok(KPathFormat::Aims),
            "rmg" => Ok(KPathFormat::Rmg),
            _ => Err(KPathError::UnsupportedFormat(s.to_string())),
        }
    }
}

// Band-path text for one simulation package.
//
// Vasp also carries the wannier90 kpoint_path block and the slab/Miller hints
// used by the post-processing tools.
#[derive(Debug, Clone)]
pub enum KPathWriter {
    Vasp {
        nkp: usize,
        lines: Vec<String>,
        wannier: Vec<String>,
        vasp: Vec<String>,
    },
    Aims {
        nkp: usize,
        lines: Vec<String>,
    },
    Rmg {
        nkp: usize,
        lines: Vec<String>,
        last_end: Option<(String, String)>,
    },
}

// k-points per segment for a path of `nseg` segments
pub fn points_per_segment(nseg: usize) -> usize {
    (100 / (nseg + 1)) * 4 + 1
}

impl KPathWriter {
    pub fn new(format: KPathFormat, nseg: usize) -> KPathWriter {
        let nkp = points_per_segment(nseg);

        match format {
            KPathFormat::Vasp => KPathWriter::Vasp {
                nkp,
                lines: Vec::new(),
                wannier: Vec::new(),
                vasp: Vec::new(),
            },
            KPathFormat::Aims => KPathWriter::Aims {
                nkp,
                lines: Vec::new(),
            },
            KPathFormat::Rmg => KPathWriter::Rmg {
                nkp: nkp * 2 / 3,
                lines: vec!["kpoints_bandstructure = \" ".to_string()],
                last_end: None,
            },
        }
    }

    pub fn get_nkp(&self) -> usize {
        match self {
            KPathWriter::Vasp { nkp, .. } => *nkp,
            KPathWriter::Aims { nkp, .. } => *nkp,
            KPathWriter::Rmg { nkp, .. } => *nkp,
        }
    }

    // One segment `bs (k1) -> es (k2)`; `pes` is the end label of the
    // previous segment, empty for the first one.
    pub fn add_segment(&mut self, bs: &str, k1: &str, es: &str, k2: &str, pes: &str) {
        match self {
            KPathWriter::Vasp { wannier, vasp, .. } => {
                wannier.push(format!(" {:>3}  {}  {:>3}  {}", bs, k1, es, k2));

                vasp.push(format!("{:<20}  ! {}", k1, bs));
                vasp.push(format!("{:<20}  ! {}", k2, es));
                vasp.push(String::new());
            }

            KPathWriter::Aims { nkp, lines } => {
                lines.push(format!(
                    "output band  {} {} {:>4} {:>3}  {:>3}",
                    k1, k2, nkp, bs, es
                ));
            }

            KPathWriter::Rmg {
                nkp,
                lines,
                last_end,
            } => {
                let mut n = *nkp;

                // discontinuous path, close the previous segment first
                if !pes.is_empty() && bs != pes {
                    if let Some((_, pk2)) = last_end.as_ref() {
                        lines.push(format!("  {} {:>4} {:>3}", pk2, n, pes));
                    }
                    n = 0;
                }

                lines.push(format!("  {} {:>4} {:>3}", k1, n, bs));

                *last_end = Some((es.to_string(), k2.to_string()));
            }
        }
    }

    pub fn finish(&mut self, slab_axis: Option<Axis>, kpath_slab_axis: Option<Axis>, tick: &str) {
        match self {
            KPathWriter::Vasp {
                nkp,
                lines,
                wannier,
                vasp,
            } => {
                lines.extend(slab_hints(slab_axis, kpath_slab_axis));

                lines.push("#<WANNIER90>".to_string());
                lines.push("begin kpoint_path".to_string());
                lines.extend(wannier.iter().cloned());
                lines.push("end kpoint_path".to_string());
                lines.push("#<@WANNIER90>".to_string());
                lines.push(String::new());

                lines.push("#<VASP>".to_string());
                lines.push(format!("k-points along high symmetry lines  {}", tick));
                lines.push(nkp.to_string());
                lines.push("Line-mode".to_string());
                lines.push("rec".to_string());
                lines.extend(vasp.iter().cloned());
                lines.push("#<@VASP>".to_string());

                lines.push(String::new());
                lines.push(tick.to_string());
                lines.push(String::new());

                lines.push("!<WANTOOL>".to_string());
                lines.push("KPATH_BULK".to_string());
                lines.push(wannier.len().to_string());
                lines.extend(wannier.iter().cloned());
                lines.push(String::new());
                lines.push("!<@WANTOOL>".to_string());
                lines.push(String::new());
            }

            KPathWriter::Aims { lines, .. } => {
                lines.push(tick.to_string());
            }

            KPathWriter::Rmg {
                nkp,
                lines,
                last_end,
            } => {
                if let Some((es, k2)) = last_end.as_ref() {
                    lines.push(format!("  {} {:>4} {:>3}", k2, nkp, es));
                }
                lines.push(" \"".to_string());
            }
        }
    }

    pub fn get_lines(&self) -> &[String] {
        match self {
            KPathWriter::Vasp { lines, .. } => lines,
            KPathWriter::Aims { lines, .. } => lines,
            KPathWriter::Rmg { lines, .. } => lines,
        }
    }

    pub fn serialize(&self) -> String {
        let mut s = self.get_lines().join("\n");
        s.push('\n');
        s
    }

    pub fn write_file<P: AsRef<Path>>(&self, kfile: P) -> Result<(), KPathError> {
        info!("writing '{}'", kfile.as_ref().display());

        fs::write(kfile, self.serialize())?;

        Ok(())
    }
}

// #SLABMASK and #MILLER lines: which directions are periodic and which
// lattice planes to look at.
fn slab_hints(slab_axis: Option<Axis>, kpath_slab_axis: Option<Axis>) -> Vec<String> {
    let mut lamask = [1; 3];
    if let Some(axis) = slab_axis {
        lamask[axis.index()] = 0;
    }

    let mut lkmask = [1; 3];
    if let Some(axis) = kpath_slab_axis {
        lkmask[axis.index()] = 0;
    }

    let rows: Vec<[i32; 3]> = match (slab_axis, kpath_slab_axis) {
        // bulk structure with a 2-D path
        (None, Some(k)) => {
            let mut lm = [0; 3];
            lm[k.index()] = 1;
            vec![lm]
        }
        (None, None) => vec![[0, 0, 1], [1, 0, 0], [0, 1, 0]],
        (Some(_), _) => (0..3)
            .map(|k| {
                if lkmask[k] == 0 {
                    let mut lm = [1; 3];
                    lm[k] = 0;
                    lm
                } else {
                    let mut lm = [0; 3];
                    lm[k] = 1;
                    lm
                }
            })
            .collect(),
    };

    let mut lines = vec![format!("#SLABMASK: {}", join_ints(&lamask, " "))];

    for lm in rows.iter() {
        lines.push(format!("#MILLER_{}: {}", join_ints(lm, "_"), join_ints(lm, " ")));
    }

    lines
}

fn join_ints(v: &[i32], sep: &str) -> String {
    v.iter().map(|x| x.to_string()).collect::<Vec<String>>().join(sep)
}

pub fn format_k(k: &Vector3f64) -> String {
    format!("{:6.3} {:6.3} {:6.3}", k.x, k.y, k.z)
}

pub fn short_label(label: &str) -> String {
    label.replace(GAMMA, "G")
}

// Renders the whole path table. Also returns the tick string, the labels
// along the path with '|' at discontinuities.
pub fn write_path(
    table: &PathTable,
    format: KPathFormat,
    slab_axis: Option<Axis>,
    kpath_slab_axis: Option<Axis>,
) -> Result<(KPathWriter, String), KPathError> {
    let coords = table.segment_coords()?;

    let mut writer = KPathWriter::new(format, table.get_n_segments());

    let mut tick = String::from("#TICK:");
    let mut pes = String::new();

    for ((from, to), (k1, k2)) in table.get_segments().iter().zip(coords.iter()) {
        let bs = short_label(from);
        let es = short_label(to);

        if !pes.is_empty() && bs != pes {
            tick.push_str(&pes);
            tick.push('|');
        }

        writer.add_segment(&bs, &format_k(k1), &es, &format_k(k2), &pes);

        tick.push_str(&bs);
        tick.push(',');

        pes = es;
    }

    tick.push_str(&pes);

    writer.finish(slab_axis, kpath_slab_axis, &tick);

    Ok((writer, tick))
}
