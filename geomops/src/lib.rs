mod cell;
mod ops;
mod sort;
mod transform;

pub use cell::*;
pub use ops::*;
pub use sort::*;
pub use transform::*;

use control::Control;
use crystal::Crystal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum OpError {
    #[error("unknown geometry operation '{0}'")]
    UnknownOperation(String),
    #[error("{op}: invalid argument '{value}'")]
    InvalidArgument { op: &'static str, value: String },
    #[error("{0}: no slab axis found")]
    NoSlabAxis(&'static str),
    #[error("{0}: structure is not periodic")]
    NonPeriodic(&'static str),
    #[error("{op}: {found} atoms in the new cell, expected {expected}")]
    AtomCount {
        op: &'static str,
        expected: usize,
        found: usize,
    },
}

// A geometry operation selected by key from the command line or a script.
pub trait GeomOp: Sync {
    fn key(&self) -> &'static str;

    // Other names accepted by `find`.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    fn process(&self, crystal: &Crystal, args: &str, control: &Control) -> Result<Crystal, OpError>;

    // Appended to the output file name.
    fn output_suffix(&self, args: &str) -> String;
}

pub static REGISTRY: &[&dyn GeomOp] = &[
    &WrapSlab,
    &RemoveLayers,
    &SetVacuum,
    &AddVacuum,
    &AlignZ,
    &Translate,
    &Wrap,
    &ClearConstraints,
    &Scale,
    &Rotate,
    &Align,
    &SortByElement,
    &SortByPosition,
    &ToRectangular,
    &Repeat,
];

pub fn find(key: &str) -> Result<&'static dyn GeomOp, OpError> {
    REGISTRY
        .iter()
        .find(|op| op.key() == key || op.aliases().contains(&key))
        .copied()
        .ok_or_else(|| OpError::UnknownOperation(key.to_string()))
}

// Runs the operations in order, returning the final structure and the
// accumulated file name suffix.
pub fn apply_all(
    crystal: &Crystal,
    requests: &[(&str, &str)],
    control: &Control,
) -> Result<(Crystal, String), OpError> {
    let mut out = crystal.clone();
    let mut suffix = String::new();

    for (key, args) in requests.iter() {
        let op = find(key)?;

        out = op.process(&out, args, control)?;
        suffix.push_str(&op.output_suffix(args));
    }

    Ok((out, suffix))
}

const UNSAFE_CHARS: &str = "/,:<> ()+*{}[]!$&=|";

pub fn safe_name(src: &str) -> String {
    safe_name_with(src, "")
}

// Replaces every character that is awkward in a file name with `rstr`.
pub fn safe_name_with(src: &str, rstr: &str) -> String {
    let mut out = String::with_capacity(src.len());

    for c in src.chars() {
        if UNSAFE_CHARS.contains(c) {
            out.push_str(rstr);
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests;
