use std::convert::TryFrom;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AxisError {
    #[error("axis number must be 1, 2 or 3, got {0}")]
    Number(usize),
    #[error("axis letter must be a, b or c, got '{0}'")]
    Letter(char),
}

// One of the three lattice directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    A,
    B,
    C,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::A, Axis::B, Axis::C];

    // 0-based column of the lattice matrix
    pub fn index(self) -> usize {
        match self {
            Axis::A => 0,
            Axis::B => 1,
            Axis::C => 2,
        }
    }

    // 1-based axis number
    pub fn number(self) -> usize {
        self.index() + 1
    }

    pub fn letter(self) -> char {
        match self {
            Axis::A => 'a',
            Axis::B => 'b',
            Axis::C => 'c',
        }
    }

    pub fn from_index(i: usize) -> Option<Axis> {
        Axis::ALL.get(i).copied()
    }
}

impl TryFrom<usize> for Axis {
    type Error = AxisError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        match n {
            1..=3 => Ok(Axis::ALL[n - 1]),
            _ => Err(AxisError::Number(n)),
        }
    }
}

impl TryFrom<char> for Axis {
    type Error = AxisError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            'a' => Ok(Axis::A),
            'b' => Ok(Axis::B),
            'c' => Ok(Axis::C),
            _ => Err(AxisError::Letter(c)),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
