use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::NeighborCount;
use crate::cell::Cell;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0001_0000_0000_0000_0001
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub const fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub const fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// State of a cell in the next generation, given its current state and how many of its
    /// neighbors are alive.
    ///
    /// A cell has at most 8 neighbors, so any larger count is never in either set.
    pub const fn next_state(&self, cell: Cell, neighbors: NeighborCount) -> Cell {
        if neighbors > 8 {
            return Cell::Dead;
        }

        let n = 1 << neighbors;

        let set = match cell {
            Cell::Alive => self.survivals(),
            Cell::Dead => self.births(),
        };

        if set & n == n { Cell::Alive } else { Cell::Dead }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |set: u16| -> String {
            (0..=8u8)
                .filter(|n| set & (1 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RuleSetError {
    #[error("Empty rulestring")]
    Empty,

    #[error("Unexpected end of rulestring, expected '{exp}'")]
    UnexpectedEof { exp: char },

    #[error("Expected '{exp}', but got '{got}'")]
    UnexpectedToken { exp: char, got: char },

    #[error("Neighbor count '{got}' is not in 0..=8")]
    CountOutOfRange { got: char },

    #[error("Unexpected trailing '{got}'")]
    TrailingInput { got: char },
}

/// Parses rulestrings like `B3/S23`, `b3s23` or the nameless `3/23`.
impl FromStr for RuleSet {
    type Err = RuleSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();

        match bytes.first() {
            None => Err(RuleSetError::Empty),
            Some(b'b' | b'B') => parse_rule(&bytes[1..]),
            Some(_) => parse_nameless_rule(bytes),
        }
    }
}

// Parse the rest of rules that look like b3/s23, after the leading b
fn parse_rule(bytes: &[u8]) -> Result<RuleSet, RuleSetError> {
    let (b, bytes) = take_digits(bytes)?;

    let bytes = match bytes {
        [b'/', rest @ ..] => rest,
        _ => bytes,
    };

    let bytes = match bytes {
        [b's' | b'S', rest @ ..] => rest,
        [got, ..] => {
            return Err(RuleSetError::UnexpectedToken {
                exp: 'S',
                got: char::from(*got),
            });
        }
        [] => return Err(RuleSetError::UnexpectedEof { exp: 'S' }),
    };

    let (s, bytes) = take_digits(bytes)?;
    expect_end(bytes)?;

    Ok(RuleSet::new(b, s))
}

// Parse rules that look like 3/23
fn parse_nameless_rule(bytes: &[u8]) -> Result<RuleSet, RuleSetError> {
    let (b, bytes) = take_digits(bytes)?;

    let bytes = match bytes {
        [b'/', rest @ ..] => rest,
        [got, ..] => {
            return Err(RuleSetError::UnexpectedToken {
                exp: '/',
                got: char::from(*got),
            });
        }
        [] => return Err(RuleSetError::UnexpectedEof { exp: '/' }),
    };

    let (s, bytes) = take_digits(bytes)?;
    expect_end(bytes)?;

    Ok(RuleSet::new(b, s))
}

/// Consume leading digits, packing them into the bit representation used by [`RuleSet::new`]
fn take_digits(bytes: &[u8]) -> Result<(u16, &[u8]), RuleSetError> {
    let end = bytes
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(bytes.len());

    let (digits, rest) = bytes.split_at(end);

    let mut n = 0;
    for &d in digits {
        if d > b'8' {
            return Err(RuleSetError::CountOutOfRange {
                got: char::from(d),
            });
        }

        n |= 1 << (d - b'0');
    }

    Ok((n, rest))
}

fn expect_end(bytes: &[u8]) -> Result<(), RuleSetError> {
    match bytes.first() {
        None => Ok(()),
        Some(&got) => Err(RuleSetError::TrailingInput {
            got: char::from(got),
        }),
    }
}
