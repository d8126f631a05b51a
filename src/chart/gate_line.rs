use serde::{Serialize, Serializer};
use std::fmt;

/// Highest gate number in the domain model.
pub const MAX_GATE: u8 = 64;
/// Highest line number within a gate.
pub const MAX_LINE: u8 = 6;

/// A validated `gate.line` reading. Gate is in 1..=64, line in 1..=6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GateLine {
    gate: u8,
    line: u8,
}

impl GateLine {
    /// Returns `None` when either part is outside its range.
    pub fn new(gate: u8, line: u8) -> Option<Self> {
        if (1..=MAX_GATE).contains(&gate) && (1..=MAX_LINE).contains(&line) {
            Some(Self { gate, line })
        } else {
            None
        }
    }

    pub fn gate(self) -> u8 {
        self.gate
    }

    pub fn line(self) -> u8 {
        self.line
    }

    /// Parses a clean `gate.line` string such as `"42.5"` or `"01.3"`.
    ///
    /// Only the strict form is accepted: one or two gate digits, a dot, one
    /// line digit. Look-alike repair happens in the resolver, not here.
    pub fn parse(text: &str) -> Option<Self> {
        let (gate, line) = text.split_once('.')?;
        if gate.is_empty()
            || gate.len() > 2
            || line.len() != 1
            || !gate.bytes().all(|b| b.is_ascii_digit())
            || !line.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        Self::new(gate.parse().ok()?, line.parse().ok()?)
    }
}

impl fmt::Display for GateLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.gate, self.line)
    }
}

impl Serialize for GateLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of reading one segment.
///
/// `Unresolved` is a first-class value: it travels all the way to the report
/// so missing data stays visible instead of being replaced by a number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResolvedValue {
    Resolved(GateLine),
    Unresolved,
}

impl ResolvedValue {
    pub fn gate_line(self) -> Option<GateLine> {
        match self {
            ResolvedValue::Resolved(gl) => Some(gl),
            ResolvedValue::Unresolved => None,
        }
    }

    pub fn is_resolved(self) -> bool {
        matches!(self, ResolvedValue::Resolved(_))
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedValue::Resolved(gl) => fmt::Display::fmt(gl, f),
            ResolvedValue::Unresolved => f.write_str("unresolved"),
        }
    }
}

impl Serialize for ResolvedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
