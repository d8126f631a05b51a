//! Candidate resolution: normalize raw reads, validate, and vote.

use std::cmp::Reverse;
use std::collections::HashMap;

use super::engine::Profile;
use super::preprocess::Variant;
use crate::chart::{GateLine, ResolvedValue};

/// One raw read of a segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub raw: String,
    pub variant: Variant,
    pub profile: Profile,
}

impl Candidate {
    pub fn new(raw: impl Into<String>, variant: Variant, profile: Profile) -> Self {
        Self {
            raw: raw.into(),
            variant,
            profile,
        }
    }
}

/// Result of voting over a segment's candidate pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub value: ResolvedValue,
    /// Candidates agreeing with the winner.
    pub votes: usize,
    /// Candidates that parsed to any valid reading.
    pub valid: usize,
    pub total: usize,
}

/// Repairs characters the chart font is commonly misread as.
fn map_lookalike(c: char) -> char {
    match c {
        'O' | 'o' | 'D' | 'Q' => '0',
        'I' | 'l' | 'i' | '|' | '!' => '1',
        'Z' | 'z' => '2',
        'S' | 's' | '$' => '5',
        'G' | 'b' => '6',
        'T' => '7',
        'B' => '8',
        'g' | 'q' => '9',
        ',' | ':' | ';' => '.',
        other => other,
    }
}

/// Strips whitespace, repairs look-alikes, and trims non-digit debris from
/// both ends.
pub fn normalize(raw: &str) -> String {
    let mapped: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(map_lookalike)
        .collect();
    mapped
        .trim_matches(|c: char| !c.is_ascii_digit())
        .to_string()
}

/// Normalizes and validates one raw read.
pub fn parse_candidate(raw: &str) -> Option<GateLine> {
    GateLine::parse(&normalize(raw))
}

#[derive(Default)]
struct Tally {
    count: usize,
    first: usize,
    preferred: Option<usize>,
}

/// Picks the best-supported valid reading.
///
/// Majority wins. Ties go to the value read under [`Profile::PREFERRED`],
/// then to whichever value appeared first in the pool. With no valid
/// candidate the segment is `Unresolved`.
pub fn resolve(candidates: &[Candidate]) -> Resolution {
    let mut tallies: HashMap<GateLine, Tally> = HashMap::new();
    let mut valid = 0;

    for (idx, candidate) in candidates.iter().enumerate() {
        let Some(gate_line) = parse_candidate(&candidate.raw) else {
            continue;
        };
        valid += 1;

        let tally = tallies.entry(gate_line).or_insert_with(|| Tally {
            first: idx,
            ..Tally::default()
        });
        tally.count += 1;
        if candidate.profile == Profile::PREFERRED && tally.preferred.is_none() {
            tally.preferred = Some(idx);
        }
    }

    let winner = tallies
        .into_iter()
        .max_by_key(|(_, t)| (t.count, t.preferred.map(Reverse), Reverse(t.first)));

    match winner {
        Some((gate_line, tally)) => Resolution {
            value: ResolvedValue::Resolved(gate_line),
            votes: tally.count,
            valid,
            total: candidates.len(),
        },
        None => Resolution {
            value: ResolvedValue::Unresolved,
            votes: 0,
            valid,
            total: candidates.len(),
        },
    }
}
