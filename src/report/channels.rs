//! Channels (gate pairs joining two centers) and center definition.

use std::collections::BTreeSet;

use super::gates::{Center, gate_info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Channel {
    pub gates: (u8, u8),
    pub name: &'static str,
}

impl Channel {
    /// Centers at either end, taken from the gate table.
    pub fn centers(&self) -> Option<(Center, Center)> {
        let a = gate_info(self.gates.0)?.center;
        let b = gate_info(self.gates.1)?.center;
        Some((a, b))
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.gates.0, self.gates.1)
    }
}

const fn channel(a: u8, b: u8, name: &'static str) -> Channel {
    Channel { gates: (a, b), name }
}

pub const CHANNELS: [Channel; 36] = [
    channel(1, 8, "Inspiration"),
    channel(2, 14, "The Beat"),
    channel(3, 60, "Mutation"),
    channel(4, 63, "Logic"),
    channel(5, 15, "Rhythm"),
    channel(6, 59, "Mating"),
    channel(7, 31, "The Alpha"),
    channel(9, 52, "Concentration"),
    channel(10, 20, "Awakening"),
    channel(10, 34, "Exploration"),
    channel(10, 57, "Perfected Form"),
    channel(11, 56, "Curiosity"),
    channel(12, 22, "Openness"),
    channel(13, 33, "The Prodigal"),
    channel(16, 48, "The Wavelength"),
    channel(17, 62, "Acceptance"),
    channel(18, 58, "Judgment"),
    channel(19, 49, "Synthesis"),
    channel(20, 34, "Charisma"),
    channel(20, 57, "The Brainwave"),
    channel(21, 45, "Money"),
    channel(23, 43, "Structuring"),
    channel(24, 61, "Awareness"),
    channel(25, 51, "Initiation"),
    channel(26, 44, "Surrender"),
    channel(27, 50, "Preservation"),
    channel(28, 38, "Struggle"),
    channel(29, 46, "Discovery"),
    channel(30, 41, "Recognition"),
    channel(32, 54, "Transformation"),
    channel(34, 57, "Power"),
    channel(35, 36, "Transitoriness"),
    channel(37, 40, "Community"),
    channel(39, 55, "Emoting"),
    channel(42, 53, "Maturation"),
    channel(47, 64, "Abstraction"),
];

/// Channels whose two gates are both activated, in table order.
pub fn defined_channels(activated: &BTreeSet<u8>) -> Vec<&'static Channel> {
    CHANNELS
        .iter()
        .filter(|c| activated.contains(&c.gates.0) && activated.contains(&c.gates.1))
        .collect()
}

/// Centers at either end of a defined channel.
pub fn defined_centers(channels: &[&Channel]) -> BTreeSet<Center> {
    channels
        .iter()
        .filter_map(|c| c.centers())
        .flat_map(|(a, b)| [a, b])
        .collect()
}
