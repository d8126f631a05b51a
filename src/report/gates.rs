//! Static gate metadata: name and center for each of the 64 gates.

use std::fmt;

/// The nine energy centers gates belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Center {
    Head,
    Ajna,
    Throat,
    G,
    Heart,
    SolarPlexus,
    Spleen,
    Sacral,
    Root,
}

impl Center {
    pub fn name(self) -> &'static str {
        match self {
            Center::Head => "Head",
            Center::Ajna => "Ajna",
            Center::Throat => "Throat",
            Center::G => "G",
            Center::Heart => "Heart",
            Center::SolarPlexus => "Solar Plexus",
            Center::Spleen => "Spleen",
            Center::Sacral => "Sacral",
            Center::Root => "Root",
        }
    }
}

impl fmt::Display for Center {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateInfo {
    pub number: u8,
    pub name: &'static str,
    pub center: Center,
}

const fn gate(number: u8, name: &'static str, center: Center) -> GateInfo {
    GateInfo { number, name, center }
}

use Center::*;

/// Indexed by `number - 1`.
pub const GATES: [GateInfo; 64] = [
    gate(1, "Self-Expression", G),
    gate(2, "Direction of the Self", G),
    gate(3, "Ordering", Sacral),
    gate(4, "Formulization", Ajna),
    gate(5, "Fixed Rhythms", Sacral),
    gate(6, "Friction", SolarPlexus),
    gate(7, "The Role of the Self", G),
    gate(8, "Contribution", Throat),
    gate(9, "Focus", Sacral),
    gate(10, "Behavior of the Self", G),
    gate(11, "Ideas", Ajna),
    gate(12, "Caution", Throat),
    gate(13, "The Listener", G),
    gate(14, "Power Skills", Sacral),
    gate(15, "Extremes", G),
    gate(16, "Skills", Throat),
    gate(17, "Opinions", Ajna),
    gate(18, "Correction", Spleen),
    gate(19, "Wanting", Root),
    gate(20, "The Now", Throat),
    gate(21, "The Hunter/Huntress", Heart),
    gate(22, "Openness", SolarPlexus),
    gate(23, "Assimilation", Throat),
    gate(24, "Rationalization", Ajna),
    gate(25, "The Spirit of the Self", G),
    gate(26, "The Egoist", Heart),
    gate(27, "Caring", Sacral),
    gate(28, "The Game Player", Spleen),
    gate(29, "Perseverance", Sacral),
    gate(30, "Recognition of Feelings", SolarPlexus),
    gate(31, "Leading", Throat),
    gate(32, "Continuity", Spleen),
    gate(33, "Privacy", Throat),
    gate(34, "Power", Sacral),
    gate(35, "Change", Throat),
    gate(36, "Crisis", SolarPlexus),
    gate(37, "Friendship", SolarPlexus),
    gate(38, "The Fighter", Root),
    gate(39, "Provocation", Root),
    gate(40, "Aloneness", Heart),
    gate(41, "Contraction", Root),
    gate(42, "Growth", Sacral),
    gate(43, "Insight", Ajna),
    gate(44, "Alertness", Spleen),
    gate(45, "The Gatherer", Throat),
    gate(46, "Determination of the Self", G),
    gate(47, "Realization", Ajna),
    gate(48, "Depth", Spleen),
    gate(49, "Principles", SolarPlexus),
    gate(50, "Values", Spleen),
    gate(51, "Shock", Heart),
    gate(52, "Stillness", Root),
    gate(53, "Beginnings", Root),
    gate(54, "Ambition", Root),
    gate(55, "Spirit", SolarPlexus),
    gate(56, "Stimulation", Throat),
    gate(57, "Intuitive Clarity", Spleen),
    gate(58, "Vitality", Root),
    gate(59, "Sexuality", Sacral),
    gate(60, "Acceptance", Root),
    gate(61, "Mystery", Head),
    gate(62, "Details", Throat),
    gate(63, "Doubt", Head),
    gate(64, "Confusion", Head),
];

pub fn gate_info(number: u8) -> Option<&'static GateInfo> {
    GATES.get(usize::from(number).checked_sub(1)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_number() {
        for (i, info) in GATES.iter().enumerate() {
            assert_eq!(usize::from(info.number), i + 1);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(gate_info(1).map(|g| g.center), Some(Center::G));
        assert_eq!(gate_info(64).map(|g| g.name), Some("Confusion"));
        assert!(gate_info(0).is_none());
        assert!(gate_info(65).is_none());
    }

    #[test]
    fn test_center_display_name() {
        assert_eq!(Center::SolarPlexus.to_string(), "Solar Plexus");
        assert_eq!(gate_info(6).map(|g| g.center), Some(Center::SolarPlexus));
    }

    #[test]
    fn test_head_has_three_gates() {
        let head: Vec<u8> = GATES
            .iter()
            .filter(|g| g.center == Center::Head)
            .map(|g| g.number)
            .collect();
        assert_eq!(head, vec![61, 63, 64]);
    }
}
