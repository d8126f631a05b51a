use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of planetary rows in each column of the chart.
pub const PLANET_COUNT: usize = 13;

/// The planets in the order the chart renders them, top to bottom.
///
/// Segment `i` of a column always belongs to `PLANET_ORDER[i]`.
pub const PLANET_ORDER: [Planet; PLANET_COUNT] = [
    Planet::Sun,
    Planet::Earth,
    Planet::Moon,
    Planet::NorthNode,
    Planet::SouthNode,
    Planet::Mercury,
    Planet::Venus,
    Planet::Mars,
    Planet::Jupiter,
    Planet::Saturn,
    Planet::Uranus,
    Planet::Neptune,
    Planet::Pluto,
];

/// A planetary row label. Ordering follows the chart's vertical layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Planet {
    Sun,
    Earth,
    Moon,
    #[serde(rename = "North Node")]
    NorthNode,
    #[serde(rename = "South Node")]
    SouthNode,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Planet {
    /// Display name as printed on the chart and in annotation files.
    pub fn name(self) -> &'static str {
        match self {
            Planet::Sun => "Sun",
            Planet::Earth => "Earth",
            Planet::Moon => "Moon",
            Planet::NorthNode => "North Node",
            Planet::SouthNode => "South Node",
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
            Planet::Pluto => "Pluto",
        }
    }

    /// Row index (0-based) of this planet within a column.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Planet> {
        let name = name.trim();
        PLANET_ORDER
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the two numeric columns of the chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Column {
    /// Red column, the unconscious side.
    Design,
    /// Black column, the conscious side.
    Personality,
}

impl Column {
    pub const ALL: [Column; 2] = [Column::Design, Column::Personality];

    pub fn name(self) -> &'static str {
        match self {
            Column::Design => "Design",
            Column::Personality => "Personality",
        }
    }

    /// Ink colour of the column on the rendered chart.
    pub fn color(self) -> &'static str {
        match self {
            Column::Design => "red",
            Column::Personality => "black",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_order() {
        for (i, planet) in PLANET_ORDER.iter().enumerate() {
            assert_eq!(planet.index(), i);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Planet::from_name("North Node"), Some(Planet::NorthNode));
        assert_eq!(Planet::from_name("  pluto "), Some(Planet::Pluto));
        assert_eq!(Planet::from_name("Chiron"), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Planet::SouthNode).unwrap();
        assert_eq!(json, "\"South Node\"");
    }
}
