//! Edge attributes and the segment records handed over by ingestion.

use serde::{Deserialize, Serialize};

/// Speed limit assumed when a segment carries none (or zero).
pub const DEFAULT_SPEED_LIMIT: u32 = 25;

/// Geographic position of a node. Display only; no algorithm reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Attributes of one directed road edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadAttributes {
    /// Road name. Not unique: a long road is split into many edges.
    pub name: String,
    /// Segment length in distance units.
    pub length: f64,
    /// Posted speed limit. Zero means missing.
    #[serde(default)]
    pub speed_limit: u32,
    /// Precomputed traversal time; overrides the length/speed derivation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_time: Option<f64>,
}

impl RoadAttributes {
    #[must_use]
    pub fn new(name: impl Into<String>, length: f64, speed_limit: u32) -> Self {
        Self {
            name: name.into(),
            length,
            speed_limit,
            travel_time: None,
        }
    }

    #[must_use]
    pub const fn with_travel_time(mut self, travel_time: f64) -> Self {
        self.travel_time = Some(travel_time);
        self
    }

    /// Speed limit with the missing/zero case replaced by
    /// [`DEFAULT_SPEED_LIMIT`].
    #[must_use]
    pub const fn effective_speed_limit(&self) -> u32 {
        if self.speed_limit > 0 {
            self.speed_limit
        } else {
            DEFAULT_SPEED_LIMIT
        }
    }

    /// Search weight: `travel_time` if present, else
    /// `length / effective_speed_limit`.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.travel_time
            .unwrap_or_else(|| self.length / f64::from(self.effective_speed_limit()))
    }
}

/// Direction in which a segment may be driven.
///
/// Serialized as the numeric codes used by road datasets:
/// `0` two-way, `1` start → end, `2` end → start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OneWay {
    #[default]
    TwoWay,
    Forward,
    Backward,
}

impl TryFrom<u8> for OneWay {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::TwoWay),
            1 => Ok(Self::Forward),
            2 => Ok(Self::Backward),
            other => Err(format!("unknown one-way code {other} (expected 0, 1 or 2)")),
        }
    }
}

impl From<OneWay> for u8 {
    fn from(value: OneWay) -> Self {
        match value {
            OneWay::TwoWay => 0,
            OneWay::Forward => 1,
            OneWay::Backward => 2,
        }
    }
}

/// One road segment between two externally keyed endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    pub from: u64,
    pub to: u64,
    #[serde(flatten)]
    pub attrs: RoadAttributes,
    #[serde(default)]
    pub one_way: OneWay,
}

impl RoadSegment {
    #[must_use]
    pub fn new(from: u64, to: u64, name: impl Into<String>, length: f64, speed_limit: u32) -> Self {
        Self {
            from,
            to,
            attrs: RoadAttributes::new(name, length, speed_limit),
            one_way: OneWay::TwoWay,
        }
    }

    #[must_use]
    pub const fn one_way(mut self, one_way: OneWay) -> Self {
        self.one_way = one_way;
        self
    }

    #[must_use]
    pub fn travel_time(mut self, travel_time: f64) -> Self {
        self.attrs.travel_time = Some(travel_time);
        self
    }

    /// Directed `(from, to)` key pairs this segment materializes as.
    #[must_use]
    pub fn directed_pairs(&self) -> Vec<(u64, u64)> {
        match self.one_way {
            OneWay::TwoWay => vec![(self.from, self.to), (self.to, self.from)],
            OneWay::Forward => vec![(self.from, self.to)],
            OneWay::Backward => vec![(self.to, self.from)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_prefers_travel_time() {
        let attrs = RoadAttributes::new("STATE ST", 100.0, 50).with_travel_time(7.5);
        assert!((attrs.weight() - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn weight_derives_from_length_and_speed() {
        let attrs = RoadAttributes::new("STATE ST", 100.0, 50);
        assert!((attrs.weight() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_speed_limit_falls_back_to_default() {
        let attrs = RoadAttributes::new("ALLEY", 50.0, 0);
        assert_eq!(attrs.effective_speed_limit(), DEFAULT_SPEED_LIMIT);
        assert!((attrs.weight() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn one_way_codes_round_trip_through_u8() {
        for (code, expected) in [
            (0_u8, OneWay::TwoWay),
            (1, OneWay::Forward),
            (2, OneWay::Backward),
        ] {
            assert_eq!(OneWay::try_from(code), Ok(expected));
            assert_eq!(u8::from(expected), code);
        }
        assert!(OneWay::try_from(3).is_err());
    }

    #[test]
    fn directed_pairs_follow_one_way_status() {
        let seg = RoadSegment::new(1, 2, "A", 1.0, 25);
        assert_eq!(seg.directed_pairs(), vec![(1, 2), (2, 1)]);
        assert_eq!(
            seg.clone().one_way(OneWay::Forward).directed_pairs(),
            vec![(1, 2)]
        );
        assert_eq!(seg.one_way(OneWay::Backward).directed_pairs(), vec![(2, 1)]);
    }

    #[test]
    fn segment_deserializes_from_flat_json() {
        let json = r#"{"from":1,"to":2,"name":"1700 S","length":30.0,"speed_limit":30,"one_way":1}"#;
        let seg: RoadSegment = serde_json::from_str(json).expect("segment json should parse");
        assert_eq!(seg.attrs.name, "1700 S");
        assert_eq!(seg.one_way, OneWay::Forward);
        assert_eq!(seg.attrs.travel_time, None);
    }
}
