use serde::{Deserialize, Serialize};
use std::fmt;

/// Character printed for border squares in the symbolic transcript.
pub const BORDER_INDICATOR: char = 'B';

/// Ordinal color bucket of a square.
///
/// Levels 0 through 4 are activity intensities, level 5 is reserved for the
/// border yarn. The inner value never leaves `0..=5`.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const NONE: Level = Level(0);
    pub const BORDER: Level = Level(5);
    /// Highest activity level.
    pub const MAX_ACTIVITY: Level = Level(4);

    /// All six color roles in table order: five activity levels, then border.
    pub const ALL: [Level; 6] = [Level(0), Level(1), Level(2), Level(3), Level(4), Level(5)];

    pub fn new(value: u8) -> Option<Level> {
        (value <= Self::BORDER.0).then_some(Level(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_border(self) -> bool {
        self == Self::BORDER
    }

    /// Single transcript character: a digit for activity levels, `B` for border.
    pub fn indicator(self) -> char {
        if self.is_border() {
            BORDER_INDICATOR
        } else {
            char::from(b'0' + self.0)
        }
    }

    /// Inverse of [`Level::indicator`].
    pub fn from_indicator(c: char) -> Option<Level> {
        match c {
            BORDER_INDICATOR => Some(Self::BORDER),
            '0'..='4' => c.to_digit(10).map(|d| Level(d as u8)),
            _ => None,
        }
    }
}

/// Map a raw daily count to its activity level.
///
/// The thresholds mirror the contribution graph buckets and are fixed:
/// 0 → 0, 1–2 → 1, 3–5 → 2, 6–8 → 3, 9+ → 4.
pub fn classify(count: u32) -> Level {
    match count {
        0 => Level(0),
        1..=2 => Level(1),
        3..=5 => Level(2),
        6..=8 => Level(3),
        _ => Level(4),
    }
}

impl From<Level> for u8 {
    fn from(value: Level) -> Self {
        value.0
    }
}

impl TryFrom<u8> for Level {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Level::new(value).ok_or_else(|| format!("level {value} is outside 0..=5"))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.indicator())
    }
}
