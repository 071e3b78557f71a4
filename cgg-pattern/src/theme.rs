use crate::level::Level;
use log::debug;
use std::fmt;

/// A yarn color assigned to one color role of the pattern.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct YarnColor {
    pub name: &'static str,
    pub hex: &'static str,
    pub level: Level,
    pub description: &'static str,
}

impl YarnColor {
    pub fn indicator(&self) -> char {
        self.level.indicator()
    }
}

/// The selectable yarn palettes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum ThemeId {
    #[default]
    Light,
    Dark,
    Spooky,
}

const fn yarn(name: &'static str, hex: &'static str, level: u8, description: &'static str) -> YarnColor {
    YarnColor {
        name,
        hex,
        level: Level::ALL[level as usize],
        description,
    }
}

const NO_COMMITS: &str = "Background color for days with no commits";
const FEW_COMMITS: &str = "Days with 1-2 commits";
const SOME_COMMITS: &str = "Days with 3-5 commits";
const MANY_COMMITS: &str = "Days with 6-8 commits";
const MOST_COMMITS: &str = "Days with 9+ commits";

static LIGHT: [YarnColor; 6] = [
    yarn("Cream", "#f8f9fa", 0, NO_COMMITS),
    yarn("Light Green", "#c6e48b", 1, FEW_COMMITS),
    yarn("Medium Green", "#7bc96f", 2, SOME_COMMITS),
    yarn("Dark Green", "#239a3b", 3, MANY_COMMITS),
    yarn("Forest Green", "#196127", 4, MOST_COMMITS),
    yarn("Border", "#fffdd0", 5, "Border around and between years (Cream)"),
];

static DARK: [YarnColor; 6] = [
    yarn("Charcoal", "#2d333b", 0, NO_COMMITS),
    yarn("Light Green", "#0e4429", 1, FEW_COMMITS),
    yarn("Medium Green", "#006d32", 2, SOME_COMMITS),
    yarn("Dark Green", "#26a641", 3, MANY_COMMITS),
    yarn("Forest Green", "#39d353", 4, MOST_COMMITS),
    yarn("Border", "#196127", 5, "Border around and between years (Forest Green)"),
];

static SPOOKY: [YarnColor; 6] = [
    yarn("Charcoal", "#2d333b", 0, NO_COMMITS),
    yarn("Light Orange", "#ffd8a8", 1, FEW_COMMITS),
    yarn("Medium Orange", "#ffa94d", 2, SOME_COMMITS),
    yarn("Dark Orange", "#f76707", 3, MANY_COMMITS),
    yarn("Burnt Orange", "#c2410c", 4, MOST_COMMITS),
    yarn("Border", "#ff7518", 5, "Border around and between years (Pumpkin Orange)"),
];

impl ThemeId {
    pub const ALL: [ThemeId; 3] = [ThemeId::Light, ThemeId::Dark, ThemeId::Spooky];

    /// Resolve a user-supplied key. Unknown keys fall back to the default
    /// (light) theme rather than failing.
    pub fn from_key(key: &str) -> ThemeId {
        match key.trim().to_ascii_lowercase().as_str() {
            "light" => ThemeId::Light,
            "dark" => ThemeId::Dark,
            "spooky" => ThemeId::Spooky,
            other => {
                debug!("unrecognized theme {other:?}, using {}", ThemeId::default());
                ThemeId::default()
            }
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ThemeId::Light => "light",
            ThemeId::Dark => "dark",
            ThemeId::Spooky => "spooky",
        }
    }

    /// Heading used in the instructions ("Light Mode", ...).
    pub fn mode_label(self) -> &'static str {
        match self {
            ThemeId::Light => "Light",
            ThemeId::Dark => "Dark",
            ThemeId::Spooky => "Spooky",
        }
    }

    /// Yarn used for the border band.
    pub fn border_yarn(self) -> &'static str {
        match self {
            ThemeId::Light => "Cream",
            ThemeId::Dark => "Forest Green",
            ThemeId::Spooky => "Pumpkin Orange",
        }
    }

    /// The six color roles, indexed by level value.
    pub fn colors(self) -> &'static [YarnColor; 6] {
        match self {
            ThemeId::Light => &LIGHT,
            ThemeId::Dark => &DARK,
            ThemeId::Spooky => &SPOOKY,
        }
    }

    pub fn color(self, level: Level) -> &'static YarnColor {
        &self.colors()[level.index()]
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
