//! Label vocabulary configuration

use super::table::LabelError;
use super::transform::{Transform, REFERENCE_TRANSFORMS};

/// Bumped whenever the reference words, seeds or mixers change.
/// Any change rewrites every label.
pub const REFERENCE_VERSION: u32 = 1;

/// Separator used by the reference configuration (labels are rendered into HTML)
pub const REFERENCE_SEPARATOR: &str = "<br>";

const REFERENCE_WORDS: [&[&str]; 5] = [
    &[
        "Alpha", "Brave", "Cosmic", "Digital", "Electric", "Frozen", "Golden", "Hidden", "Iron",
        "Jade", "Mystic", "Noble", "Omega", "Prime", "Quantum", "Royal", "Solar", "Titan", "Ultra",
        "Void", "Wild", "Xeno", "Zenith",
    ],
    &[
        "Lion", "Dragon", "Eagle", "Phoenix", "Tiger", "Wolf", "Hawk", "Falcon", "Raven", "Owl",
        "Shark", "Bear", "Fox", "Panther", "Griffin", "Basilisk", "Chimera", "Hydra", "Kraken",
        "Manticore", "Pegasus", "Unicorn",
    ],
    &[
        "Stone", "Fire", "Storm", "Blade", "Shield", "Star", "Moon", "Sun", "Wave", "Flame", "Ice",
        "Light", "Shadow", "Metal", "Crystal", "Earth", "Air", "Water", "Energy", "Plasma",
        "Vortex", "Nova",
    ],
    &[
        "Bolt", "X", "Mark", "Core", "Edge", "Shift", "Pulse", "Spark", "Surge", "Flux", "Beam",
        "Ray", "Field", "Ring", "Disk", "Node", "Gate", "Key", "Lock", "Chain", "Grid", "Web",
    ],
    &[
        "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
        "Lambda", "Mu", "Nu", "Xi", "Omicron", "Pi", "Rho", "Sigma", "Tau", "Upsilon", "Phi",
        "Chi", "Psi", "Omega",
    ],
];

/// One slot of a label: its vocabulary, shuffle seed and minute mixer
#[derive(Debug, Clone)]
pub struct Position {
    /// Candidate words for this slot
    pub words: Vec<String>,

    /// Seed string hashed to shuffle `words`
    pub seed: String,

    /// Mixer applied to the minute index before selecting a word
    pub transform: Transform,
}

impl Position {
    /// Create a position from a word list, seed and mixer
    pub fn new(words: Vec<String>, seed: impl Into<String>, transform: Transform) -> Self {
        Self {
            words,
            seed: seed.into(),
            transform,
        }
    }
}

/// Validated label configuration
///
/// Every position has at least one word, so building a table from it
/// cannot fail.
#[derive(Debug, Clone)]
pub struct LabelConfig {
    positions: Vec<Position>,
    separator: String,
}

impl LabelConfig {
    /// Create a configuration, rejecting empty position lists and empty banks
    pub fn new(positions: Vec<Position>, separator: impl Into<String>) -> Result<Self, LabelError> {
        if positions.is_empty() {
            return Err(LabelError::NoPositions);
        }
        if let Some(position) = positions.iter().position(|p| p.words.is_empty()) {
            return Err(LabelError::EmptyBank { position });
        }

        Ok(Self {
            positions,
            separator: separator.into(),
        })
    }

    /// The versioned reference vocabulary: five positions seeded
    /// `position_{p}_seed`, joined with `<br>`
    pub fn reference() -> Self {
        let positions = REFERENCE_WORDS
            .iter()
            .zip(REFERENCE_TRANSFORMS)
            .enumerate()
            .map(|(p, (words, transform))| {
                Position::new(
                    words.iter().map(|w| w.to_string()).collect(),
                    format!("position_{}_seed", p),
                    transform,
                )
            })
            .collect();

        Self {
            positions,
            separator: REFERENCE_SEPARATOR.to_string(),
        }
    }

    /// Replace the separator
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self::reference()
    }
}
