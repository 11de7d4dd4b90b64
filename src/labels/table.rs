//! Precomputed minute-of-day label table

use super::config::LabelConfig;
use super::permutation::build_permutation;
use std::collections::HashMap;
use thiserror::Error;

/// Minutes in a day; the table always has this many entries
pub const MINUTES_PER_DAY: usize = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("invalid time {hour:02}:{minute:02} (expected hour 0-23, minute 0-59)")]
    InvalidIndex { hour: u32, minute: u32 },

    #[error("minute index {0} out of range (expected 0-1439)")]
    InvalidMinute(usize),

    #[error("label configuration has no positions")]
    NoPositions,

    #[error("word bank for position {position} is empty")]
    EmptyBank { position: usize },
}

/// A label shared by more than one minute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub label: String,

    /// Minute indices carrying this label, ascending
    pub minutes: Vec<usize>,
}

/// All 1440 labels, indexed by `hour * 60 + minute`
#[derive(Debug, Clone)]
pub struct LabelTable {
    labels: Vec<String>,
    permutations: Vec<Vec<usize>>,
}

impl LabelTable {
    /// Build the table for every minute of the day, in ascending order
    pub fn build(config: &LabelConfig) -> Self {
        let permutations: Vec<Vec<usize>> = config
            .positions()
            .iter()
            .map(|p| build_permutation(&p.seed, p.words.len()))
            .collect();

        let labels = (0..MINUTES_PER_DAY as u32)
            .map(|minute| assemble(config, &permutations, minute))
            .collect();

        Self {
            labels,
            permutations,
        }
    }

    /// Label for a wall-clock time
    pub fn lookup(&self, hour: u32, minute: u32) -> Result<&str, LabelError> {
        if hour > 23 || minute > 59 {
            return Err(LabelError::InvalidIndex { hour, minute });
        }
        Ok(&self.labels[(hour * 60 + minute) as usize])
    }

    /// Label for a raw minute index
    pub fn label(&self, index: usize) -> Result<&str, LabelError> {
        self.labels
            .get(index)
            .map(String::as_str)
            .ok_or(LabelError::InvalidMinute(index))
    }

    /// All labels in minute order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Shuffled bank indices, one permutation per position
    pub fn permutations(&self) -> &[Vec<usize>] {
        &self.permutations
    }

    /// Labels that occur for more than one minute, ordered by first occurrence
    ///
    /// Independent per-position selections can collide; this reports them
    /// rather than assuming uniqueness.
    pub fn collisions(&self) -> Vec<Collision> {
        let mut by_label: HashMap<&str, Vec<usize>> = HashMap::new();
        for (minute, label) in self.labels.iter().enumerate() {
            by_label.entry(label.as_str()).or_default().push(minute);
        }

        let mut collisions: Vec<Collision> = by_label
            .into_iter()
            .filter(|(_, minutes)| minutes.len() > 1)
            .map(|(label, minutes)| Collision {
                label: label.to_string(),
                minutes,
            })
            .collect();
        collisions.sort_by_key(|c| c.minutes[0]);
        collisions
    }
}

/// Bank index for one position; always `< bank_len`
pub(crate) fn select_index(value: u32, bank_len: usize) -> usize {
    value as usize % bank_len
}

fn assemble(config: &LabelConfig, permutations: &[Vec<usize>], minute: u32) -> String {
    config
        .positions()
        .iter()
        .zip(permutations)
        .map(|(position, perm)| {
            let idx = select_index((position.transform)(minute), position.words.len());
            position.words[perm[idx]].as_str()
        })
        .collect::<Vec<_>>()
        .join(config.separator())
}
