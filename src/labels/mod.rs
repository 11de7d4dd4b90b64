//! Deterministic minute-of-day labels
//!
//! Every minute of the day maps to a five-word label such as
//! `Brave<br>Phoenix<br>Air<br>Bolt<br>Phi`. Words are picked from fixed
//! banks through per-position bit mixers and MD5-seeded shuffles, so the
//! table never changes unless the vocabulary does.

mod config;
mod permutation;
mod table;
pub mod transform;

pub use config::{LabelConfig, Position, REFERENCE_SEPARATOR, REFERENCE_VERSION};
pub use permutation::{build_permutation, is_bijection};
pub use table::{Collision, LabelError, LabelTable, MINUTES_PER_DAY};

use std::sync::OnceLock;

static REFERENCE_TABLE: OnceLock<LabelTable> = OnceLock::new();

/// Process-wide table for the reference vocabulary, built on first use
pub fn reference_table() -> &'static LabelTable {
    REFERENCE_TABLE.get_or_init(|| LabelTable::build(&LabelConfig::reference()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_table_is_cached() {
        let a = reference_table();
        let b = reference_table();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.lookup(0, 0).unwrap(), "Brave<br>Phoenix<br>Air<br>Bolt<br>Phi");
    }
}
