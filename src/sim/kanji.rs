//! Kanji catalog
//!
//! Static table of characters and the romaji reading the player types to
//! eliminate an ant wearing that character. Readings may collide (日 and 火
//! are both "hi"); a guess then removes the oldest matching ant.

use rand::Rng;
use serde::Serialize;

/// One catalog row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KanjiEntry {
    pub kanji: &'static str,
    /// Lowercase romaji
    pub reading: &'static str,
}

impl KanjiEntry {
    pub const fn new(kanji: &'static str, reading: &'static str) -> Self {
        Self { kanji, reading }
    }
}

/// Builtin kanji set: days of the week plus a few nature characters
pub const BUILTIN_KANJI: &[KanjiEntry] = &[
    KanjiEntry::new("日", "hi"),
    KanjiEntry::new("月", "tsuki"),
    KanjiEntry::new("火", "hi"),
    KanjiEntry::new("水", "mizu"),
    KanjiEntry::new("木", "ki"),
    KanjiEntry::new("金", "kin"),
    KanjiEntry::new("土", "tsuchi"),
    KanjiEntry::new("山", "yama"),
    KanjiEntry::new("川", "kawa"),
    KanjiEntry::new("田", "ta"),
];

/// Read-only view over a kanji table
#[derive(Debug, Clone, Copy)]
pub struct KanjiCatalog {
    entries: &'static [KanjiEntry],
}

impl Default for KanjiCatalog {
    fn default() -> Self {
        Self::new(BUILTIN_KANJI)
    }
}

impl KanjiCatalog {
    /// Wrap a table. An empty table is replaced by the builtin one so that
    /// every spawned ant always has a character.
    pub fn new(entries: &'static [KanjiEntry]) -> Self {
        if entries.is_empty() {
            log::warn!("Empty kanji table, falling back to builtin catalog");
            return Self {
                entries: BUILTIN_KANJI,
            };
        }
        Self { entries }
    }

    pub fn entries(&self) -> &'static [KanjiEntry] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static KanjiEntry> {
        self.entries.get(index)
    }

    /// Uniformly random entry
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static KanjiEntry {
        let index = rng.random_range(0..self.entries.len());
        &self.entries[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_builtin_readings_are_lowercase_ascii() {
        let catalog = KanjiCatalog::default();
        assert_eq!(catalog.len(), 10);
        for entry in catalog.entries() {
            assert!(!entry.reading.is_empty());
            assert!(entry.reading.chars().all(|c| c.is_ascii_lowercase()));
            assert_eq!(entry.kanji.chars().count(), 1);
        }
    }

    #[test]
    fn test_shared_reading() {
        let catalog = KanjiCatalog::default();
        let hi: Vec<_> = catalog
            .entries()
            .iter()
            .filter(|e| e.reading == "hi")
            .map(|e| e.kanji)
            .collect();
        assert_eq!(hi, vec!["日", "火"]);
    }

    #[test]
    fn test_pick_covers_table() {
        let catalog = KanjiCatalog::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 10];
        for _ in 0..1000 {
            let entry = catalog.pick(&mut rng);
            let index = catalog
                .entries()
                .iter()
                .position(|e| e == entry)
                .unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_empty_table_falls_back() {
        const EMPTY: &[KanjiEntry] = &[];
        let catalog = KanjiCatalog::new(EMPTY);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get(7).map(|e| e.reading), Some("yama"));
    }
}
