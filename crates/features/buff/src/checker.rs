//! Buffs the store verifies after a buff run. Keys must match the store's own tables.

use revive_kernel::sync::sanitize::ident;

pub const BUFFS: &[&str] = &["mental_shield"];
pub const DANCES: &[&str] = &["dance_of_concentration", "dance_of_siren"];
pub const SONGS: &[&str] = &["song_of_earth", "song_of_vitality"];

/// Checkable keys by tab, in display order.
pub const CATALOGUE: &[(&str, &[&str])] = &[("Buffs", BUFFS), ("Dances", DANCES), ("Songs", SONGS)];

pub fn is_known(key: &str) -> bool {
    CATALOGUE.iter().any(|(_, keys)| keys.contains(&key))
}

/// Trimmed, lowercased keys without blanks or repeats, first occurrence kept.
pub fn selection<S: AsRef<str>>(keys: &[S]) -> Vec<String> {
    let mut selected: Vec<String> = Vec::with_capacity(keys.len());
    for key in keys.iter().map(|k| ident(k.as_ref()).to_lowercase()) {
        if !key.is_empty() && !selected.contains(&key) {
            selected.push(key);
        }
    }
    selected
}
