use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_GUESSES: u32 = 6;

/// A value per guess count 1..=6. Always holds all six slots; on the wire it
/// is an object keyed `"1"`..`"6"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ByGuessCount<T>([T; MAX_GUESSES as usize]);

pub type GuessDistribution = ByGuessCount<u32>;

pub fn is_valid_guess_count(guesses: u32) -> bool {
    (1..=MAX_GUESSES).contains(&guesses)
}

impl<T> ByGuessCount<T> {
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(u32) -> T,
    {
        ByGuessCount(std::array::from_fn(|index| f(index as u32 + 1)))
    }

    pub fn get(&self, guesses: u32) -> Option<&T> {
        if is_valid_guess_count(guesses) {
            self.0.get(guesses as usize - 1)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, guesses: u32) -> Option<&mut T> {
        if is_valid_guess_count(guesses) {
            self.0.get_mut(guesses as usize - 1)
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(index, value)| (index as u32 + 1, value))
    }
}

impl GuessDistribution {
    /// Counts one solve. Guess counts outside 1..=6 are not recorded.
    pub fn record(&mut self, guesses: u32) -> bool {
        match self.get_mut(guesses) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    pub fn count(&self, guesses: u32) -> u32 {
        self.get(guesses).copied().unwrap_or(0)
    }

    pub fn at_most(&self, guesses: u32) -> u32 {
        self.iter()
            .filter(|(g, _)| *g <= guesses)
            .map(|(_, count)| *count)
            .sum()
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

impl<T: Serialize> Serialize for ByGuessCount<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (guesses, value) in self.iter() {
            map.serialize_entry(&guesses.to_string(), value)?;
        }
        map.end()
    }
}

// Stored tables may be sparse, and some backends turn integer-keyed objects
// into arrays indexed from zero.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTable<T> {
    Keyed(BTreeMap<String, Option<T>>),
    Indexed(Vec<Option<T>>),
}

impl<'de, T> Deserialize<'de> for ByGuessCount<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut table = ByGuessCount::from_fn(|_| T::default());
        match StoredTable::<T>::deserialize(deserializer)? {
            StoredTable::Keyed(entries) => {
                for (key, value) in entries {
                    let (Ok(guesses), Some(value)) = (key.trim().parse::<u32>(), value) else {
                        continue;
                    };
                    if let Some(slot) = table.get_mut(guesses) {
                        *slot = value;
                    }
                }
            }
            StoredTable::Indexed(entries) => {
                for (index, value) in entries.into_iter().enumerate() {
                    if let (Some(slot), Some(value)) = (table.get_mut(index as u32), value) {
                        *slot = value;
                    }
                }
            }
        }
        Ok(table)
    }
}
