use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{ExtendError, Result};

/// Token -> id mapping that remembers the key order of its source document
///
/// The order matters: merging appends unseen tokens after existing ones and
/// assigns fresh ids in that combined order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    /// (token, id) pairs in document order
    entries: Vec<(String, u32)>,
    /// Position of each token in `entries`
    index: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Load a `vocab.json` file (a flat `{token: id}` object)
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file is not valid JSON
    /// - The document is not an object of unsigned 32-bit ids
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ExtendError::io(path, e))?;
        let value: Value = serde_json::from_str(&text).map_err(|e| ExtendError::json(path, e))?;
        Self::try_from(value)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| ExtendError::json("<inline vocabulary>", e))?;
        Self::try_from(value)
    }

    /// Insert a token at the end. An existing token keeps its position and
    /// gets the new id, the same way a JSON object with a repeated key does.
    fn insert(&mut self, token: String, id: u32) {
        match self.index.get(&token) {
            Some(&pos) => self.entries[pos].1 = id,
            None => {
                self.index.insert(token.clone(), self.entries.len());
                self.entries.push((token, id));
            }
        }
    }

    /// Union of two vocabularies with `self` taking priority
    ///
    /// Every token of `self` comes first, in its original order, followed by
    /// the tokens of `other` not already present, in `other`'s order. Ids are
    /// reassigned as 0..N-1 following that order, so the ids either input
    /// carried are discarded.
    pub fn merge(&self, other: &Vocabulary) -> Vocabulary {
        let mut merged = Vocabulary::with_capacity(self.len() + other.len());
        for token in self.tokens().chain(other.tokens()) {
            if !merged.contains(token) {
                let id = merged.len() as u32;
                merged.insert(token.to_owned(), id);
            }
        }
        merged
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(token, _)| token.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(token, id)| (token.as_str(), *id))
    }

    /// Write as compact JSON in insertion order, non-ASCII left unescaped
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string(self).map_err(|e| ExtendError::json(path, e))?;
        fs::write(path, json).map_err(|e| ExtendError::io(path, e))
    }
}

impl TryFrom<Value> for Vocabulary {
    type Error = ExtendError;

    fn try_from(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(ExtendError::InvalidVocab(
                "expected a JSON object mapping tokens to ids".into(),
            ));
        };

        let mut vocab = Vocabulary::with_capacity(map.len());
        for (token, id) in map {
            let id = id
                .as_u64()
                .and_then(|id| u32::try_from(id).ok())
                .ok_or_else(|| {
                    ExtendError::InvalidVocab(format!("id of token {token:?} is not a u32: {id}"))
                })?;
            vocab.insert(token, id);
        }
        Ok(vocab)
    }
}

impl Serialize for Vocabulary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
