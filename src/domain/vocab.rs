// ============================================================
// Layer 3 — Vocabulary
// ============================================================
// Maps every character the model can see to a unique integer
// index, which the embedding layer uses as a row number.
//
// The built-in vocabulary is:
//   "a" → 0, "b" → 1, ..., "z" → 25, "unk" → 26
//
// "unk" is a token in its own right: it is a key of the table
// and can be drawn by the sample generator like any letter.
//
// On disk the vocabulary is a JSON object written in index
// order, so a saved file reads exactly like the table above.
//
// Reference: Rust Book §8 (Hash Maps)
//            serde documentation (container attributes)

use std::{collections::HashMap, fmt};

use anyhow::{anyhow, bail};
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

/// The characters of the built-in vocabulary, in index order
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// JSON key of the "unknown" token
pub const UNK_KEY: &str = "unk";

// ─── Token ────────────────────────────────────────────────────────────────────
/// One vocabulary key: either a single character or the
/// literal "unk" token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Char(char),
    Unk,
}

impl Token {
    /// Parse a vocabulary key. Only single characters and "unk"
    /// are valid keys.
    pub fn parse(key: &str) -> Option<Self> {
        if key == UNK_KEY {
            return Some(Token::Unk);
        }
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Token::Char(c)),
            _ => None,
        }
    }

    /// The character behind this token, `None` for "unk"
    pub fn as_char(&self) -> Option<char> {
        match self {
            Token::Char(c) => Some(*c),
            Token::Unk => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Char(c) => write!(f, "{c}"),
            Token::Unk => f.write_str(UNK_KEY),
        }
    }
}

// ─── Vocabulary ───────────────────────────────────────────────────────────────
/// Immutable token ↔ index table.
///
/// Invariants (checked on every construction path):
///   - indices are exactly 0..len, no gaps, no duplicates
///   - the "unk" token is present
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "HashMap<String, usize>")]
pub struct Vocabulary {
    /// Index → token
    tokens: Vec<Token>,

    /// Token → index
    index: HashMap<Token, usize>,

    unk_index: usize,
}

impl Vocabulary {
    /// Build the fixed 27-entry vocabulary: a..z in alphabetical
    /// order, then "unk".
    pub fn build() -> Self {
        let tokens: Vec<Token> = ALPHABET
            .chars()
            .map(Token::Char)
            .chain(std::iter::once(Token::Unk))
            .collect();
        Self::from_tokens(tokens)
    }

    fn from_tokens(tokens: Vec<Token>) -> Self {
        let index: HashMap<Token, usize> = tokens
            .iter()
            .enumerate()
            .map(|(i, &t)| (t, i))
            .collect();
        let unk_index = index[&Token::Unk];
        Self { tokens, index, unk_index }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false: every construction path includes "unk"
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All keys in index order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Index of `token`, if it is part of the vocabulary
    pub fn get(&self, token: &Token) -> Option<usize> {
        self.index.get(token).copied()
    }

    pub fn unk_index(&self) -> usize {
        self.unk_index
    }

    /// Index of `token`, falling back to the "unk" index for
    /// tokens the vocabulary does not know.
    pub fn index_or_unk(&self, token: &Token) -> usize {
        self.get(token).unwrap_or(self.unk_index)
    }
}

// ─── Serde ────────────────────────────────────────────────────────────────────
// Serialised as a flat JSON object in index order.
impl Serialize for Vocabulary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tokens.len()))?;
        for (i, token) in self.tokens.iter().enumerate() {
            map.serialize_entry(&token.to_string(), &i)?;
        }
        map.end()
    }
}

impl TryFrom<HashMap<String, usize>> for Vocabulary {
    type Error = anyhow::Error;

    fn try_from(raw: HashMap<String, usize>) -> Result<Self, Self::Error> {
        let mut slots: Vec<Option<Token>> = vec![None; raw.len()];

        for (key, idx) in raw {
            let token = Token::parse(&key)
                .ok_or_else(|| anyhow!("vocabulary key '{key}' is neither a single character nor '{UNK_KEY}'"))?;
            let slot = slots
                .get_mut(idx)
                .ok_or_else(|| anyhow!("index {idx} of key '{key}' is out of range"))?;
            if let Some(existing) = slot {
                bail!("index {idx} is used by both '{existing}' and '{key}'");
            }
            *slot = Some(token);
        }

        // Every slot is filled once the loop above succeeds: n keys,
        // n slots, no index used twice.
        let tokens: Vec<Token> = slots.into_iter().flatten().collect();
        if !tokens.contains(&Token::Unk) {
            bail!("vocabulary has no '{UNK_KEY}' entry");
        }
        Ok(Self::from_tokens(tokens))
    }
}
