// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Writes the vocabulary as UTF-8 JSON with 2-space indentation
// and non-ASCII characters kept as-is:
//
//   {
//     "a": 0,
//     "b": 1,
//     ...
//     "unk": 26
//   }
//
// Training and inference must share this file: the embedding
// rows only mean something under the mapping they were trained
// with.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::domain::{traits::Persistable, vocab::Vocabulary};

impl Persistable for Vocabulary {
    fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Cannot write vocabulary to '{}'", path.display()))?;

        tracing::debug!("Saved vocabulary ({} entries) to '{}'", self.len(), path.display());
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read vocabulary from '{}'", path.display()))?;

        let vocab: Vocabulary = serde_json::from_str(&json)
            .with_context(|| format!("Invalid vocabulary file '{}'", path.display()))?;
        Ok(vocab)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vocab::Token;

    #[test]
    fn test_round_trip() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.json");

        let vocab = Vocabulary::build();
        vocab.save(&path).unwrap();
        let loaded = Vocabulary::load(&path).unwrap();

        assert_eq!(loaded, vocab);
        for token in vocab.tokens() {
            assert_eq!(loaded.get(token), vocab.get(token));
        }
    }

    #[test]
    fn test_file_layout() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.json");
        Vocabulary::build().save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"a\": 0,\n  \"b\": 1,"));
        assert!(text.ends_with("  \"unk\": 26\n}"));
    }

    #[test]
    fn test_non_ascii_is_not_escaped() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.json");
        fs::write(&path, r#"{"é": 0, "unk": 1}"#).unwrap();

        let vocab = Vocabulary::load(&path).unwrap();
        assert_eq!(vocab.get(&Token::Char('é')), Some(0));

        vocab.save(&path).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("\"é\": 0"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Vocabulary::load(&dir.path().join("absent.json")).is_err());
    }
}
