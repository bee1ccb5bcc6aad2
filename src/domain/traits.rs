// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer talks to these traits, not to the
// concrete Burn-backed types behind them.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::Path;

use anyhow::Result;
use crate::domain::prediction::Prediction;

// ─── StringClassifier ─────────────────────────────────────────────────────────
/// Any component that can classify raw input strings.
///
/// Implementations:
///   - Inferencer → runs the trained RNN
pub trait StringClassifier {
    /// Classify every input, in order. Fails if an input cannot
    /// be encoded.
    fn classify(&self, inputs: &[String]) -> Result<Vec<Prediction>>;
}

// ─── Persistable ──────────────────────────────────────────────────────────────
/// Any component whose state can be saved and restored from disk.
///
/// Implementations:
///   - Vocabulary → pretty-printed JSON
pub trait Persistable: Sized {
    /// Save this component's state to the given path
    fn save(&self, path: &Path) -> Result<()>;

    /// Load a component's state from the given path.
    fn load(path: &Path) -> Result<Self>;
}
