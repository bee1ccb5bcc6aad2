// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the filesystem:
//
//   checkpoint.rs  — model weights via Burn's recorder
//
//   vocab_store.rs — vocabulary JSON (Persistable impl), shared
//                    by training and inference
//
//   metrics.rs     — the per-epoch training log, its text chart
//                    and optional CSV output
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model weights saving and loading
pub mod checkpoint;

/// Vocabulary JSON saving and loading
pub mod vocab_store;

/// Training log, curves and CSV logger
pub mod metrics;
