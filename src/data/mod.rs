// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the vocabulary and a tensor batch.
// There are no files to read: every sample is generated on
// the fly from random characters.
//
//   Vocabulary
//       │
//       ▼
//   build_sample      → random characters, one-hot label
//       │
//       ▼
//   build_dataset     → N independent samples (CharDataset)
//       │
//       ▼
//   CharBatcher       → [batch, seq_len] ids + [batch, classes] labels
//
// Reference: Burn Book §4 (Datasets and Batchers)
//            rand crate documentation

/// One random sample and the generator that draws it
pub mod sample;

/// Implements Burn's Dataset trait for generated samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
