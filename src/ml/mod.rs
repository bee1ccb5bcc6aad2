// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All tensor code lives here.
//
//   model.rs      — embedding → tanh RNN → linear → softmax,
//                   plus the cross-entropy used for training
//
//   trainer.rs    — Adam loop over freshly generated batches,
//                   one evaluation per epoch
//
//   evaluator.rs  — accuracy on a fresh random batch
//
//   inferencer.rs — loads weights + vocabulary and classifies
//                   raw strings
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Recurrent character classifier
pub mod model;

/// Training loop with per-epoch evaluation
pub mod trainer;

/// Accuracy on generated samples
pub mod evaluator;

/// Inference engine — loads a checkpoint and classifies strings
pub mod inferencer;
