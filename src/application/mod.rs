// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: these use cases tell the other
// layers what to do, in which order, with which config.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training workflow
pub mod train_use_case;

// Load a trained model and classify strings
pub mod predict_use_case;
