// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and rules that define what the system is
// about: characters, the vocabulary that numbers them, the
// rule that assigns a class to a string, and the shape of a
// prediction.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, functions and traits
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

// Character tokens and the token → index table
pub mod vocab;

// The priority-ordered character group rule
pub mod label;

// One classified input string
pub mod prediction;

// Core abstractions (traits) that other layers implement
pub mod traits;
