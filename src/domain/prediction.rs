// ============================================================
// Layer 3 — Prediction Domain Type
// ============================================================
// The result of classifying one input string: what the model
// said, what the label rule says, and how sure the model was.

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The raw input string
    pub input: String,

    /// Arg-max of the model's output distribution
    pub predicted_class: usize,

    /// Class given by the label rule
    pub real_class: usize,

    /// Model probability of `predicted_class`
    pub probability: f32,
}

impl Prediction {
    pub fn is_correct(&self) -> bool {
        self.predicted_class == self.real_class
    }
}
