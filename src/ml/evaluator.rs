// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Measures accuracy on a freshly generated batch.
//
// The model passed in is an inference-mode model (e.g. the
// result of `model.valid()`), so no gradients are tracked.
// A prediction is correct when the arg-max of the output row
// is the position of the 1 in the one-hot label.

use anyhow::{ensure, Result};
use burn::prelude::*;
use rand::Rng;

use crate::data::{batcher::CharBatcher, dataset::build_dataset};
use crate::domain::vocab::Vocabulary;
use crate::ml::model::CharClassifier;

/// Outcome of one evaluation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub correct: usize,
    pub wrong:   usize,
}

impl Evaluation {
    pub fn total(&self) -> usize {
        self.correct + self.wrong
    }

    /// Fraction correct in [0.0, 1.0]
    pub fn accuracy(&self) -> f64 {
        self.correct as f64 / self.total().max(1) as f64
    }
}

/// Settings for one evaluation pass
#[derive(Debug, Clone, Copy)]
pub struct EvalSettings {
    pub sample_count:    usize,
    pub sentence_length: usize,
    pub class_num:       usize,
}

/// Generate `settings.sample_count` samples and score the model on them.
pub fn evaluate<B: Backend, R: Rng + ?Sized>(
    model:    &CharClassifier<B>,
    vocab:    &Vocabulary,
    settings: EvalSettings,
    rng:      &mut R,
    device:   &B::Device,
) -> Result<Evaluation> {
    ensure!(settings.sample_count > 0, "evaluation needs at least one sample");

    let dataset = build_dataset(
        rng, settings.sample_count, vocab, settings.sentence_length, settings.class_num,
    );
    let batcher = CharBatcher::<B>::new(device.clone());
    let inputs  = batcher.inputs(dataset.inputs());

    let predicted = predicted_classes(model.forward(inputs))?;

    let correct = predicted
        .iter()
        .zip(dataset.labels())
        .filter(|(&class, label)| label.get(class).copied() == Some(1.0))
        .count();
    let evaluation = Evaluation { correct, wrong: predicted.len() - correct };

    println!(
        "correct predictions: {}, accuracy: {:.6}",
        evaluation.correct,
        evaluation.accuracy()
    );
    Ok(evaluation)
}

/// Row-wise arg-max of a [batch, class_num] probability tensor.
pub fn predicted_classes<B: Backend>(probs: Tensor<B, 2>) -> Result<Vec<usize>> {
    let [batch_size, _] = probs.dims();
    let classes: Vec<i64> = probs
        .argmax(1)
        .reshape([batch_size])
        .into_data()
        .convert::<i64>()
        .to_vec()
        .map_err(|e| anyhow::anyhow!("Cannot read predictions: {e:?}"))?;
    Ok(classes.into_iter().map(|c| c as usize).collect())
}
