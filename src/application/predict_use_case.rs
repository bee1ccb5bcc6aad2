// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Loads a trained model and classifies raw strings:
//
//   Step 1: Load vocabulary JSON        (Layer 6 - infra)
//   Step 2: Rebuild model from ModelDims (Layer 5 - ml)
//   Step 3: Overwrite its weights        (Layer 6 - infra)
//   Step 4: Encode + classify inputs     (Layer 5 - ml)
//
// Every input must use only characters from the vocabulary
// and all inputs of one call must have the same length.

use anyhow::Result;
use std::path::PathBuf;

use crate::application::train_use_case::ModelDims;
use crate::domain::{prediction::Prediction, traits::StringClassifier};
use crate::ml::{inferencer::Inferencer, trainer::InferBackend};

/// Strings classified when none are given on the command line
pub const DEMO_INPUTS: [&str; 4] = ["ffazye", "twndfg", "rqwzyg", "qdkwww"];

#[derive(Debug, Clone)]
pub struct PredictConfig {
    pub model_path: PathBuf,
    pub vocab_path: PathBuf,
    pub dims:       ModelDims,
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.mpk"),
            vocab_path: PathBuf::from("vocab.json"),
            dims:       ModelDims::default(),
        }
    }
}

pub struct PredictUseCase {
    classifier: Box<dyn StringClassifier>,
}

impl PredictUseCase {
    pub fn new(config: &PredictConfig) -> Result<Self> {
        let inferencer = Inferencer::<InferBackend>::from_files(
            &config.model_path,
            &config.vocab_path,
            &config.dims,
            Default::default(),
        )?;
        Ok(Self { classifier: Box::new(inferencer) })
    }

    pub fn predict(&self, inputs: &[String]) -> Result<Vec<Prediction>> {
        let predictions = self.classifier.classify(inputs)?;
        let correct = predictions.iter().filter(|p| p.is_correct()).count();
        tracing::info!("{} of {} predictions match the label rule", correct, predictions.len());
        Ok(predictions)
    }
}
