// ============================================================
// Layer 5 — Inferencer
// ============================================================
use std::path::Path;

use anyhow::{anyhow, bail, ensure, Result};
use burn::prelude::*;

use crate::application::train_use_case::ModelDims;
use crate::data::batcher::CharBatcher;
use crate::domain::{
    label::real_class_of_str,
    prediction::Prediction,
    traits::{Persistable, StringClassifier},
    vocab::{Token, Vocabulary},
};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::CharClassifier;

pub struct Inferencer<B: Backend> {
    model:  CharClassifier<B>,
    vocab:  Vocabulary,
    device: B::Device,
}

impl<B: Backend> Inferencer<B> {
    pub fn new(model: CharClassifier<B>, vocab: Vocabulary, device: B::Device) -> Self {
        Self { model, vocab, device }
    }

    /// Rebuild a model from saved files. The architecture is not
    /// stored with the weights, so `dims` must match training.
    pub fn from_files(
        model_path: &Path,
        vocab_path: &Path,
        dims:       &ModelDims,
        device:     B::Device,
    ) -> Result<Self> {
        let vocab = Vocabulary::load(vocab_path)?;
        let model: CharClassifier<B> = dims.model_config(vocab.len()).init(&device);
        let model = CheckpointManager::new(model_path).load_model(model, &device)?;
        tracing::info!("Model loaded from '{}'", model_path.display());
        Ok(Self::new(model, vocab, device))
    }

    /// Map every character to its vocabulary index. Unlike sample
    /// generation there is no "unk" fallback: an unknown character
    /// is an error.
    pub fn encode(&self, input: &str) -> Result<Vec<usize>> {
        input
            .chars()
            .map(|c| {
                self.vocab
                    .get(&Token::Char(c))
                    .ok_or_else(|| anyhow!("character '{c}' in input '{input}' is not in the vocabulary"))
            })
            .collect()
    }

    pub fn predict(&self, inputs: &[String]) -> Result<Vec<Prediction>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let sequences = inputs
            .iter()
            .map(|s| self.encode(s))
            .collect::<Result<Vec<_>>>()?;

        let seq_len = sequences[0].len();
        ensure!(seq_len > 0, "input '{}' is empty", inputs[0]);
        if let Some((input, seq)) = inputs.iter().zip(&sequences).find(|(_, s)| s.len() != seq_len) {
            bail!(
                "input '{input}' has {} characters, expected {seq_len} like '{}'",
                seq.len(),
                inputs[0],
            );
        }

        let batcher = CharBatcher::<B>::new(self.device.clone());
        let probs   = self.model.forward(batcher.inputs(&sequences));
        let [_, class_num] = probs.dims();

        let flat: Vec<f32> = probs
            .into_data()
            .convert::<f32>()
            .to_vec()
            .map_err(|e| anyhow!("Cannot read probabilities: {e:?}"))?;

        let predictions = inputs
            .iter()
            .zip(flat.chunks(class_num))
            .map(|(input, row)| {
                let (predicted_class, probability) = arg_max(row);
                Prediction {
                    input: input.clone(),
                    predicted_class,
                    real_class: real_class_of_str(input),
                    probability,
                }
            })
            .collect();

        Ok(predictions)
    }
}

impl<B: Backend> StringClassifier for Inferencer<B> {
    fn classify(&self, inputs: &[String]) -> Result<Vec<Prediction>> {
        self.predict(inputs)
    }
}

/// (index, value) of the largest entry; the first one wins on ties.
fn arg_max(row: &[f32]) -> (usize, f32) {
    row.iter()
        .copied()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |best, (i, p)| if p > best.1 { (i, p) } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    use crate::ml::model::CharClassifierConfig;

    type TestBackend = NdArray;

    fn inferencer() -> Inferencer<TestBackend> {
        let device = Default::default();
        let vocab  = Vocabulary::build();
        let model  = CharClassifierConfig::new(vocab.len()).init(&device);
        Inferencer::new(model, vocab, device)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_encode_letters() {
        assert_eq!(inferencer().encode("abz").unwrap(), vec![0, 1, 25]);
    }

    #[test]
    fn test_encode_rejects_unknown_character() {
        let err = inferencer().encode("ab1").unwrap_err();
        assert!(err.to_string().contains("'1'"));
    }

    #[test]
    fn test_predict_demo_strings() {
        let inputs = strings(&["ffazye", "twndfg", "rqwzyg", "qdkwww"]);
        let preds  = inferencer().predict(&inputs).unwrap();

        assert_eq!(preds.len(), 4);
        let real: Vec<usize> = preds.iter().map(|p| p.real_class).collect();
        assert_eq!(real, vec![1, 2, 3, 0]);
        for p in &preds {
            assert!(p.predicted_class < 4);
            assert!(p.probability > 0.0 && p.probability <= 1.0);
        }
    }

    #[test]
    fn test_predict_rejects_mixed_lengths() {
        assert!(inferencer().predict(&strings(&["abcdef", "abc"])).is_err());
    }

    #[test]
    fn test_predict_nothing() {
        assert!(inferencer().predict(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_from_files_rejects_other_dims() {
        let dir        = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.mpk");
        let vocab_path = dir.path().join("vocab.json");

        let vocab = Vocabulary::build();
        let model: CharClassifier<TestBackend> =
            ModelDims::default().model_config(vocab.len()).init(&Default::default());
        CheckpointManager::new(&model_path).save_model(&model).unwrap();
        vocab.save(&vocab_path).unwrap();

        let load = |dims: ModelDims| {
            Inferencer::<TestBackend>::from_files(&model_path, &vocab_path, &dims, Default::default())
        };
        assert!(load(ModelDims::default()).is_ok());
        assert!(load(ModelDims { hidden_size: 32, ..Default::default() }).is_err());
        assert!(load(ModelDims { char_dim: 64, ..Default::default() }).is_err());
        assert!(load(ModelDims { class_num: 7, ..Default::default() }).is_err());
    }

    #[test]
    fn test_arg_max_first_wins() {
        assert_eq!(arg_max(&[0.1, 0.4, 0.4, 0.1]), (1, 0.4));
    }
}
