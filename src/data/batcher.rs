// ============================================================
// Layer 4 — Char Batcher
// ============================================================
// Implements Burn's Batcher trait to turn a Vec<Sample> into
// the two tensors the model consumes.
//
//   Input:  N Samples, each with S indices and C label entries
//   Output: CharBatch { inputs: [N, S] Int, labels: [N, C] Float }
//
// All samples of one batch share the same sequence length.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::{dataloader::batcher::Batcher, dataset::Dataset},
    prelude::*,
};

use crate::data::{dataset::CharDataset, sample::Sample};

// ─── CharBatch ────────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct CharBatch<B: Backend> {
    /// Vocabulary indices — shape: [batch_size, seq_len]
    pub inputs: Tensor<B, 2, Int>,

    /// One-hot labels — shape: [batch_size, class_num]
    pub labels: Tensor<B, 2>,
}

// ─── CharBatcher ──────────────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct CharBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> CharBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Batch a whole generated dataset in one go.
    pub fn batch_dataset(&self, dataset: &CharDataset) -> CharBatch<B> {
        self.batch(dataset.iter().collect())
    }

    /// Encode index sequences without labels, for inference.
    pub fn inputs(&self, sequences: &[Vec<usize>]) -> Tensor<B, 2, Int> {
        let batch_size = sequences.len();
        let seq_len    = sequences.first().map_or(0, Vec::len);

        let flat: Vec<i32> = sequences
            .iter()
            .flat_map(|s| s.iter().map(|&x| x as i32))
            .collect();

        Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len])
    }
}

impl<B: Backend> Batcher<Sample, CharBatch<B>> for CharBatcher<B> {
    fn batch(&self, items: Vec<Sample>) -> CharBatch<B> {
        let batch_size = items.len();
        let class_num  = items.first().map_or(0, |s| s.label.len());

        let (sequences, labels): (Vec<Vec<usize>>, Vec<Vec<f32>>) = items
            .into_iter()
            .map(|s| (s.input_ids, s.label))
            .unzip();

        let inputs = self.inputs(&sequences);

        let labels_flat: Vec<f32> = labels.into_iter().flatten().collect();
        let labels = Tensor::<B, 1>::from_floats(labels_flat.as_slice(), &self.device)
            .reshape([batch_size, class_num]);

        CharBatch { inputs, labels }
    }
}
