use burn::data::dataset::Dataset;
use rand::Rng;

use crate::data::sample::{build_sample, Sample};
use crate::domain::vocab::Vocabulary;

/// A generated batch of samples, stored as two aligned columns.
/// Row `i` of `inputs` belongs to row `i` of `labels`.
#[derive(Debug, Clone, Default)]
pub struct CharDataset {
    inputs: Vec<Vec<usize>>,
    labels: Vec<Vec<f32>>,
}

impl CharDataset {
    pub fn inputs(&self) -> &[Vec<usize>] { &self.inputs }

    pub fn labels(&self) -> &[Vec<f32>] { &self.labels }

    pub fn push(&mut self, sample: Sample) {
        self.inputs.push(sample.input_ids);
        self.labels.push(sample.label);
    }
}

impl FromIterator<Sample> for CharDataset {
    fn from_iter<T: IntoIterator<Item = Sample>>(iter: T) -> Self {
        let mut dataset = Self::default();
        for sample in iter {
            dataset.push(sample);
        }
        dataset
    }
}

impl Dataset<Sample> for CharDataset {
    fn get(&self, index: usize) -> Option<Sample> {
        let input_ids = self.inputs.get(index)?.clone();
        let label     = self.labels.get(index)?.clone();
        Some(Sample { input_ids, label })
    }

    fn len(&self) -> usize {
        self.inputs.len()
    }
}

/// Generate `sample_count` independent samples. Duplicates are
/// allowed.
pub fn build_dataset<R: Rng + ?Sized>(
    rng:             &mut R,
    sample_count:    usize,
    vocab:           &Vocabulary,
    sentence_length: usize,
    class_num:       usize,
) -> CharDataset {
    (0..sample_count)
        .map(|_| build_sample(rng, vocab, sentence_length, class_num))
        .collect()
}
