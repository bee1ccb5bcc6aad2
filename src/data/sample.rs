// ============================================================
// Layer 4 — Sample Generator
// ============================================================
// Draws one training example:
//
//   1. pick `sentence_length` keys of the vocabulary uniformly
//      at random, with replacement ("unk" included)
//   2. label the raw keys with the label rule
//   3. map keys to indices, unknown keys → "unk" index
//
// The label is computed on the drawn keys, before they are
// turned into numbers.

use rand::Rng;

use crate::domain::{
    label::real_class,
    vocab::{Token, Vocabulary},
};

/// One encoded example: vocabulary indices plus a one-hot label.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Vocabulary indices, length = sentence length
    pub input_ids: Vec<usize>,

    /// One-hot label, length = class count
    pub label: Vec<f32>,
}

/// One-hot vector of length `class_num` with a 1 at `class`.
pub fn one_hot(class: usize, class_num: usize) -> Vec<f32> {
    debug_assert!(class < class_num, "class {class} out of range for {class_num} classes");
    let mut label = vec![0.0; class_num];
    label[class] = 1.0;
    label
}

/// Draw one random sample from `vocab`.
pub fn build_sample<R: Rng + ?Sized>(
    rng:             &mut R,
    vocab:           &Vocabulary,
    sentence_length: usize,
    class_num:       usize,
) -> Sample {
    let keys = vocab.tokens();
    let drawn: Vec<Token> = (0..sentence_length)
        .map(|_| keys[rng.gen_range(0..keys.len())])
        .collect();

    let label = one_hot(real_class(drawn.iter().copied()), class_num);
    let input_ids = drawn.iter().map(|t| vocab.index_or_unk(t)).collect();

    Sample { input_ids, label }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_sample_shapes() {
        let mut rng = StdRng::seed_from_u64(7);
        let vocab   = Vocabulary::build();
        let sample  = build_sample(&mut rng, &vocab, 6, 4);
        assert_eq!(sample.input_ids.len(), 6);
        assert_eq!(sample.label.len(), 4);
        assert!(sample.input_ids.iter().all(|&i| i < vocab.len()));
    }

    #[test]
    fn test_label_is_one_hot_and_matches_rule() {
        let mut rng = StdRng::seed_from_u64(11);
        let vocab   = Vocabulary::build();
        for _ in 0..200 {
            let sample = build_sample(&mut rng, &vocab, 6, 4);
            assert_eq!(sample.label.iter().filter(|&&v| v == 1.0).count(), 1);
            assert_eq!(sample.label.iter().sum::<f32>(), 1.0);

            let tokens = sample.input_ids.iter().map(|&i| vocab.tokens()[i]);
            assert_eq!(sample.label[real_class(tokens)], 1.0);
        }
    }

    #[test]
    fn test_unk_can_be_drawn() {
        let mut rng = StdRng::seed_from_u64(3);
        let vocab   = Vocabulary::build();
        let drew_unk = (0..500)
            .map(|_| build_sample(&mut rng, &vocab, 6, 4))
            .any(|s| s.input_ids.contains(&vocab.unk_index()));
        assert!(drew_unk);
    }

    #[test]
    fn test_same_seed_same_sample() {
        let vocab = Vocabulary::build();
        let a = build_sample(&mut StdRng::seed_from_u64(5), &vocab, 6, 4);
        let b = build_sample(&mut StdRng::seed_from_u64(5), &vocab, 6, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_one_hot() {
        assert_eq!(one_hot(2, 4), vec![0.0, 0.0, 1.0, 0.0]);
    }
}
