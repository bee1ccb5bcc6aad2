// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates one training run in order:
//
//   Step 1: Build the vocabulary       (Layer 3 - domain)
//   Step 2: Seed the random sources
//   Step 3: Run the training loop      (Layer 5 - ml)
//   Step 4: Show the training curves   (Layer 6 - infra)
//   Step 5: Save weights               (Layer 6 - infra)
//   Step 6: Save vocabulary            (Layer 6 - infra)
//
// The architecture is NOT saved next to the weights. Whoever
// loads them must pass the same ModelDims again.

use anyhow::{ensure, Result};
use burn::tensor::backend::Backend;
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;

use crate::domain::{label::CLASS_NUM, traits::Persistable, vocab::Vocabulary};
use crate::infra::{checkpoint::CheckpointManager, metrics::TrainingLog};
use crate::ml::{
    evaluator::EvalSettings,
    model::CharClassifierConfig,
    trainer::{run_training, TrainBackend},
};

// ─── Model Dimensions ─────────────────────────────────────────────────────────
/// The part of the architecture a caller must repeat at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDims {
    pub char_dim:    usize,
    pub hidden_size: usize,
    pub class_num:   usize,
}

impl Default for ModelDims {
    fn default() -> Self {
        Self { char_dim: 20, hidden_size: 25, class_num: CLASS_NUM }
    }
}

impl ModelDims {
    pub fn model_config(&self, vocab_size: usize) -> CharClassifierConfig {
        CharClassifierConfig::new(vocab_size)
            .with_char_dim(self.char_dim)
            .with_hidden_size(self.hidden_size)
            .with_class_num(self.class_num)
    }
}

// ─── Training Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub epochs:          usize,
    pub batch_size:      usize,
    /// Samples per epoch; batches per epoch = train_samples / batch_size
    pub train_samples:   usize,
    pub eval_samples:    usize,
    pub sentence_length: usize,
    pub lr:              f64,
    pub dims:            ModelDims,
    /// Fixed seed for data and weight init; None draws from entropy
    pub seed:            Option<u64>,
    pub model_path:      PathBuf,
    pub vocab_path:      PathBuf,
    pub metrics_csv:     Option<PathBuf>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs:          40,
            batch_size:      20,
            train_samples:   500,
            eval_samples:    200,
            sentence_length: 6,
            lr:              0.005,
            dims:            ModelDims::default(),
            seed:            None,
            model_path:      PathBuf::from("model.mpk"),
            vocab_path:      PathBuf::from("vocab.json"),
            metrics_csv:     None,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.batch_size > 0, "batch_size must be positive");
        ensure!(
            self.train_samples >= self.batch_size,
            "train_samples ({}) must be at least batch_size ({})",
            self.train_samples, self.batch_size,
        );
        ensure!(self.eval_samples > 0, "eval_samples must be positive");
        ensure!(self.sentence_length > 0, "sentence_length must be positive");
        ensure!(
            self.dims.class_num >= CLASS_NUM,
            "class_num must be at least {CLASS_NUM}, the label rule produces classes 0..{CLASS_NUM}",
        );
        Ok(())
    }

    pub fn eval_settings(&self) -> EvalSettings {
        EvalSettings {
            sample_count:    self.eval_samples,
            sentence_length: self.sentence_length,
            class_num:       self.dims.class_num,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<TrainingLog> {
        let cfg = &self.config;

        // ── Step 1: Vocabulary ────────────────────────────────────────────────
        let vocab = Vocabulary::build();
        tracing::info!("Vocabulary built with {} entries", vocab.len());

        // ── Step 2: Random sources ────────────────────────────────────────────
        let mut rng = match cfg.seed {
            Some(seed) => {
                tracing::info!("Seeding data generator and weight init with {}", seed);
                TrainBackend::seed(seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        // ── Step 3: Train ─────────────────────────────────────────────────────
        let (model, log) = run_training(cfg, &vocab, &mut rng)?;

        // ── Step 4: Curves ────────────────────────────────────────────────────
        println!("\n{}", log.render_curves(30));

        // ── Step 5 + 6: Persist ───────────────────────────────────────────────
        let ckpt = CheckpointManager::new(&cfg.model_path);
        ckpt.save_model(&model)?;
        vocab.save(&cfg.vocab_path)?;
        tracing::info!(
            "Saved weights to '{}' and vocabulary to '{}'",
            ckpt.file_path().display(),
            cfg.vocab_path.display(),
        );

        Ok(log)
    }
}
