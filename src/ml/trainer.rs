// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Adam over freshly generated mini-batches:
//
//   for each epoch:
//     for each of train_samples / batch_size batches:
//       generate batch → forward_loss → backward → Adam step
//     print mean loss
//     evaluate on a fresh batch of eval_samples
//     record (accuracy, mean loss)
//
// Data is never reused: every batch is drawn anew.
// Burn builds a fresh gradient set on every backward pass, so
// there is no explicit zero-grad step.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    backend::{Autodiff, NdArray},
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use rand::Rng;

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::CharBatcher, dataset::build_dataset};
use crate::domain::vocab::Vocabulary;
use crate::infra::metrics::{EpochMetrics, MetricsLogger, TrainingLog};
use crate::ml::evaluator::evaluate;
use crate::ml::model::CharClassifier;

pub type TrainBackend = Autodiff<NdArray>;
pub type InferBackend = NdArray;

/// Train a fresh model on the default CPU device.
pub fn run_training<R: Rng + ?Sized>(
    cfg:   &TrainConfig,
    vocab: &Vocabulary,
    rng:   &mut R,
) -> Result<(CharClassifier<TrainBackend>, TrainingLog)> {
    let device = burn::backend::ndarray::NdArrayDevice::Cpu;
    tracing::info!("Using NdArray device: {:?}", device);
    train_loop::<TrainBackend, R>(cfg, vocab, rng, &device)
}

pub fn train_loop<B: AutodiffBackend, R: Rng + ?Sized>(
    cfg:    &TrainConfig,
    vocab:  &Vocabulary,
    rng:    &mut R,
    device: &B::Device,
) -> Result<(CharClassifier<B>, TrainingLog)> {
    cfg.validate()?;

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: CharClassifier<B> = cfg.dims.model_config(vocab.len()).init(device);
    tracing::info!(
        "Model ready: vocab={}, char_dim={}, hidden={}, classes={}",
        vocab.len(), cfg.dims.char_dim, cfg.dims.hidden_size, cfg.dims.class_num,
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    let mut optim = AdamConfig::new()
        .with_beta_1(0.9)
        .with_beta_2(0.999)
        .with_epsilon(1e-8)
        .init();

    let batcher = CharBatcher::<B>::new(device.clone());
    let metrics = cfg.metrics_csv.as_deref().map(MetricsLogger::create).transpose()?;
    let batches_per_epoch = cfg.train_samples / cfg.batch_size;
    let mut log = TrainingLog::default();

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        let mut watch_loss = Vec::with_capacity(batches_per_epoch);

        for step in 0..batches_per_epoch {
            let dataset = build_dataset(
                rng, cfg.batch_size, vocab, cfg.sentence_length, cfg.dims.class_num,
            );
            let batch = batcher.batch_dataset(&dataset);

            let loss = model.forward_loss(batch.inputs, batch.labels);
            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            watch_loss.push(loss_val);

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optim.step(cfg.lr, model, grads);

            tracing::debug!("epoch {} batch {} loss={:.6}", epoch, step + 1, loss_val);
        }

        let mean_loss = watch_loss.iter().sum::<f64>() / watch_loss.len() as f64;
        println!("=========\nEpoch {epoch} mean loss: {mean_loss:.6}");

        // ── Evaluation (inference mode) ───────────────────────────────────────
        let evaluation = evaluate(&model.valid(), vocab, cfg.eval_settings(), rng, device)?;

        let row = EpochMetrics::new(epoch, evaluation.accuracy(), mean_loss);
        if let Some(logger) = &metrics {
            logger.log(&row)?;
        }
        log.push(row);
    }

    tracing::info!("Training complete!");
    Ok((model, log))
}
