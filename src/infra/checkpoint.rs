// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights with Burn's named
// MessagePack recorder at full precision.
//
// Only parameters are stored. The architecture (char_dim,
// hidden_size, class_num, vocabulary size) has to be supplied
// again when loading: build a fresh model of the same shape,
// then let `load_model` overwrite every parameter in it.
//
// The recorder always writes a `.mpk` extension:
//   model.mpk   ← from "model" or "model.mpk"
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use burn::{
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder},
};

use crate::ml::model::CharClassifier;

type WeightsRecorder = NamedMpkFileRecorder<FullPrecisionSettings>;

pub struct CheckpointManager {
    path: PathBuf,
}

impl CheckpointManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where the recorder actually reads and writes
    pub fn file_path(&self) -> PathBuf {
        self.path.with_extension("mpk")
    }

    /// Write every parameter of `model` to disk.
    pub fn save_model<B: Backend>(&self, model: &CharClassifier<B>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        WeightsRecorder::new()
            .record(model.clone().into_record(), self.path.clone())
            .with_context(|| {
                format!("Failed to save weights to '{}'", self.file_path().display())
            })?;

        tracing::debug!("Saved weights to '{}'", self.file_path().display());
        Ok(())
    }

    /// Replace the parameters of a freshly built `model` with the
    /// saved ones. Fails if the file is missing or unreadable, or if
    /// a saved weight does not have the shape `model` was built with.
    pub fn load_model<B: Backend>(
        &self,
        model:  CharClassifier<B>,
        device: &B::Device,
    ) -> Result<CharClassifier<B>> {
        let record = WeightsRecorder::new()
            .load(self.path.clone(), device)
            .with_context(|| {
                format!(
                    "Cannot load weights '{}'. Have you trained the model first?",
                    self.file_path().display()
                )
            })?;

        let expected = model.weight_shapes();
        let loaded   = model.load_record(record);

        for ((name, want), (_, got)) in expected.into_iter().zip(loaded.weight_shapes()) {
            if got != want {
                bail!(
                    "Weights '{}' do not fit the model: {name} is {got:?}, expected {want:?}. \
                     Pass the vocabulary and dimensions used for training.",
                    self.file_path().display()
                );
            }
        }

        Ok(loaded)
    }
}
