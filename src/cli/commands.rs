// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands:
//   train   — train a model and save weights + vocabulary
//   predict — load them and classify strings
//   run     — train, then predict (also what a bare invocation does)
//
// Every default reproduces the reference run.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::{
    predict_use_case::PredictConfig,
    train_use_case::{ModelDims, TrainConfig},
};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the classifier and save weights and vocabulary
    Train(TrainArgs),

    /// Classify strings with a trained model
    Predict(PredictArgs),

    /// Train, then classify strings with the fresh model
    Run(RunArgs),
}

/// Architecture flags shared by `train` and `predict`.
/// They are not stored with the weights, so `predict` must be
/// given the same values `train` was.
#[derive(Args, Debug, Clone)]
pub struct DimsArgs {
    /// Embedding size of each character
    #[arg(long, default_value_t = 20)]
    pub char_dim: usize,

    /// Hidden state size of the RNN
    #[arg(long, default_value_t = 25)]
    pub hidden_size: usize,

    /// Number of output classes
    #[arg(long, default_value_t = 4)]
    pub class_num: usize,
}

impl From<DimsArgs> for ModelDims {
    fn from(a: DimsArgs) -> Self {
        ModelDims {
            char_dim:    a.char_dim,
            hidden_size: a.hidden_size,
            class_num:   a.class_num,
        }
    }
}

/// Where weights and vocabulary live
#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    /// Weights file (the recorder stores it with a .mpk extension)
    #[arg(long, default_value = "model.mpk")]
    pub model_path: PathBuf,

    /// Vocabulary JSON file
    #[arg(long, default_value = "vocab.json")]
    pub vocab_path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct TrainArgs {
    /// Number of training epochs
    #[arg(long, default_value_t = 40)]
    pub epochs: usize,

    /// Samples per optimiser step
    #[arg(long, default_value_t = 20)]
    pub batch_size: usize,

    /// Samples generated per epoch
    #[arg(long, default_value_t = 500)]
    pub train_samples: usize,

    /// Samples generated for each end-of-epoch evaluation
    #[arg(long, default_value_t = 200)]
    pub eval_samples: usize,

    /// Characters per sample
    #[arg(long, default_value_t = 6)]
    pub sentence_length: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 0.005)]
    pub lr: f64,

    /// Seed for data generation and weight init
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also write the per-epoch accuracy and loss to this CSV file
    #[arg(long)]
    pub metrics_csv: Option<PathBuf>,

    #[command(flatten)]
    pub dims: DimsArgs,

    #[command(flatten)]
    pub paths: PathArgs,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            epochs:          a.epochs,
            batch_size:      a.batch_size,
            train_samples:   a.train_samples,
            eval_samples:    a.eval_samples,
            sentence_length: a.sentence_length,
            lr:              a.lr,
            dims:            a.dims.into(),
            seed:            a.seed,
            model_path:      a.paths.model_path,
            vocab_path:      a.paths.vocab_path,
            metrics_csv:     a.metrics_csv,
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Strings to classify (default: the four demo strings)
    pub inputs: Vec<String>,

    #[command(flatten)]
    pub dims: DimsArgs,

    #[command(flatten)]
    pub paths: PathArgs,
}

impl From<PredictArgs> for PredictConfig {
    fn from(a: PredictArgs) -> Self {
        PredictConfig {
            model_path: a.paths.model_path,
            vocab_path: a.paths.vocab_path,
            dims:       a.dims.into(),
        }
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Strings to classify after training (default: the four demo strings)
    pub inputs: Vec<String>,

    #[command(flatten)]
    pub train: TrainArgs,
}
