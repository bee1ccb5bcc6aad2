// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes to the use cases.
// All printing of predictions happens here.
//
// Running the binary with no subcommand trains with the
// default settings and then classifies the demo strings.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PredictArgs, RunArgs, TrainArgs};

use crate::application::{
    predict_use_case::{PredictConfig, PredictUseCase, DEMO_INPUTS},
    train_use_case::{TrainConfig, TrainUseCase},
};
use crate::domain::prediction::Prediction;

#[derive(Parser, Debug)]
#[command(
    name = "char-group-classifier",
    version,
    about = "Train a tiny RNN to spot which character group a string contains, then classify strings."
)]
pub struct Cli {
    /// The subcommand to run (default: run)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Some(Commands::Train(args))   => run_train(args),
            Some(Commands::Predict(args)) => run_predict(args),
            Some(Commands::Run(args))     => run_all(args),
            None => train_then_predict(TrainConfig::default(), Vec::new()),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    let config: TrainConfig = args.into();
    tracing::info!("Starting training for {} epochs", config.epochs);

    let log = TrainUseCase::new(config).execute()?;
    if let Some(last) = log.last() {
        println!(
            "Training complete after {} epochs. Final accuracy: {:.6}",
            log.len(),
            last.accuracy
        );
    }
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    let inputs = or_demo_inputs(args.inputs.clone());
    let config: PredictConfig = args.into();
    predict_and_print(&config, &inputs)
}

fn run_all(args: RunArgs) -> Result<()> {
    train_then_predict(args.train.into(), args.inputs)
}

fn train_then_predict(config: TrainConfig, inputs: Vec<String>) -> Result<()> {
    let predict_config = PredictConfig {
        model_path: config.model_path.clone(),
        vocab_path: config.vocab_path.clone(),
        dims:       config.dims,
    };

    TrainUseCase::new(config).execute()?;
    predict_and_print(&predict_config, &or_demo_inputs(inputs))
}

fn predict_and_print(config: &PredictConfig, inputs: &[String]) -> Result<()> {
    let use_case = PredictUseCase::new(config)?;
    for prediction in use_case.predict(inputs)? {
        println!("{}", format_prediction(&prediction));
    }
    Ok(())
}

fn or_demo_inputs(inputs: Vec<String>) -> Vec<String> {
    if inputs.is_empty() {
        DEMO_INPUTS.iter().map(|s| s.to_string()).collect()
    } else {
        inputs
    }
}

fn format_prediction(p: &Prediction) -> String {
    format!(
        "input: {}, predicted class: {}, real class: {}, probability: {:.6}",
        p.input, p.predicted_class, p.real_class, p.probability
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_prediction() {
        let p = Prediction {
            input:           "ffazye".to_string(),
            predicted_class: 1,
            real_class:      1,
            probability:     0.5,
        };
        assert_eq!(
            format_prediction(&p),
            "input: ffazye, predicted class: 1, real class: 1, probability: 0.500000"
        );
    }

    #[test]
    fn test_demo_inputs_fill_in() {
        assert_eq!(or_demo_inputs(Vec::new()), DEMO_INPUTS.to_vec());
        assert_eq!(or_demo_inputs(vec!["xyzxyz".into()]), vec!["xyzxyz"]);
    }
}
