// ============================================================
// Layer 6 — Metrics
// ============================================================
// The training log: one (accuracy, mean loss) pair per epoch.
//
// It is shown at the end of training as a text chart of both
// curves, and written to CSV only when a path is configured:
//
//   epoch,accuracy,mean_loss
//   1,0.415000,1.262310
//   2,0.560000,1.150927
//   ...
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fmt::Write as _,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

/// One row of the training log
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Fraction of the evaluation batch classified correctly
    pub accuracy: f64,

    /// Mean training loss over the epoch's batches
    pub mean_loss: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, accuracy: f64, mean_loss: f64) -> Self {
        Self { epoch, accuracy, mean_loss }
    }
}

// ─── TrainingLog ──────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Default)]
pub struct TrainingLog {
    rows: Vec<EpochMetrics>,
}

impl TrainingLog {
    pub fn push(&mut self, row: EpochMetrics) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EpochMetrics> {
        self.rows.iter()
    }

    pub fn last(&self) -> Option<&EpochMetrics> {
        self.rows.last()
    }

    /// Both curves as horizontal bars, one line per epoch.
    /// Loss bars are scaled to the largest loss in the log.
    pub fn render_curves(&self, width: usize) -> String {
        let max_loss = self
            .rows
            .iter()
            .map(|m| m.mean_loss)
            .fold(f64::MIN_POSITIVE, f64::max);

        let mut out = String::new();
        let _ = writeln!(out, "epoch | {:<w$} | loss", "acc", w = width + 7);
        for m in self.iter() {
            let _ = writeln!(
                out,
                "{:>5} | {} {:.4} | {} {:.4}",
                m.epoch,
                bar(m.accuracy, width),
                m.accuracy,
                bar(m.mean_loss / max_loss, width),
                m.mean_loss,
            );
        }
        out
    }
}

fn bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

// ─── MetricsLogger ────────────────────────────────────────────────────────────
/// Writes epoch metrics to a CSV file as training goes.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create (or truncate) the CSV file and write its header.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut f = fs::File::create(path)
            .with_context(|| format!("Cannot create metrics file '{}'", path.display()))?;
        writeln!(f, "epoch,accuracy,mean_loss")?;
        tracing::debug!("Created metrics CSV: '{}'", path.display());

        Ok(Self { csv_path: path.to_path_buf() })
    }

    /// Append one epoch's metrics as a new row.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(f, "{},{:.6},{:.6}", m.epoch, m.accuracy, m.mean_loss)?;
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> TrainingLog {
        let mut log = TrainingLog::default();
        log.push(EpochMetrics::new(1, 0.25, 1.2));
        log.push(EpochMetrics::new(2, 0.5, 0.6));
        log
    }

    #[test]
    fn test_bar_widths() {
        assert_eq!(bar(0.0, 4), "....");
        assert_eq!(bar(0.5, 4), "##..");
        assert_eq!(bar(1.0, 4), "####");
        assert_eq!(bar(3.0, 4), "####");
    }

    #[test]
    fn test_render_curves() {
        let chart = sample_log().render_curves(4);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "    1 | #... 0.2500 | #### 1.2000");
        assert_eq!(lines[2], "    2 | ##.. 0.5000 | ##.. 0.6000");
    }

    #[test]
    fn test_csv_rows() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.csv");
        let logger = MetricsLogger::create(&path).unwrap();
        for m in sample_log().iter() {
            logger.log(m).unwrap();
        }

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "epoch,accuracy,mean_loss\n1,0.250000,1.200000\n2,0.500000,0.600000\n");
    }

    #[test]
    fn test_last_row() {
        assert_eq!(sample_log().last().map(|m| m.epoch), Some(2));
        assert_eq!(TrainingLog::default().len(), 0);
        assert!(TrainingLog::default().is_empty());
        assert!(!sample_log().is_empty());
    }
}
