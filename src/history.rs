//! Per-epoch training metrics and the loaders that fill them in.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::ops::RangeInclusive;
use std::path::Path;

/// Metrics recorded once per epoch over a training run.
///
/// The four series share one epoch axis, so they are expected to stay the
/// same length. [`record`](Self::record) keeps them aligned; histories built
/// by hand are re-checked before anything is drawn.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TrainingHistory {
    pub loss: Vec<f64>,
    pub val_loss: Vec<f64>,
    pub accuracy: Vec<f64>,
    pub val_accuracy: Vec<f64>,
}

impl TrainingHistory {
    pub fn new() -> Self {
        TrainingHistory {
            loss: Vec::new(),
            val_loss: Vec::new(),
            accuracy: Vec::new(),
            val_accuracy: Vec::new(),
        }
    }

    /// Appends one epoch of metrics to all four series.
    pub fn record(&mut self, loss: f64, val_loss: f64, accuracy: f64, val_accuracy: f64) {
        self.loss.push(loss);
        self.val_loss.push(val_loss);
        self.accuracy.push(accuracy);
        self.val_accuracy.push(val_accuracy);
    }

    /// Number of recorded epochs, taken from the training loss series.
    pub fn len(&self) -> usize {
        self.loss.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loss.is_empty()
    }

    /// Epoch numbers for the x axis. Numbering starts at 1, so a three-epoch
    /// run yields `1..=3`.
    pub fn epochs(&self) -> RangeInclusive<usize> {
        1..=self.len()
    }

    /// Training and validation loss, checked for presence and equal length.
    pub fn loss_pair(&self) -> Result<(&[f64], &[f64])> {
        metric_pair("loss", &self.loss, "val_loss", &self.val_loss)
    }

    /// Training and validation accuracy, checked for presence and equal length.
    pub fn accuracy_pair(&self) -> Result<(&[f64], &[f64])> {
        metric_pair("accuracy", &self.accuracy, "val_accuracy", &self.val_accuracy)
    }

    /// Reads a history from a JSON object mapping metric names to number
    /// lists, the shape produced by dumping a Keras `history.history` dict.
    ///
    /// Extra keys such as `lr` are ignored whatever their value type, so a
    /// dump carrying run parameters or notes alongside the metrics still
    /// loads. A missing required key is reported as
    /// [`Error::MissingMetric`], series of unequal length as
    /// [`Error::ShapeMismatch`].
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let mut series: HashMap<String, serde_json::Value> = serde_json::from_reader(reader)?;
        let mut take = |metric: &'static str| -> Result<Vec<f64>> {
            let values = series.remove(metric).ok_or(Error::MissingMetric(metric))?;
            Ok(serde_json::from_value(values)?)
        };
        let history = TrainingHistory {
            loss: take("loss")?,
            val_loss: take("val_loss")?,
            accuracy: take("accuracy")?,
            val_accuracy: take("val_accuracy")?,
        };
        ensure_same_len("loss", &history.loss, "val_loss", &history.val_loss)?;
        ensure_same_len("loss", &history.loss, "accuracy", &history.accuracy)?;
        ensure_same_len("loss", &history.loss, "val_accuracy", &history.val_accuracy)?;
        log::debug!("loaded training history with {} epochs from JSON", history.len());
        Ok(history)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Reads a history from CSV with a header row, the format written by the
    /// Keras `CSVLogger` callback (`epoch,accuracy,loss,val_accuracy,val_loss`).
    ///
    /// Columns are located by header name, so their order does not matter and
    /// extra columns are ignored. A missing required column is reported as
    /// [`Error::MissingMetric`].
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers = reader.headers()?.clone();
        let column = |metric: &'static str| -> Result<usize> {
            headers
                .iter()
                .position(|name| name == metric)
                .ok_or(Error::MissingMetric(metric))
        };
        let loss_col = column("loss")?;
        let val_loss_col = column("val_loss")?;
        let accuracy_col = column("accuracy")?;
        let val_accuracy_col = column("val_accuracy")?;

        let mut history = TrainingHistory::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let cell = |col: usize, metric: &'static str| -> Result<f64> {
                let raw = record.get(col).ok_or(Error::MissingMetric(metric))?;
                raw.trim()
                    .parse::<f64>()
                    .map_err(|source| Error::InvalidValue { metric, row: row + 1, source })
            };
            history.record(
                cell(loss_col, "loss")?,
                cell(val_loss_col, "val_loss")?,
                cell(accuracy_col, "accuracy")?,
                cell(val_accuracy_col, "val_accuracy")?,
            );
        }
        log::debug!("loaded training history with {} epochs from CSV", history.len());
        Ok(history)
    }

    pub fn from_csv_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_csv_reader(BufReader::new(file))
    }
}

impl Default for TrainingHistory {
    fn default() -> Self {
        Self::new()
    }
}

fn metric_pair<'a>(
    first: &'static str,
    train: &'a [f64],
    second: &'static str,
    val: &'a [f64],
) -> Result<(&'a [f64], &'a [f64])> {
    if train.is_empty() {
        return Err(Error::MissingMetric(first));
    }
    if val.is_empty() {
        return Err(Error::MissingMetric(second));
    }
    ensure_same_len(first, train, second, val)?;
    Ok((train, val))
}

fn ensure_same_len(first: &'static str, a: &[f64], second: &'static str, b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(Error::ShapeMismatch {
            first,
            first_len: a.len(),
            second,
            second_len: b.len(),
        });
    }
    Ok(())
}
