//! Plotting utilities for neural network training runs.
//!
//! The crate renders three kinds of figures from training artifacts: loss
//! curves, accuracy curves, and grids of layer activation heatmaps. Rendering
//! is stateless: every call validates its inputs before drawing onto a fresh
//! or caller-provided surface, and a call that fails leaves the surface
//! untouched.
//!
//! - [`history`]: the per-epoch metric record and its JSON/CSV loaders
//! - [`activation`]: captured layer activations and grid layouts
//! - [`plot`]: the chart renderers and their PNG wrappers
//! - [`error`]: the crate error type
//!
//! ```no_run
//! use trainviz::{plot_loss, TrainingHistory};
//!
//! let mut history = TrainingHistory::new();
//! history.record(0.9, 1.0, 0.55, 0.50);
//! history.record(0.5, 0.6, 0.72, 0.66);
//! plot_loss(&history, "loss.png").unwrap();
//! ```

pub mod activation;
pub mod error;
pub mod history;
pub mod plot;

pub use activation::{ActivationSet, ActivationTensor, GridCell, GridLayout};
pub use error::{Error, Result};
pub use history::TrainingHistory;
pub use plot::{
    plot_accuracy, plot_activation_grid, plot_history, plot_loss, render_accuracy,
    render_activation_grid, render_history, render_loss,
};
