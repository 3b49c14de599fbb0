//! Chart rendering on top of plotters.
//!
//! Every chart comes in two forms: a `render_*` function that draws onto any
//! plotters drawing area, and a `plot_*` wrapper that renders into a fresh
//! PNG backend and presents the file. The wrappers own their backend for the
//! duration of the call, so nothing is shared between figures, and they
//! validate their inputs before the backend exists, since a bitmap backend
//! presents its file when dropped.

mod colormap;
mod curves;
mod grid;

pub use colormap::plasma;
pub use curves::{plot_accuracy, plot_history, plot_loss, render_accuracy, render_history, render_loss};
pub use grid::{plot_activation_grid, render_activation_grid};

/// Pixel size of a single-chart PNG figure.
pub const CURVE_FIGURE_SIZE: (u32, u32) = (800, 600);

/// Pixel size of the stacked loss and accuracy PNG figure.
pub const COMBINED_FIGURE_SIZE: (u32, u32) = (800, 1200);

/// Edge length in pixels of one activation grid cell in PNG output.
pub const GRID_CELL_PX: u32 = 150;
