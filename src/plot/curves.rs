//! Loss and accuracy curve charts.

use crate::error::Result;
use crate::history::TrainingHistory;
use crate::plot::{COMBINED_FIGURE_SIZE, CURVE_FIGURE_SIZE};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Fixed text of one two-series chart.
struct CurveChart {
    title: &'static str,
    y_desc: &'static str,
    train_label: &'static str,
    val_label: &'static str,
}

const LOSS_CHART: CurveChart = CurveChart {
    title: "Training and validation loss",
    y_desc: "Loss",
    train_label: "Training loss",
    val_label: "Validation loss",
};

const ACCURACY_CHART: CurveChart = CurveChart {
    title: "Training and validation accuracy",
    y_desc: "Accuracy",
    train_label: "Training acc",
    val_label: "Validation acc",
};

/// Draws the loss chart onto `area`: training loss in red, validation loss
/// in green, epochs on the x axis.
///
/// The history is validated first; on error nothing has been drawn.
pub fn render_loss<DB: DrawingBackend>(
    history: &TrainingHistory,
    area: &DrawingArea<DB, Shift>,
) -> Result<()> {
    let (train, val) = history.loss_pair()?;
    log::debug!("drawing loss curves for {} epochs", train.len());
    draw_curve_pair(area, &LOSS_CHART, train, val)
}

/// Draws the accuracy chart onto `area`, with the same colors and axes as
/// the loss chart.
pub fn render_accuracy<DB: DrawingBackend>(
    history: &TrainingHistory,
    area: &DrawingArea<DB, Shift>,
) -> Result<()> {
    let (train, val) = history.accuracy_pair()?;
    log::debug!("drawing accuracy curves for {} epochs", train.len());
    draw_curve_pair(area, &ACCURACY_CHART, train, val)
}

/// Draws the loss chart above the accuracy chart on one surface.
///
/// Both metric pairs are validated before either chart is drawn, so a bad
/// accuracy series leaves the whole surface untouched.
pub fn render_history<DB: DrawingBackend>(
    history: &TrainingHistory,
    area: &DrawingArea<DB, Shift>,
) -> Result<()> {
    let (loss, val_loss) = history.loss_pair()?;
    let (accuracy, val_accuracy) = history.accuracy_pair()?;
    let (_, height) = area.dim_in_pixel();
    let (upper, lower) = area.split_vertically(height / 2);
    draw_curve_pair(&upper, &LOSS_CHART, loss, val_loss)?;
    draw_curve_pair(&lower, &ACCURACY_CHART, accuracy, val_accuracy)
}

/// Renders the loss chart to a PNG file. A history that fails validation
/// leaves no file behind.
pub fn plot_loss(history: &TrainingHistory, path: impl AsRef<Path>) -> Result<()> {
    // A bitmap backend presents its file on drop, so validate before
    // creating one.
    history.loss_pair()?;
    let path = path.as_ref();
    let root = BitMapBackend::new(path, CURVE_FIGURE_SIZE).into_drawing_area();
    render_loss(history, &root)?;
    root.present()?;
    log::info!("loss chart written to {}", path.display());
    Ok(())
}

/// Renders the accuracy chart to a PNG file. A history that fails validation
/// leaves no file behind.
pub fn plot_accuracy(history: &TrainingHistory, path: impl AsRef<Path>) -> Result<()> {
    history.accuracy_pair()?;
    let path = path.as_ref();
    let root = BitMapBackend::new(path, CURVE_FIGURE_SIZE).into_drawing_area();
    render_accuracy(history, &root)?;
    root.present()?;
    log::info!("accuracy chart written to {}", path.display());
    Ok(())
}

/// Renders the stacked loss and accuracy charts to a PNG file. A history
/// that fails validation leaves no file behind.
pub fn plot_history(history: &TrainingHistory, path: impl AsRef<Path>) -> Result<()> {
    history.loss_pair()?;
    history.accuracy_pair()?;
    let path = path.as_ref();
    let root = BitMapBackend::new(path, COMBINED_FIGURE_SIZE).into_drawing_area();
    render_history(history, &root)?;
    root.present()?;
    log::info!("training history chart written to {}", path.display());
    Ok(())
}

fn draw_curve_pair<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    chart: &CurveChart,
    train: &[f64],
    val: &[f64],
) -> Result<()> {
    area.fill(&WHITE)?;

    let x_range = 0..train.len() + 1;
    let y_max = axis_max(train.iter().chain(val.iter()));

    let mut ctx = ChartBuilder::on(area)
        .caption(chart.title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(x_range, 0f64..y_max)?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("Epochs")
        .y_desc(chart.y_desc)
        .draw()?;

    ctx.draw_series(LineSeries::new(series_points(train), &RED))?
        .label(chart.train_label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

    ctx.draw_series(LineSeries::new(series_points(val), &GREEN))?
        .label(chart.val_label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &GREEN));

    ctx.configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

/// Pairs each value with its 1-based epoch number.
fn series_points(values: &[f64]) -> impl Iterator<Item = (usize, f64)> + '_ {
    values.iter().enumerate().map(|(i, &value)| (i + 1, value))
}

/// Upper bound of the y axis with a little headroom. Non-finite entries are
/// ignored; an all-zero or all-bad series falls back to 1.0 so the chart
/// still has a usable axis.
fn axis_max<'a>(values: impl Iterator<Item = &'a f64>) -> f64 {
    let max = values
        .copied()
        .filter(|value| value.is_finite())
        .fold(0.0f64, f64::max);
    if max > 0.0 {
        max * 1.05
    } else {
        1.0
    }
}
