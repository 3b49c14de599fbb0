//! Activation grid heatmaps.

use crate::activation::{ActivationSet, ActivationTensor, GridLayout};
use crate::error::{Error, Result};
use crate::plot::colormap::plasma;
use crate::plot::GRID_CELL_PX;
use ndarray::ArrayView2;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Draws a grid of channel heatmaps for the layer at `act_index` onto `area`.
///
/// Cells are filled row by row, the cell at `(row, col)` showing channel
/// `row * col_size + col` of the first batch sample. Each slice is normalized
/// to its own value range and mapped through the plasma colormap.
///
/// The layer index and the channel demand of the layout are checked up
/// front; on error nothing has been drawn.
pub fn render_activation_grid<DB: DrawingBackend>(
    activations: &ActivationSet,
    layout: GridLayout,
    act_index: usize,
    area: &DrawingArea<DB, Shift>,
) -> Result<()> {
    let tensor = grid_tensor(activations, layout, act_index)?;
    log::debug!(
        "rendering a {}x{} activation grid for layer {} ({} of {} channels)",
        layout.row_size(),
        layout.col_size(),
        act_index,
        layout.cell_count(),
        tensor.channels()
    );

    area.fill(&WHITE)?;
    let panels = area.split_evenly((layout.row_size(), layout.col_size()));
    for (cell, panel) in layout.cells().zip(panels.iter()) {
        let panel = panel.margin(2, 2, 2, 2);
        draw_channel_heatmap(&panel, tensor.channel_slice(cell.channel))?;
    }
    Ok(())
}

/// Renders the activation grid to a PNG file sized from the layout. Inputs
/// that fail validation leave no file behind.
pub fn plot_activation_grid(
    activations: &ActivationSet,
    layout: GridLayout,
    act_index: usize,
    path: impl AsRef<Path>,
) -> Result<()> {
    // A bitmap backend presents its file on drop, so validate before
    // creating one.
    grid_tensor(activations, layout, act_index)?;
    let path = path.as_ref();
    let width = layout.col_size() as u32 * GRID_CELL_PX;
    let height = layout.row_size() as u32 * GRID_CELL_PX;
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    render_activation_grid(activations, layout, act_index, &root)?;
    root.present()?;
    log::info!("activation grid written to {}", path.display());
    Ok(())
}

/// Selects the tensor for `act_index` and checks that the layout fits its
/// channel count.
fn grid_tensor<'a>(
    activations: &'a ActivationSet,
    layout: GridLayout,
    act_index: usize,
) -> Result<&'a ActivationTensor> {
    let tensor = activations.get(act_index)?;
    let available = tensor.channels();
    if layout.cell_count() > available {
        return Err(Error::GridOverflow {
            row_size: layout.row_size(),
            col_size: layout.col_size(),
            needed: layout.cell_count(),
            available,
        });
    }
    Ok(tensor)
}

/// Fills `area` with one channel slice, one rectangle per tensor element.
fn draw_channel_heatmap<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    slice: ArrayView2<'_, f32>,
) -> Result<()> {
    let (rows, cols) = slice.dim();
    let (width, height) = area.dim_in_pixel();
    let (min, max) = value_range(&slice);
    let span = max - min;

    for ((y, x), &value) in slice.indexed_iter() {
        let t = if span > 0.0 { (value - min) / span } else { 0.0 };
        let x0 = (x as u32 * width / cols as u32) as i32;
        let x1 = ((x as u32 + 1) * width / cols as u32) as i32;
        let y0 = (y as u32 * height / rows as u32) as i32;
        let y1 = ((y as u32 + 1) * height / rows as u32) as i32;
        area.draw(&Rectangle::new([(x0, y0), (x1, y1)], plasma(t).filled()))?;
    }
    Ok(())
}

/// Finite minimum and maximum of a slice. A slice with no finite values
/// degenerates to `(0, 0)`, which draws as a flat low-end panel.
fn value_range(slice: &ArrayView2<'_, f32>) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &value in slice.iter().filter(|value| value.is_finite()) {
        min = min.min(value);
        max = max.max(value);
    }
    if min > max {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationTensor;
    use ndarray::Array4;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;

    const WIDTH: u32 = 320;
    const HEIGHT: u32 = 320;

    fn random_activations(channels: usize) -> ActivationSet {
        let data = Array4::random((1, 8, 8, channels), Uniform::new(0.0f32, 1.0f32));
        let mut set = ActivationSet::new();
        set.push(ActivationTensor::new(data).unwrap());
        set
    }

    fn blank_buffer(width: u32, height: u32) -> Vec<u8> {
        vec![0u8; (width * height * 3) as usize]
    }

    #[test]
    fn renders_a_full_grid_of_channels() {
        let activations = random_activations(16);
        let layout = GridLayout::new(4, 4).unwrap();
        let mut buffer = blank_buffer(WIDTH, HEIGHT);
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (WIDTH, HEIGHT)).into_drawing_area();
            render_activation_grid(&activations, layout, 0, &root).unwrap();
        }
        assert!(buffer.iter().any(|&byte| byte != 0));
    }

    #[test]
    fn oversized_layout_reports_overflow_and_draws_nothing() {
        let activations = random_activations(16);
        let layout = GridLayout::new(5, 5).unwrap();
        let mut buffer = blank_buffer(WIDTH, HEIGHT);
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (WIDTH, HEIGHT)).into_drawing_area();
            match render_activation_grid(&activations, layout, 0, &root) {
                Err(Error::GridOverflow { needed, available, .. }) => {
                    assert_eq!(needed, 25);
                    assert_eq!(available, 16);
                }
                other => panic!("expected a grid overflow, got {:?}", other),
            }
        }
        assert!(buffer.iter().all(|&byte| byte == 0));
    }

    #[test]
    fn bad_layer_index_reports_out_of_range() {
        let activations = random_activations(16);
        let layout = GridLayout::new(4, 4).unwrap();
        let mut buffer = blank_buffer(WIDTH, HEIGHT);
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (WIDTH, HEIGHT)).into_drawing_area();
            let result = render_activation_grid(&activations, layout, 3, &root);
            assert!(matches!(
                result,
                Err(Error::IndexOutOfRange { index: 3, len: 1 })
            ));
        }
        assert!(buffer.iter().all(|&byte| byte == 0));
    }

    #[test]
    fn gradient_slice_spans_the_colormap() {
        // One channel ramping from 0 to 15 across a 4x4 slice.
        let data = Array4::from_shape_fn((1, 4, 4, 1), |(_, y, x, _)| (y * 4 + x) as f32);
        let mut set = ActivationSet::new();
        set.push(ActivationTensor::new(data).unwrap());
        let layout = GridLayout::new(1, 1).unwrap();
        let mut buffer = blank_buffer(64, 64);
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (64, 64)).into_drawing_area();
            render_activation_grid(&set, layout, 0, &root).unwrap();
        }
        let mut colors: Vec<[u8; 3]> = buffer.chunks_exact(3).map(|px| [px[0], px[1], px[2]]).collect();
        colors.sort_unstable();
        colors.dedup();
        assert!(colors.len() > 4, "expected a spread of colors, got {}", colors.len());
    }

    #[test]
    fn constant_slice_renders_the_low_end_color() {
        let data = Array4::from_elem((1, 4, 4, 1), 0.7f32);
        let mut set = ActivationSet::new();
        set.push(ActivationTensor::new(data).unwrap());
        let layout = GridLayout::new(1, 1).unwrap();
        let mut buffer = blank_buffer(32, 32);
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (32, 32)).into_drawing_area();
            render_activation_grid(&set, layout, 0, &root).unwrap();
        }
        // Away from the white margin the panel is the plasma low-end color.
        let center = ((16 * 32 + 16) * 3) as usize;
        assert_eq!(&buffer[center..center + 3], &[13, 8, 135]);
    }

    #[test]
    fn value_range_skips_non_finite_entries() {
        let data = ndarray::arr2(&[[0.5f32, f32::NAN], [f32::INFINITY, 2.0]]);
        let (min, max) = value_range(&data.view());
        assert_eq!(min, 0.5);
        assert_eq!(max, 2.0);
    }

    #[test]
    fn failed_grid_plot_leaves_no_file() {
        let activations = random_activations(16);
        let dir = tempfile::tempdir().unwrap();

        let path = dir.path().join("overflow.png");
        let result = plot_activation_grid(&activations, GridLayout::new(5, 5).unwrap(), 0, &path);
        assert!(matches!(result, Err(Error::GridOverflow { .. })));
        assert!(!path.exists());

        let path = dir.path().join("bad_layer.png");
        let result = plot_activation_grid(&activations, GridLayout::new(4, 4).unwrap(), 3, &path);
        assert!(matches!(result, Err(Error::IndexOutOfRange { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn huge_layout_reports_overflow() {
        let activations = random_activations(16);
        let layout = GridLayout::new(usize::MAX, usize::MAX).unwrap();
        let mut buffer = blank_buffer(8, 8);
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (8, 8)).into_drawing_area();
            let result = render_activation_grid(&activations, layout, 0, &root);
            assert!(matches!(result, Err(Error::GridOverflow { .. })));
        }
        assert!(buffer.iter().all(|&byte| byte == 0));
    }

    #[test]
    fn plot_activation_grid_writes_a_png_file() {
        let activations = random_activations(16);
        let layout = GridLayout::new(4, 4).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activations.png");
        plot_activation_grid(&activations, layout, 0, &path).unwrap();
        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }
}
