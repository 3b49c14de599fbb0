//! Captured layer activations and the grid layouts used to display them.

use crate::error::{Error, Result};
use ndarray::{s, Array4, ArrayView2};

/// Activations of one layer for one forward pass, stored as a 4-D array in
/// `(batch, height, width, channels)` order.
///
/// Only the first batch sample is ever drawn; the batch axis is kept so
/// tensors can be handed over exactly as a framework produced them.
#[derive(Debug, Clone)]
pub struct ActivationTensor {
    data: Array4<f32>,
}

impl ActivationTensor {
    /// Wraps a raw activation array, rejecting any zero-length dimension.
    pub fn new(data: Array4<f32>) -> Result<Self> {
        let (batch, height, width, channels) = data.dim();
        if batch == 0 || height == 0 || width == 0 || channels == 0 {
            return Err(Error::EmptyActivation {
                shape: [batch, height, width, channels],
            });
        }
        Ok(ActivationTensor { data })
    }

    pub fn batch(&self) -> usize {
        self.data.dim().0
    }

    pub fn height(&self) -> usize {
        self.data.dim().1
    }

    pub fn width(&self) -> usize {
        self.data.dim().2
    }

    pub fn channels(&self) -> usize {
        self.data.dim().3
    }

    /// 2-D view of one channel of the first batch sample.
    ///
    /// The caller must have checked `channel < self.channels()`; the renderers
    /// do this through [`GridLayout`] before slicing.
    pub fn channel_slice(&self, channel: usize) -> ArrayView2<'_, f32> {
        self.data.slice(s![0, .., .., channel])
    }

    pub fn as_array(&self) -> &Array4<f32> {
        &self.data
    }
}

/// Activation tensors for a sequence of layers, indexed in capture order.
#[derive(Debug, Clone, Default)]
pub struct ActivationSet {
    layers: Vec<ActivationTensor>,
}

impl ActivationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tensor: ActivationTensor) {
        self.layers.push(tensor);
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Tensor for the layer at `index`, or [`Error::IndexOutOfRange`].
    pub fn get(&self, index: usize) -> Result<&ActivationTensor> {
        self.layers.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.layers.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivationTensor> {
        self.layers.iter()
    }
}

impl From<Vec<ActivationTensor>> for ActivationSet {
    fn from(layers: Vec<ActivationTensor>) -> Self {
        ActivationSet { layers }
    }
}

/// Rectangular arrangement of channel slices, `row_size` rows by `col_size`
/// columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    row_size: usize,
    col_size: usize,
}

/// One position in a [`GridLayout`] together with the channel drawn there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub channel: usize,
}

impl GridLayout {
    /// Builds a layout, rejecting zero rows or columns.
    pub fn new(row_size: usize, col_size: usize) -> Result<Self> {
        if row_size == 0 || col_size == 0 {
            return Err(Error::EmptyGridLayout { row_size, col_size });
        }
        Ok(GridLayout { row_size, col_size })
    }

    pub fn row_size(&self) -> usize {
        self.row_size
    }

    pub fn col_size(&self) -> usize {
        self.col_size
    }

    /// Number of cells, which is also the number of channels consumed.
    /// Saturates at `usize::MAX` for layouts too large to address, so the
    /// renderer's capacity check still sees an over-demand.
    pub fn cell_count(&self) -> usize {
        self.row_size.saturating_mul(self.col_size)
    }

    /// Cells in drawing order: left to right within a row, rows top to
    /// bottom. The cell at `(row, col)` shows channel `row * col_size + col`.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> {
        let col_size = self.col_size;
        (0..self.row_size).flat_map(move |row| {
            (0..col_size).map(move |col| GridCell {
                row,
                col,
                channel: row * col_size + col,
            })
        })
    }
}
