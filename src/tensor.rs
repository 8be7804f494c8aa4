//! Fixed tensor shapes and checked views over raw byte buffers.
//!
//! The model consumes a single-channel 30x30 grid laid out as
//! `[batch=1][row=30][col=30][channel=1]` and produces ten class scores laid
//! out as `[batch=1][class=10]`. Both are plain row-major `f32` arrays in native
//! endianness, so a float at flat offset `row * 30 + col` is the pixel at
//! `(row, col)`.

use crate::error::ClassifierError;

/// Number of rows in the input grid.
pub const INPUT_ROWS: usize = 30;
/// Number of columns in the input grid.
pub const INPUT_COLS: usize = 30;
/// Number of channels per input cell.
pub const INPUT_CHANNELS: usize = 1;
/// Total number of floats in the input tensor.
pub const INPUT_LEN: usize = INPUT_ROWS * INPUT_COLS * INPUT_CHANNELS;
/// Exact byte length accepted by `invoke`.
pub const INPUT_BYTES: usize = INPUT_LEN * std::mem::size_of::<f32>();
/// Number of class scores produced by the model.
pub const OUTPUT_LEN: usize = 10;
/// Exact byte length returned by `invoke`.
pub const OUTPUT_BYTES: usize = OUTPUT_LEN * std::mem::size_of::<f32>();

/// Input tensor shape expected by the model entry point (1x30x30x1).
pub type InputTensor = [[[[f32; INPUT_CHANNELS]; INPUT_COLS]; INPUT_ROWS]; 1];

/// Output tensor shape written by the model entry point (1x10).
pub type OutputTensor = [[f32; OUTPUT_LEN]; 1];

#[allow(clippy::large_enum_variant)]
#[derive(Debug)]
enum Storage<'a> {
    Borrowed(&'a InputTensor),
    Unaligned(InputTensor),
}

/// Read-only view of a caller buffer as an [`InputTensor`].
///
/// Aligned buffers are borrowed in place. A buffer that is not aligned for
/// `f32` cannot be reinterpreted safely, so its bytes are decoded into an
/// aligned stack copy instead; the values seen by the model are identical.
#[derive(Debug)]
pub struct InputView<'a> {
    storage: Storage<'a>,
}

impl<'a> InputView<'a> {
    /// Validate the length of `bytes` and view them as an input tensor.
    pub fn new(bytes: &'a [u8]) -> Result<Self, ClassifierError> {
        if bytes.len() != INPUT_BYTES {
            return Err(ClassifierError::input_length());
        }

        let storage = match bytemuck::try_from_bytes::<InputTensor>(bytes) {
            Ok(tensor) => Storage::Borrowed(tensor),
            Err(_) => Storage::Unaligned(bytemuck::pod_read_unaligned(bytes)),
        };

        Ok(Self { storage })
    }

    /// The tensor passed to the model.
    pub fn tensor(&self) -> &InputTensor {
        match &self.storage {
            Storage::Borrowed(tensor) => *tensor,
            Storage::Unaligned(tensor) => tensor,
        }
    }

    /// All 900 floats in flat row-major order.
    pub fn as_slice(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self.tensor()))
    }

    /// Value at `(row, col)`, or `None` outside the 30x30 grid.
    pub fn at(&self, row: usize, col: usize) -> Option<f32> {
        if row >= INPUT_ROWS || col >= INPUT_COLS {
            return None;
        }
        Some(self.tensor()[0][row][col][0])
    }

    /// Whether the view borrows the caller's bytes without copying.
    pub fn is_zero_copy(&self) -> bool {
        matches!(self.storage, Storage::Borrowed(_))
    }
}

/// Zero-initialised output tensor handed to the model for writing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputBuffer {
    tensor: OutputTensor,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self {
            tensor: [[0.0; OUTPUT_LEN]; 1],
        }
    }

    pub fn tensor_mut(&mut self) -> &mut OutputTensor {
        &mut self.tensor
    }

    /// Class scores, index `i` being the score for class `i`.
    pub fn scores(&self) -> &[f32; OUTPUT_LEN] {
        &self.tensor[0]
    }

    /// The 40 output bytes, borrowed.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.tensor)
    }

    /// Hand the 40 output bytes to the caller.
    pub fn into_bytes(self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
