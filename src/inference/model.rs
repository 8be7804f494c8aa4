//! The inference adapter.
//!
//! [`Classifier`] is the whole of the glue between a caller's byte buffer and
//! the model: it checks the length, views the bytes as a 1x30x30x1 tensor,
//! runs the routine once against a zeroed 1x10 output and hands the scores
//! back, either as a fresh `Vec<u8>` or written into a caller-owned region.

use crate::error::ClassifierError;
use crate::inference::messages::{decode_scores, Prediction};
use crate::model::InferenceRoutine;
use crate::tensor::{InputView, OutputBuffer, INPUT_BYTES, OUTPUT_BYTES};
use tracing::{debug, warn};

/// Inference adapter: turns a raw 3600-byte buffer into 40 bytes of class
/// scores by way of an [`InferenceRoutine`].
///
/// The adapter is stateless. Each call borrows the input, runs the routine
/// once against a zeroed output tensor and hands the bytes back.
pub struct Classifier<R> {
    routine: R,
}

impl<R: InferenceRoutine> Classifier<R> {
    pub fn new(routine: R) -> Self {
        Self { routine }
    }

    pub fn routine(&self) -> &R {
        &self.routine
    }

    /// Run the model on `input`, which must hold exactly 900 `f32` values.
    ///
    /// Returns the ten class scores as 40 native-endian bytes, index `i`
    /// being the score for class `i`. A length mismatch fails with
    /// [`ClassifierError::InvalidInput`] before anything is allocated or
    /// the routine is called.
    pub fn invoke(&self, input: &[u8]) -> Result<Vec<u8>, ClassifierError> {
        self.run(input).map(OutputBuffer::into_bytes)
    }

    /// Like [`invoke`](Self::invoke), but writes the scores into a region the
    /// caller already owns. Nothing is allocated on the heap.
    ///
    /// `output` is left untouched when the input is rejected.
    pub fn invoke_into(
        &self,
        input: &[u8],
        output: &mut [u8; OUTPUT_BYTES],
    ) -> Result<(), ClassifierError> {
        let scores = self.run(input)?;
        output.copy_from_slice(scores.as_bytes());
        Ok(())
    }

    /// [`invoke`](Self::invoke) followed by arg-max over the returned scores.
    pub fn classify(&self, input: &[u8]) -> Result<Prediction, ClassifierError> {
        let bytes = self.invoke(input)?;
        let scores = decode_scores(&bytes)?;
        Ok(Prediction::from_scores(&scores))
    }

    fn run(&self, input: &[u8]) -> Result<OutputBuffer, ClassifierError> {
        debug!("Running inference on {} input bytes", input.len());

        let view = InputView::new(input).inspect_err(|_| {
            warn!(
                "Rejecting input of {} bytes, expected {}",
                input.len(),
                INPUT_BYTES
            );
        })?;

        if !view.is_zero_copy() {
            debug!("Input buffer is not f32-aligned, decoding into an aligned copy");
        }

        let mut output = OutputBuffer::new();
        self.routine.run(view.tensor(), output.tensor_mut());

        debug!("Inference complete, scores: {:?}", output.scores());
        Ok(output)
    }
}

impl<R> std::fmt::Debug for Classifier<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("routine", &"<routine>")
            .finish()
    }
}

/// Run the linked model on `input`.
///
/// This is the crate-level counterpart of the `digit_classifier.invoke`
/// callable the host runtime sees.
#[cfg(feature = "ffi")]
pub fn invoke(input: &[u8]) -> Result<Vec<u8>, ClassifierError> {
    Classifier::new(crate::ffi::LinkedModel).invoke(input)
}
