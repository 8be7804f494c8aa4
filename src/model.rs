//! The seam between the adapter and the model that actually does the math.
//!
//! The network itself is compiled elsewhere and linked in as a plain C entry
//! point (`LinkedModel` under the `ffi` feature). Everything in this crate only
//! talks to it through [`InferenceRoutine`], which lets tests and embedding
//! code plug in their own stub.

use crate::tensor::{InputTensor, OutputTensor};

/// A synchronous, total inference routine.
///
/// Implementations read the 1x30x30x1 input and fill the 1x10 output in
/// place. They must not fail and must not call back into the adapter. The
/// adapter neither interprets nor validates what gets written.
pub trait InferenceRoutine: Send + Sync {
    fn run(&self, input: &InputTensor, output: &mut OutputTensor);
}

impl<F> InferenceRoutine for F
where
    F: Fn(&InputTensor, &mut OutputTensor) + Send + Sync,
{
    fn run(&self, input: &InputTensor, output: &mut OutputTensor) {
        self(input, output)
    }
}
