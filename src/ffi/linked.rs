use super::bindings;
use crate::model::InferenceRoutine;
use crate::tensor::{InputTensor, OutputTensor};

/// The model compiled into the final binary, reached through its C `entry`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedModel;

impl InferenceRoutine for LinkedModel {
    fn run(&self, input: &InputTensor, output: &mut OutputTensor) {
        // SAFETY: both pointers come from live references whose types match the
        // C array shapes exactly, and `entry` only writes the 10 output floats.
        unsafe { bindings::entry(input, output) }
    }
}
