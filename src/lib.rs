//! # Digit Classifier
//!
//! Native binding for a fixed-topology digit classifier. The model takes a
//! single-channel 30x30 grid of `f32` values and produces ten class scores.
//!
//! The crate is the glue between a host runtime and the compiled model:
//! it checks that the caller's buffer holds exactly 900 floats, views it as a
//! 1x30x30x1 tensor, runs the model once and returns the 1x10 scores as a
//! fresh 40-byte buffer.
//!
//! ```no_run
//! use digit_classifier::{Classifier, InputTensor, OutputTensor};
//!
//! let classifier = Classifier::new(|_input: &InputTensor, output: &mut OutputTensor| {
//!     output[0][3] = 1.0;
//! });
//! let scores = classifier.invoke(&[0u8; 3600]).unwrap();
//! assert_eq!(scores.len(), 40);
//! ```
//!
//! ## Features
//!
//! - `ffi`: link the model's C `entry` symbol and export
//!   `digit_classifier_check_input` and `digit_classifier_invoke` for the
//!   host runtime.

mod error;
pub mod ffi;
pub mod inference;
pub mod model;
pub mod preprocess;
pub mod tensor;

pub use error::{ClassifierError, INPUT_LENGTH_MESSAGE, OUTPUT_LENGTH_MESSAGE};
pub use inference::messages::{decode_scores, Prediction};
pub use inference::model::Classifier;
pub use model::InferenceRoutine;
pub use preprocess::Grid;
pub use tensor::{InputTensor, InputView, OutputBuffer, OutputTensor};

#[cfg(feature = "ffi")]
pub use ffi::LinkedModel;
#[cfg(feature = "ffi")]
pub use inference::model::invoke;

#[cfg(test)]
mod tests;
