//! C ABI surface registered with the host scripting runtime.
//!
//! The host module is named [`MODULE_NAME`] and exports a single callable,
//! [`EXPORTED_FUNCTION`]. Its native glue works in three steps:
//!
//! 1. `digit_classifier_check_input(len)` on the caller's buffer length; a
//!    non-zero status is raised as the host's invalid-argument error
//!    ("Input must be 900 floats") before anything is allocated.
//! 2. Allocate the 40-byte result object, the one allocation per call.
//! 3. `digit_classifier_invoke` with both buffers, which writes the scores
//!    straight into the result object.

use crate::error::ClassifierError;
use crate::inference::model::Classifier;
use crate::model::InferenceRoutine;
use crate::tensor::{INPUT_BYTES, OUTPUT_BYTES};
use tracing::warn;

/// Name the module is registered under in the host runtime.
pub const MODULE_NAME: &str = "digit_classifier";

/// The one callable the module exports.
pub const EXPORTED_FUNCTION: &str = "invoke";

/// Scores were written to the output region.
pub const STATUS_OK: i32 = 0;
/// Input was not exactly 900 floats.
pub const STATUS_INVALID_INPUT: i32 = -1;
/// A pointer was null or the output region was not exactly 40 bytes.
pub const STATUS_INVALID_BUFFER: i32 = -2;

/// Length check the host runs before allocating its result object.
pub fn check_input_len(input_len: usize) -> i32 {
    if input_len == INPUT_BYTES {
        STATUS_OK
    } else {
        STATUS_INVALID_INPUT
    }
}

/// Pointer-level `invoke` shared by the exported symbol and its tests.
///
/// The input length is checked first, so any length other than 3600 yields
/// [`STATUS_INVALID_INPUT`] whatever the pointers are. The scores are written
/// directly into `output`; no heap memory is allocated.
///
/// # Safety
///
/// When non-null, `input` must be valid for reads of `input_len` bytes and
/// `output` valid for writes of `output_len` bytes, and the two regions must
/// not overlap.
pub unsafe fn invoke_raw<R: InferenceRoutine>(
    classifier: &Classifier<R>,
    input: *const u8,
    input_len: usize,
    output: *mut u8,
    output_len: usize,
) -> i32 {
    if check_input_len(input_len) != STATUS_OK {
        warn!(
            "Rejecting input of {} bytes, expected {}",
            input_len, INPUT_BYTES
        );
        return STATUS_INVALID_INPUT;
    }

    if input.is_null() || output.is_null() || output_len != OUTPUT_BYTES {
        warn!(
            "Rejecting call: input null={}, output null={}, output_len={}",
            input.is_null(),
            output.is_null(),
            output_len
        );
        return STATUS_INVALID_BUFFER;
    }

    let input = std::slice::from_raw_parts(input, input_len);
    // u8 has alignment 1 and the length was checked above.
    let output = &mut *output.cast::<[u8; OUTPUT_BYTES]>();

    match classifier.invoke_into(input, output) {
        Ok(()) => STATUS_OK,
        Err(ClassifierError::InvalidInput(_)) => STATUS_INVALID_INPUT,
    }
}

/// Exported length check for the host glue.
#[cfg(feature = "ffi")]
#[no_mangle]
pub extern "C" fn digit_classifier_check_input(input_len: usize) -> i32 {
    check_input_len(input_len)
}

/// Exported entry point for the host glue.
///
/// # Safety
///
/// Same contract as [`invoke_raw`].
#[cfg(feature = "ffi")]
#[no_mangle]
pub unsafe extern "C" fn digit_classifier_invoke(
    input: *const u8,
    input_len: usize,
    output: *mut u8,
    output_len: usize,
) -> i32 {
    let classifier = Classifier::new(crate::ffi::LinkedModel);
    invoke_raw(&classifier, input, input_len, output, output_len)
}
