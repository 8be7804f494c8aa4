//! Decoding of the score bytes returned by `invoke`.
//!
//! Hosts typically unpack the 40 bytes as ten floats and take the class with
//! the highest score as the prediction. These helpers do the same on the Rust
//! side.

use crate::error::ClassifierError;
use crate::tensor::{OUTPUT_BYTES, OUTPUT_LEN};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unpack the bytes returned by `invoke` into ten native-endian scores.
pub fn decode_scores(bytes: &[u8]) -> Result<[f32; OUTPUT_LEN], ClassifierError> {
    if bytes.len() != OUTPUT_BYTES {
        return Err(ClassifierError::output_length());
    }

    let mut scores = [0.0f32; OUTPUT_LEN];
    bytemuck::cast_slice_mut::<f32, u8>(&mut scores).copy_from_slice(bytes);
    Ok(scores)
}

/// The winning class and its raw score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Class index in `0..10`
    pub class: usize,
    /// Score the model assigned to `class`, uninterpreted
    pub score: f32,
}

impl Prediction {
    /// Arg-max over `scores`, scanning from class 0 and only moving on a
    /// strictly greater score. Ties go to the lowest class index. A NaN never
    /// compares greater, so a NaN in class 0 wins and a NaN anywhere else is
    /// skipped, the same result a host gets from `scores.index(max(scores))`.
    pub fn from_scores(scores: &[f32; OUTPUT_LEN]) -> Self {
        let mut best = Prediction {
            class: 0,
            score: scores[0],
        };

        for (class, &score) in scores.iter().enumerate().skip(1) {
            if score > best.score {
                best = Prediction { class, score };
            }
        }

        best
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p:{} score:{:.4}", self.class, self.score)
    }
}
