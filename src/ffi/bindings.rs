use crate::tensor::{InputTensor, OutputTensor};

extern "C" {
    /// `void entry(const float tensor_input[1][30][30][1], float tensor_output[1][10]);`
    pub fn entry(tensor_input: *const InputTensor, tensor_output: *mut OutputTensor);
}
