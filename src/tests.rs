#[cfg(test)]
mod tests {
    use crate::ffi::capi::{check_input_len, invoke_raw, STATUS_INVALID_INPUT, STATUS_OK};
    use crate::tensor::{INPUT_BYTES, INPUT_COLS, INPUT_LEN, INPUT_ROWS, OUTPUT_BYTES, OUTPUT_LEN};
    use crate::{decode_scores, Classifier, ClassifierError, Grid, InputTensor, OutputTensor};
    use rand::Rng;
    use std::alloc::{GlobalAlloc, Layout, System};
    use std::cell::Cell;
    use std::sync::Arc;
    use tracing::subscriber::NoSubscriber;

    /// Counts heap allocations made by the current thread.
    struct CountingAlloc;

    thread_local! {
        static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
    }

    unsafe impl GlobalAlloc for CountingAlloc {
        unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
            let _ = ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
            System.alloc(layout)
        }

        unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
            System.dealloc(ptr, layout)
        }
    }

    #[global_allocator]
    static GLOBAL: CountingAlloc = CountingAlloc;

    fn allocations_during<T>(f: impl FnOnce() -> T) -> (T, usize) {
        let before = ALLOCATIONS.with(Cell::get);
        let value = f();
        (value, ALLOCATIONS.with(Cell::get) - before)
    }

    /// Deterministic stand-in for the compiled model: score `i` is a weighted
    /// sum over row `i * 3`.
    fn row_weights(input: &InputTensor, output: &mut OutputTensor) {
        for (class, score) in output[0].iter_mut().enumerate() {
            let row = &input[0][class * 3];
            *score = row
                .iter()
                .enumerate()
                .map(|(col, cell)| cell[0] * (col + 1) as f32)
                .sum();
        }
    }

    fn random_input(rng: &mut impl Rng) -> Vec<f32> {
        (0..INPUT_LEN).map(|_| rng.gen_range(-1.0..1.0)).collect()
    }

    #[test]
    fn test_random_wrong_lengths_rejected() {
        let classifier = Classifier::new(row_weights);
        let mut rng = rand::thread_rng();

        for _ in 0..200 {
            let mut len = rng.gen_range(0..8 * INPUT_BYTES);
            if len == INPUT_BYTES {
                len += 1;
            }
            let bytes: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            match classifier.invoke(&bytes) {
                Err(ClassifierError::InvalidInput(msg)) => {
                    assert_eq!(msg, "Input must be 900 floats")
                }
                other => panic!("Expected InvalidInput for {len} bytes, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_valid_length_returns_forty_bytes() {
        let classifier = Classifier::new(row_weights);
        let mut rng = rand::thread_rng();

        for _ in 0..20 {
            let bytes: Vec<u8> = (0..INPUT_BYTES).map(|_| rng.gen()).collect();
            assert_eq!(classifier.invoke(&bytes).unwrap().len(), OUTPUT_BYTES);
        }
    }

    #[test]
    fn test_repeated_calls_are_bitwise_identical() {
        let classifier = Classifier::new(row_weights);
        let values = random_input(&mut rand::thread_rng());
        let bytes: &[u8] = bytemuck::cast_slice(&values);

        let first = classifier.invoke(bytes).unwrap();
        for _ in 0..10 {
            assert_eq!(classifier.invoke(bytes).unwrap(), first);
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let classifier = Classifier::new(row_weights);
        let values = random_input(&mut rand::thread_rng());
        let bytes: Vec<u8> = bytemuck::cast_slice(&values).to_vec();
        let before = bytes.clone();

        classifier.invoke(&bytes).unwrap();
        assert_eq!(bytes, before);
    }

    #[test]
    fn test_every_cell_reaches_routine_at_its_position() {
        let classifier = Classifier::new(|input: &InputTensor, output: &mut OutputTensor| {
            let mut mismatches = 0.0;
            for row in 0..INPUT_ROWS {
                for col in 0..INPUT_COLS {
                    if input[0][row][col][0] != (row * INPUT_COLS + col) as f32 {
                        mismatches += 1.0;
                    }
                }
            }
            output[0][0] = mismatches;
            output[0][1] = input[0][29][29][0];
        });

        let values: Vec<f32> = (0..INPUT_LEN).map(|i| i as f32).collect();
        let scores = decode_scores(&classifier.invoke(bytemuck::cast_slice(&values)).unwrap()).unwrap();
        assert_eq!(scores[0], 0.0);
        assert_eq!(scores[1], 899.0);
    }

    #[test]
    fn test_each_output_index_is_its_class() {
        for class in 0..OUTPUT_LEN {
            let classifier = Classifier::new(move |_: &InputTensor, output: &mut OutputTensor| {
                output[0][class] = 100.0 + class as f32;
            });
            let scores = decode_scores(&classifier.invoke(&[0u8; INPUT_BYTES]).unwrap()).unwrap();
            for (i, score) in scores.iter().enumerate() {
                let expected = if i == class { 100.0 + class as f32 } else { 0.0 };
                assert_eq!(*score, expected);
            }
        }
    }

    #[test]
    fn test_concurrent_invocations() {
        let classifier = Arc::new(Classifier::new(row_weights));
        let values = random_input(&mut rand::thread_rng());
        let bytes: Arc<Vec<u8>> = Arc::new(bytemuck::cast_slice(&values).to_vec());
        let expected = classifier.invoke(&bytes).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let classifier = Arc::clone(&classifier);
                let bytes = Arc::clone(&bytes);
                std::thread::spawn(move || classifier.invoke(&bytes).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_preprocessed_grid_classifies() {
        let mut grid = Grid::zeros();
        for row in 0..3 {
            for col in 0..2 {
                grid.set(row, col + 1, 10.0);
            }
        }
        grid.normalize();
        grid.clear_column(0);
        let centered = grid.auto_crop_and_center();

        // 3x2 blob lands on rows 13..16, cols 14..16; row 15 belongs to class 5
        let classifier = Classifier::new(row_weights);
        let prediction = classifier.classify(&centered.to_input_bytes()).unwrap();
        assert_eq!(prediction.class, 5);
        assert_eq!(prediction.score, 15.0 + 16.0);
    }

    #[test]
    fn test_heap_allocations_per_call() {
        let classifier = Classifier::new(row_weights);
        let values = vec![0.25f32; INPUT_LEN];
        let bytes: &[u8] = bytemuck::cast_slice(&values);
        let short = &bytes[..INPUT_BYTES - 1];
        let mut output = [0u8; OUTPUT_BYTES];

        tracing::subscriber::with_default(NoSubscriber::default(), || {
            // First calls register the tracing callsites
            classifier.invoke(bytes).unwrap();
            let _ = classifier.invoke(short);

            let (status, count) = allocations_during(|| unsafe {
                invoke_raw(
                    &classifier,
                    bytes.as_ptr(),
                    bytes.len(),
                    output.as_mut_ptr(),
                    output.len(),
                )
            });
            assert_eq!(status, STATUS_OK);
            assert_eq!(count, 0, "writing into a caller region must not allocate");

            let (status, count) = allocations_during(|| check_input_len(short.len()));
            assert_eq!(status, STATUS_INVALID_INPUT);
            assert_eq!(count, 0);

            let (result, count) = allocations_during(|| classifier.invoke(short));
            assert!(matches!(result, Err(ClassifierError::InvalidInput(_))));
            assert_eq!(count, 0, "a rejected input must not allocate");

            let (result, count) = allocations_during(|| classifier.invoke(bytes));
            assert_eq!(result.unwrap().len(), OUTPUT_BYTES);
            assert_eq!(count, 1, "invoke allocates only the returned buffer");
        });

        let scores = decode_scores(&output).unwrap();
        assert_eq!(scores[0], 0.25 * 30.0 * 31.0 / 2.0);
    }
}
