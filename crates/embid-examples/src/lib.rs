//! Shared helpers for the embid examples.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Render a `[rows, cols]` tensor as one short string per row, for printing.
pub fn format_rows<B: Backend>(tensor: &Tensor<B, 2>) -> Vec<String> {
    let [rows, cols] = tensor.dims();
    let data: Vec<f32> = tensor
        .to_data()
        .to_vec()
        .expect("tensor data should be readable");

    (0..rows)
        .map(|r| {
            let cells: Vec<String> = data[r * cols..(r + 1) * cols]
                .iter()
                .map(|x| format!("{x:+.3}"))
                .collect();
            format!("[{}]", cells.join(", "))
        })
        .collect()
}
