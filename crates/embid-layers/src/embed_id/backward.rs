//! Backward pass for the embedding lookup operation.
//!
//! # Gradient Computation
//!
//! The forward pass reads `output[k] = weight[ids[k]]`, so the gradient
//! with respect to the weight matrix is a **scatter-add**:
//!
//! ```ignore
//! grad_weight = zeros([vocab_size, embed_dim])
//! for k in 0..batch_size:
//!     if ids[k] != ignore_label:
//!         grad_weight[ids[k]] += grad_output[k]
//! ```
//!
//! # Properties
//!
//! - **Sparse gradient**: only rows that were gathered receive anything
//! - **Summation on conflicts**: duplicate ids accumulate their gradients
//! - **No gradient for ignored positions**: ids equal to the ignore label
//!   contribute nothing, matching the zero rows the forward pass emits
//! - **No gradient for ids**: ids are integers
//!
//! This function states the contract the autodiff collaborator implements;
//! the forward pass is built from `select` and `mask_fill`, whose registered
//! backward ops compose to exactly this computation.

use burn::tensor::backend::Backend;
use burn::tensor::{Int, Tensor};

/// Compute the weight gradient for an embedding lookup.
///
/// # Arguments
/// * `ids` - The ids used in the forward pass `[batch_size]`
/// * `vocab_size` - Number of rows in the weight matrix
/// * `grad_output` - Gradient of the loss w.r.t. the output `[batch_size, embed_dim]`
/// * `ignore_label` - The forward pass's ignore label, if any
///
/// # Returns
/// Gradient w.r.t. the weight matrix `[vocab_size, embed_dim]`
pub fn embed_id_backward<B: Backend>(
    ids: Tensor<B, 1, Int>,
    vocab_size: usize,
    grad_output: Tensor<B, 2>,
    ignore_label: Option<i64>,
) -> Tensor<B, 2> {
    let device = grad_output.device();
    let [_, embed_dim] = grad_output.dims();

    let (ids, grad_output) = match ignore_label {
        None => (ids, grad_output),
        Some(label) => {
            // Zero the incoming gradient at ignored positions and point
            // their ids at row 0; the zeroed rows then accumulate nothing.
            let ignored = ids.clone().equal_elem(label);
            let grad_mask = ignored.clone().unsqueeze_dim::<2>(1).repeat_dim(1, embed_dim);
            (
                ids.mask_fill(ignored, 0),
                grad_output.mask_fill(grad_mask, 0.0),
            )
        }
    };

    let grad_weight: Tensor<B, 2> = Tensor::zeros([vocab_size, embed_dim], &device);
    // select_assign sums on duplicate indices.
    grad_weight.select_assign(0, ids, grad_output)
}
