//! Forward pass for the embedding lookup operation.

use burn::tensor::backend::Backend;
use burn::tensor::{Int, Tensor};

/// Every id other than the ignore label must lie in `[0, vocab_size)`.
/// Ids are never clamped or wrapped; one bad id fails the whole call.
fn check_ids<B: Backend>(
    ids: &Tensor<B, 1, Int>,
    vocab_size: usize,
    ignore_label: Option<i64>,
) -> Result<(), String> {
    let data = ids.clone().into_data();
    for id in data.iter::<i64>() {
        if Some(id) == ignore_label {
            continue;
        }
        if id < 0 || id >= vocab_size as i64 {
            return Err(format!(
                "id {id} is out of range for a vocabulary of size {vocab_size}"
            ));
        }
    }
    Ok(())
}

/// Gather weight rows for a batch of ids.
///
/// Output row `k` is row `ids[k]` of `weight`, except that ids equal to
/// `ignore_label` (when one is configured) produce the zero vector instead.
/// Ignored ids may hold any value, including ones outside `[0, vocab_size)`;
/// they are routed to row 0 before the gather and their output rows zeroed
/// afterwards, so the gather never sees an out-of-range index.
///
/// # Arguments
/// * `ids` - Integer ids `[batch_size]`
/// * `weight` - Embedding matrix `[vocab_size, embed_dim]`
/// * `ignore_label` - Optional sentinel id whose rows come back all-zero
///
/// # Returns
/// Embedding rows `[batch_size, embed_dim]`
pub fn embed_id<B: Backend>(
    ids: Tensor<B, 1, Int>,
    weight: Tensor<B, 2>,
    ignore_label: Option<i64>,
) -> Result<Tensor<B, 2>, String> {
    let [vocab_size, embed_dim] = weight.dims();
    check_ids(&ids, vocab_size, ignore_label)?;

    let Some(label) = ignore_label else {
        return Ok(weight.select(0, ids));
    };

    let ignored = ids.clone().equal_elem(label);
    let safe_ids = ids.mask_fill(ignored.clone(), 0);
    let rows = weight.select(0, safe_ids);

    let row_mask = ignored.unsqueeze_dim::<2>(1).repeat_dim(1, embed_dim);
    Ok(rows.mask_fill(row_mask, 0.0))
}

/// [`embed_id`] over `[batch_size, seq_len]` ids, stacking the embeddings
/// along a new trailing axis.
///
/// The lookup is elementwise over the id array, so the batch shape is only
/// flattened through the 1-D op and restored afterwards.
///
/// # Arguments
/// * `ids` - Integer ids `[batch_size, seq_len]`
/// * `weight` - Embedding matrix `[vocab_size, embed_dim]`
/// * `ignore_label` - Optional sentinel id whose rows come back all-zero
///
/// # Returns
/// Embedding rows `[batch_size, seq_len, embed_dim]`
pub fn embed_id_seq<B: Backend>(
    ids: Tensor<B, 2, Int>,
    weight: Tensor<B, 2>,
    ignore_label: Option<i64>,
) -> Result<Tensor<B, 3>, String> {
    let [batch_size, seq_len] = ids.dims();
    let [_, embed_dim] = weight.dims();

    let flat = ids.reshape([batch_size * seq_len]);
    let rows = embed_id(flat, weight, ignore_label)?;
    Ok(rows.reshape([batch_size, seq_len, embed_dim]))
}
