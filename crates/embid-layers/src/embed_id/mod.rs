//! Embedding lookup by integer id.
//!
//! The forward operation gathers rows of a `[vocab_size, embed_dim]` weight
//! matrix for a batch of ids. An optional ignore label designates a sentinel
//! id whose output rows are forced to the zero vector without reading the
//! matrix at all; every other id must lie in `[0, vocab_size)` or the whole
//! call fails.
//!
//! The gradient of a gather is a scatter-add, provided here as
//! [`embed_id_backward`]. The forward pass is composed of `select` and
//! `mask_fill`, both registered with burn's autodiff, so running it on an
//! autodiff backend yields exactly that gradient; ignored positions
//! contribute nothing.

mod backward;
mod forward;

pub use backward::embed_id_backward;
pub use forward::{embed_id, embed_id_seq};
