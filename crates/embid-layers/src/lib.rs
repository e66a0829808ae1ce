//! # embid-layers
//!
//! Embedding lookup for burn-based models: a weight matrix with one row per
//! vocabulary id, gathered by integer id batches.
//!
//! ## The operation
//!
//! - [`embed_id`]: map a 1-D batch of ids to the matching weight rows,
//!   with an optional ignore label whose rows come back all-zero
//! - [`embed_id_seq`]: the `[batch, seq]` form, stacking embeddings along a
//!   new trailing axis
//! - [`embed_id_backward`]: the paired scatter-add gradient, stated
//!   explicitly as the contract the autodiff collaborator derives
//!
//! ## The layer
//!
//! - [`EmbedTable`]: owns the weight matrix and the ignore label, exposes
//!   lookup and the named-parameter registration hook
//! - [`WeightInit`]: explicit matrix, scaled normal sampling, or a custom
//!   initializer function, resolved once at construction
//! - [`EmbedTableConfig`]: serializable construction config with seeding

pub mod embed_id;
pub mod table;

pub use embed_id::{embed_id, embed_id_backward, embed_id_seq};
pub use table::{EmbedTable, EmbedTableConfig, WeightInit};
