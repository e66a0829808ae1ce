//! Embedding table layer: the weight matrix, its initialization, and the
//! parameter-registration hook.

use burn::tensor::backend::Backend;
use burn::tensor::{Distribution, Int, Tensor, TensorData};
use embid_core::param::{ParamMap, TrainableModule};
use serde::{Deserialize, Serialize};

use crate::embed_id::{embed_id, embed_id_seq};

/// How the weight matrix of an [`EmbedTable`] is produced.
///
/// The variant is resolved exactly once, at construction; lookups never
/// dispatch on it.
pub enum WeightInit<B: Backend> {
    /// Use the given matrix as-is. Its shape must equal
    /// `[vocab_size, embed_dim]`.
    Explicit(Tensor<B, 2>),
    /// Sample every entry independently from a normal distribution with
    /// mean 0 and standard deviation `scale`.
    Normal { scale: f64 },
    /// Build the matrix with a caller-supplied function, invoked with the
    /// target shape and device. The result is shape-checked like
    /// [`WeightInit::Explicit`].
    Custom(Box<dyn Fn([usize; 2], &B::Device) -> Tensor<B, 2>>),
}

impl<B: Backend> Default for WeightInit<B> {
    fn default() -> Self {
        Self::Normal { scale: 1.0 }
    }
}

impl<B: Backend> WeightInit<B> {
    fn build(
        self,
        vocab_size: usize,
        embed_dim: usize,
        device: &B::Device,
    ) -> Result<Tensor<B, 2>, String> {
        let weight = match self {
            Self::Explicit(weight) => weight,
            Self::Normal { scale } => Tensor::random(
                [vocab_size, embed_dim],
                Distribution::Normal(0.0, scale),
                device,
            ),
            Self::Custom(init_fn) => init_fn([vocab_size, embed_dim], device),
        };

        let dims = weight.dims();
        if dims != [vocab_size, embed_dim] {
            return Err(format!(
                "initial weight has shape {dims:?}, expected [{vocab_size}, {embed_dim}]"
            ));
        }
        Ok(weight)
    }
}

/// Lookup table mapping integer ids to learned embedding vectors.
///
/// Owns a `[vocab_size, embed_dim]` weight matrix, created at construction
/// from a [`WeightInit`]. Lookups are pure reads; the matrix only changes
/// through [`TrainableModule::load_parameter`], which callers must serialize
/// against concurrent lookups themselves.
pub struct EmbedTable<B: Backend> {
    weight: Tensor<B, 2>,
    ignore_label: Option<i64>,
}

impl<B: Backend> EmbedTable<B> {
    /// Create a table of `vocab_size` rows of `embed_dim` entries each.
    ///
    /// Ids equal to `ignore_label` (when configured) look up as the zero
    /// vector and receive no gradient.
    pub fn new(
        vocab_size: usize,
        embed_dim: usize,
        init: WeightInit<B>,
        ignore_label: Option<i64>,
        device: &B::Device,
    ) -> Result<Self, String> {
        if vocab_size == 0 {
            return Err("vocab_size must be positive".to_string());
        }
        if embed_dim == 0 {
            return Err("embed_dim must be positive".to_string());
        }

        let weight = init.build(vocab_size, embed_dim, device)?;
        log::debug!(
            "embed table created: vocab_size={vocab_size} embed_dim={embed_dim} ignore_label={ignore_label:?}"
        );

        Ok(Self {
            weight,
            ignore_label,
        })
    }

    /// Look up the embedding rows for a 1-D batch of ids.
    pub fn lookup(&self, ids: Tensor<B, 1, Int>) -> Result<Tensor<B, 2>, String> {
        embed_id(ids, self.weight.clone(), self.ignore_label)
    }

    /// Look up `[batch_size, seq_len]` ids, producing
    /// `[batch_size, seq_len, embed_dim]`.
    pub fn lookup_seq(&self, ids: Tensor<B, 2, Int>) -> Result<Tensor<B, 3>, String> {
        embed_id_seq(ids, self.weight.clone(), self.ignore_label)
    }

    pub fn weight(&self) -> &Tensor<B, 2> {
        &self.weight
    }

    pub fn vocab_size(&self) -> usize {
        self.weight.dims()[0]
    }

    pub fn embed_dim(&self) -> usize {
        self.weight.dims()[1]
    }

    pub const fn ignore_label(&self) -> Option<i64> {
        self.ignore_label
    }
}

impl<B: Backend> TrainableModule for EmbedTable<B> {
    fn named_parameters(&self) -> ParamMap {
        let mut params = ParamMap::new();
        params.insert("weight".to_string(), self.weight.to_data());
        params
    }

    fn load_parameter(&mut self, name: &str, value: TensorData) -> Result<(), String> {
        if name != "weight" {
            return Err(format!("unknown parameter {name:?}"));
        }
        let dims = self.weight.dims();
        if value.shape != dims {
            return Err(format!(
                "replacement for \"weight\" has shape {:?}, expected {dims:?}",
                value.shape
            ));
        }
        self.weight = Tensor::from_data(value, &self.weight.device());
        Ok(())
    }
}

/// Construction configuration for an [`EmbedTable`] with sampled weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedTableConfig {
    /// Number of distinct ids the table supports.
    pub vocab_size: usize,
    /// Length of each embedding vector.
    pub embed_dim: usize,
    /// Standard deviation of the normal distribution the weights are
    /// sampled from.
    #[serde(default = "default_init_scale")]
    pub init_scale: f64,
    /// Sentinel id whose embedding is forced to zero.
    #[serde(default)]
    pub ignore_label: Option<i64>,
    /// Seed for the backend RNG, for reproducible sampling.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_init_scale() -> f64 {
    1.0
}

impl EmbedTableConfig {
    pub fn new(vocab_size: usize, embed_dim: usize) -> Self {
        Self {
            vocab_size,
            embed_dim,
            init_scale: default_init_scale(),
            ignore_label: None,
            seed: None,
        }
    }

    pub fn with_init_scale(mut self, scale: f64) -> Self {
        self.init_scale = scale;
        self
    }

    pub fn with_ignore_label(mut self, label: i64) -> Self {
        self.ignore_label = Some(label);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the table on the given device.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<EmbedTable<B>, String> {
        if let Some(seed) = self.seed {
            B::seed(seed);
        }
        EmbedTable::new(
            self.vocab_size,
            self.embed_dim,
            WeightInit::Normal {
                scale: self.init_scale,
            },
            self.ignore_label,
            device,
        )
    }
}
