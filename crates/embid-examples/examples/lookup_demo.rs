//! # Embedding Lookup Example
//!
//! Walks through the embedding table end to end:
//! - building a table from a seeded config
//! - looking up a batch of ids
//! - suppressing a sentinel id with the ignore label
//! - reading the table back through the parameter registry

use burn::tensor::{Int, Tensor};
use clap::Parser;
use embid_core::backend::{init_device, CpuBackend};
use embid_core::param::TrainableModule;
use embid_examples::format_rows;
use embid_layers::EmbedTableConfig;

#[derive(Parser, Debug)]
#[command(about = "Embedding table walkthrough")]
struct Args {
    /// Number of distinct ids in the vocabulary
    #[arg(long, default_value_t = 8)]
    vocab_size: usize,

    /// Length of each embedding vector
    #[arg(long, default_value_t = 4)]
    embed_dim: usize,

    /// Seed for the weight sampling
    #[arg(long, default_value_t = 4242)]
    seed: u64,

    /// Id whose embedding is forced to zero
    #[arg(long, default_value_t = 0)]
    ignore_label: i64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    println!("=== embid Lookup Example ===\n");

    let device = init_device();
    log::info!("device initialized");

    // ========================================
    // 1. Build a table from a config
    // ========================================
    let config = EmbedTableConfig::new(args.vocab_size, args.embed_dim).with_seed(args.seed);
    let table = config.init::<CpuBackend>(&device)?;
    println!(
        "Created table: vocab_size={} embed_dim={}",
        table.vocab_size(),
        table.embed_dim()
    );

    // ========================================
    // 2. Look up a batch of ids
    // ========================================
    let batch = [0i64, 1, (args.vocab_size - 1) as i64, 1];
    let ids: Tensor<CpuBackend, 1, Int> = Tensor::from_data(batch.as_slice(), &device);
    let embeddings = table.lookup(ids)?;

    println!("\nLookup of {batch:?}:");
    for (id, line) in batch.iter().zip(format_rows(&embeddings)) {
        println!("  id {id:>3} -> {line}");
    }

    // ========================================
    // 3. Same batch, with an ignore label
    // ========================================
    let config = config.with_ignore_label(args.ignore_label);
    let masked_table = config.init::<CpuBackend>(&device)?;

    let ids: Tensor<CpuBackend, 1, Int> = Tensor::from_data(batch.as_slice(), &device);
    let embeddings = masked_table.lookup(ids)?;

    println!("\nSame batch with ignore_label={}:", args.ignore_label);
    for (id, line) in batch.iter().zip(format_rows(&embeddings)) {
        println!("  id {id:>3} -> {line}");
    }

    // ========================================
    // 4. Parameter registry
    // ========================================
    println!("\nRegistered parameters:");
    for (name, data) in table.named_parameters() {
        println!("  {name}: shape {:?}", data.shape);
    }
    println!("Total trainable scalars: {}", table.num_parameters());

    Ok(())
}
