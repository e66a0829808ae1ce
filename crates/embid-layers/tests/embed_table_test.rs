//! End-to-end tests for the embedding table layer.

use burn::tensor::{Int, Tensor};
use embid_core::backend::{init_device, CpuBackend};
use embid_core::param::TrainableModule;
use embid_layers::{EmbedTable, EmbedTableConfig, WeightInit};

type Device = burn::backend::ndarray::NdArrayDevice;

fn explicit_table(
    device: &Device,
    ignore_label: Option<i64>,
) -> EmbedTable<CpuBackend> {
    // matrix = [[0, 0, 0], [1, 1, 1], [2, 2, 2]]
    let weight: Tensor<CpuBackend, 2> =
        Tensor::from_data([[0.0f32, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]], device);
    EmbedTable::new(3, 3, WeightInit::Explicit(weight), ignore_label, device)
        .expect("construction should succeed")
}

fn row(table: &EmbedTable<CpuBackend>, id: i64, device: &Device) -> Vec<f32> {
    let ids: Tensor<CpuBackend, 1, Int> = Tensor::from_data([id], device);
    table
        .lookup(ids)
        .expect("lookup should succeed")
        .into_data()
        .to_vec()
        .unwrap()
}

#[test]
fn test_lookup_matches_matrix_rows() {
    let device = init_device();
    let table = explicit_table(&device, None);

    for id in 0..3 {
        let expected = vec![id as f32; 3];
        assert_eq!(row(&table, id, &device), expected, "row {id}");
    }
}

#[test]
fn test_batch_lookup_is_elementwise() {
    let device = init_device();
    let table = explicit_table(&device, None);

    let batch = [2i64, 0, 1, 2];
    let ids: Tensor<CpuBackend, 1, Int> = Tensor::from_data(batch, &device);
    let out = table.lookup(ids).unwrap();
    assert_eq!(out.dims(), [batch.len(), 3]);

    let data: Vec<f32> = out.into_data().to_vec().unwrap();
    for (k, &id) in batch.iter().enumerate() {
        let single = row(&table, id, &device);
        assert_eq!(
            &data[k * 3..(k + 1) * 3],
            single.as_slice(),
            "batch position {k} must equal the single-id lookup of {id}"
        );
    }
}

#[test]
fn test_concrete_scenario_no_ignore() {
    let device = init_device();
    let table = explicit_table(&device, None);

    let ids: Tensor<CpuBackend, 1, Int> = Tensor::from_data([2, 1], &device);
    let data: Vec<f32> = table.lookup(ids).unwrap().into_data().to_vec().unwrap();
    assert_eq!(data, vec![2.0, 2.0, 2.0, 1.0, 1.0, 1.0]);
}

#[test]
fn test_concrete_scenario_ignore_zero() {
    let device = init_device();
    let table = explicit_table(&device, Some(0));

    let ids: Tensor<CpuBackend, 1, Int> = Tensor::from_data([0, 2], &device);
    let data: Vec<f32> = table.lookup(ids).unwrap().into_data().to_vec().unwrap();
    // Row 0 is suppressed to zero, not read from the matrix.
    assert_eq!(data, vec![0.0, 0.0, 0.0, 2.0, 2.0, 2.0]);
}

#[test]
fn test_ignore_label_zeroes_regardless_of_matrix() {
    let device = init_device();
    // Make the ignored row wildly nonzero to prove it is never read.
    let weight: Tensor<CpuBackend, 2> =
        Tensor::from_data([[9.0f32, 9.0], [1.0, 2.0]], &device);
    let table =
        EmbedTable::new(2, 2, WeightInit::Explicit(weight), Some(0), &device).unwrap();

    assert_eq!(row(&table, 0, &device), vec![0.0, 0.0]);
    assert_eq!(row(&table, 1, &device), vec![1.0, 2.0]);
}

#[test]
fn test_out_of_range_ids_fail() {
    let device = init_device();
    let table = explicit_table(&device, None);

    let ids: Tensor<CpuBackend, 1, Int> = Tensor::from_data([3], &device);
    let err = table.lookup(ids).unwrap_err();
    assert!(err.contains("out of range"), "unexpected error: {err}");

    let ids: Tensor<CpuBackend, 1, Int> = Tensor::from_data([-1], &device);
    assert!(table.lookup(ids).is_err());

    // One bad id in an otherwise valid batch fails the whole call.
    let ids: Tensor<CpuBackend, 1, Int> = Tensor::from_data([1, 3, 0], &device);
    assert!(table.lookup(ids).is_err());
}

#[test]
fn test_negative_ignore_label_is_accepted() {
    let device = init_device();
    let table = explicit_table(&device, Some(-1));

    let ids: Tensor<CpuBackend, 1, Int> = Tensor::from_data([-1, 1], &device);
    let data: Vec<f32> = table.lookup(ids).unwrap().into_data().to_vec().unwrap();
    assert_eq!(data, vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
}

#[test]
fn test_wrong_shape_explicit_init_fails() {
    let device = init_device();
    let weight: Tensor<CpuBackend, 2> =
        Tensor::from_data([[0.0f32, 0.0, 0.0], [1.0, 1.0, 1.0]], &device);

    let result = EmbedTable::new(3, 3, WeightInit::Explicit(weight), None, &device);
    let err = result.err().expect("a (2, 3) matrix must be rejected for V=3, D=3");
    assert!(err.contains("shape"), "unexpected error: {err}");
}

#[test]
fn test_zero_sizes_fail() {
    let device = init_device();
    assert!(
        EmbedTable::<CpuBackend>::new(0, 3, WeightInit::default(), None, &device).is_err()
    );
    assert!(
        EmbedTable::<CpuBackend>::new(3, 0, WeightInit::default(), None, &device).is_err()
    );
}

#[test]
fn test_custom_init_is_used_and_shape_checked() {
    let device = init_device();

    let table = EmbedTable::<CpuBackend>::new(
        2,
        2,
        WeightInit::Custom(Box::new(|[v, d], device| {
            Tensor::ones([v, d], device) * 3.0
        })),
        None,
        &device,
    )
    .unwrap();
    assert_eq!(row(&table, 1, &device), vec![3.0, 3.0]);

    // A custom initializer returning the wrong shape is a construction error.
    let result = EmbedTable::<CpuBackend>::new(
        2,
        2,
        WeightInit::Custom(Box::new(|_, device| Tensor::ones([4, 4], device))),
        None,
        &device,
    );
    assert!(result.is_err());
}

#[test]
fn test_config_init_is_seeded_and_shaped() {
    let device = init_device();
    let config = EmbedTableConfig::new(50, 8).with_seed(42);

    let a = config.init::<CpuBackend>(&device).unwrap();
    let b = config.init::<CpuBackend>(&device).unwrap();

    assert_eq!(a.vocab_size(), 50);
    assert_eq!(a.embed_dim(), 8);

    let wa: Vec<f32> = a.weight().to_data().to_vec().unwrap();
    let wb: Vec<f32> = b.weight().to_data().to_vec().unwrap();
    assert_eq!(wa, wb, "same seed must produce the same weights");
    assert!(wa.iter().any(|&x| x != 0.0), "sampled weights should not be all zero");
}

#[test]
fn test_lookup_seq_shapes_and_values() {
    let device = init_device();
    let table = explicit_table(&device, Some(0));

    let ids: Tensor<CpuBackend, 2, Int> = Tensor::from_data([[2, 0], [1, 1]], &device);
    let out = table.lookup_seq(ids).unwrap();
    assert_eq!(out.dims(), [2, 2, 3]);

    let data: Vec<f32> = out.into_data().to_vec().unwrap();
    assert_eq!(
        data,
        vec![2.0, 2.0, 2.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]
    );
}

#[test]
fn test_repeated_lookup_is_stable() {
    let device = init_device();
    let table = explicit_table(&device, None);

    let first = row(&table, 2, &device);
    let second = row(&table, 2, &device);
    assert_eq!(first, second);
}

#[test]
fn test_named_parameters_roundtrip() {
    let device = init_device();
    let mut table = explicit_table(&device, None);

    let params = table.named_parameters();
    assert_eq!(params.len(), 1);
    assert!(params.contains_key("weight"));
    assert_eq!(table.num_parameters(), 9);

    // Mutate the weight through the registry, as an optimizer would.
    let mut data = params.get("weight").unwrap().clone();
    let values: Vec<f32> = data.to_vec().unwrap();
    data = burn::tensor::TensorData::new(
        values.iter().map(|x| x + 10.0).collect::<Vec<f32>>(),
        [3, 3],
    );
    table.load_parameter("weight", data).unwrap();

    assert_eq!(row(&table, 0, &device), vec![10.0, 10.0, 10.0]);
    assert_eq!(row(&table, 2, &device), vec![12.0, 12.0, 12.0]);
}

#[test]
fn test_load_parameter_rejects_bad_input() {
    let device = init_device();
    let mut table = explicit_table(&device, None);

    let wrong_shape = burn::tensor::TensorData::new(vec![0.0f32; 6], [2, 3]);
    assert!(table.load_parameter("weight", wrong_shape).is_err());

    let data = burn::tensor::TensorData::new(vec![0.0f32; 9], [3, 3]);
    assert!(table.load_parameter("bias", data).is_err());
}
