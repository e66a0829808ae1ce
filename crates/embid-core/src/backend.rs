use burn::backend::ndarray::NdArrayDevice;

pub type CpuBackend = burn::backend::NdArray;

/// Backend used wherever gradients are needed. Lookups run on it unchanged;
/// burn derives the backward pass from the ops the forward pass is built of.
pub type AutodiffCpuBackend = burn::backend::Autodiff<CpuBackend>;

pub fn init_device() -> NdArrayDevice {
    NdArrayDevice::default()
}
