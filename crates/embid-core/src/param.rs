//! Named-parameter registry for trainable modules.
//!
//! Modules expose their trainable state through an explicit collection
//! method instead of ambient registration: the owning model asks for the
//! parameters, it is never implicitly captured into a global scope. The
//! exchange format is [`TensorData`], which is backend- and rank-erased, so
//! save/load and optimizer code can work over any module without generics.

use burn::tensor::TensorData;
use indexmap::IndexMap;

/// Ordered snapshot of a module's trainable tensors, keyed by name.
pub type ParamMap = IndexMap<String, TensorData>;

/// The registration hook for modules that own trainable tensors.
///
/// Discovery goes through [`named_parameters`](TrainableModule::named_parameters);
/// mutation (an optimizer step, a checkpoint load) goes through
/// [`load_parameter`](TrainableModule::load_parameter), which must reject
/// unknown names and shape changes.
pub trait TrainableModule {
    /// Ordered map of parameter name to tensor data.
    fn named_parameters(&self) -> ParamMap;

    /// Replace the named parameter with new data of identical shape.
    fn load_parameter(&mut self, name: &str, value: TensorData) -> Result<(), String>;

    /// Total number of trainable scalars across all parameters.
    fn num_parameters(&self) -> usize {
        self.named_parameters()
            .values()
            .map(|data| data.shape.iter().product::<usize>())
            .sum()
    }
}
