use std::collections::HashMap;
use std::path::Path;

use candle_core::Tensor;

use crate::error::Result;
use crate::layers::layer::Layer;

/// Ordered chain of layers, each fed the previous layer's output.
#[derive(Default)]
pub struct Sequential {
    layers: Vec<Box<dyn Layer>>,
}

impl Sequential {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    pub fn add<L: Layer + 'static>(mut self, layer: L) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    pub fn push(&mut self, layer: Box<dyn Layer>) {
        self.layers.push(layer);
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Box<dyn Layer>] {
        &self.layers
    }

    /// Writes every named parameter to a safetensors file.
    pub fn save_parameters<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let tensors: HashMap<String, Tensor> = self
            .named_parameters()
            .into_iter()
            .map(|(name, tensor)| (name, tensor.clone()))
            .collect();
        candle_core::safetensors::save(&tensors, path.as_ref())?;
        tracing::info!(path = %path.as_ref().display(), count = tensors.len(), "saved parameters");
        Ok(())
    }
}

impl Layer for Sequential {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let mut hidden_states = input.clone();
        for (idx, layer) in self.layers.iter().enumerate() {
            hidden_states = layer.forward(&hidden_states)?;
            tracing::debug!(layer = idx, shape = ?hidden_states.dims(), "sequential step");
        }
        Ok(hidden_states)
    }

    fn named_parameters(&self) -> Vec<(String, &Tensor)> {
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(idx, layer)| {
                layer
                    .named_parameters()
                    .into_iter()
                    .map(move |(name, tensor)| (format!("{}.{}", idx, name), tensor))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::layers::{Activation, CenteredLayer, DenseLayer};
    use candle_core::{DType, Device};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_sequential_is_identity() {
        let net = Sequential::new();
        let input = Tensor::new(&[1f32, -2., 3.], &Device::Cpu).unwrap();

        assert!(net.is_empty());
        let output = net.forward(&input).unwrap();
        assert_eq!(output.to_vec1::<f32>().unwrap(), vec![1., -2., 3.]);
    }

    #[test]
    fn test_composition_law() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = DenseLayer::new(4, 8, &mut rng, &Device::Cpu).unwrap();
        let b = CenteredLayer::new();
        let x = crate::layers::standard_normal(&[2, 4], &mut rng, &Device::Cpu).unwrap();

        let expected = b.forward(&a.forward(&x).unwrap()).unwrap();
        let net = Sequential::new().add(a).add(b);
        let actual = net.forward(&x).unwrap();

        assert_eq!(net.len(), 2);
        assert_eq!(actual.to_vec2::<f32>().unwrap(), expected.to_vec2::<f32>().unwrap());
    }

    #[test]
    fn test_first_failure_propagates() {
        let mut rng = StdRng::seed_from_u64(0);
        let net = Sequential::new()
            .add(DenseLayer::new(3, 2, &mut rng, &Device::Cpu).unwrap())
            .add(DenseLayer::new(5, 1, &mut rng, &Device::Cpu).unwrap());
        let input = Tensor::zeros((1, 3), DType::F32, &Device::Cpu).unwrap();

        match net.forward(&input) {
            Err(Error::ShapeMismatch { expected, actual }) => {
                assert_eq!(expected, vec![5]);
                assert_eq!(actual, vec![1, 2]);
            }
            other => panic!("expected shape mismatch, got {:?}", other.map(|t| t.dims().to_vec())),
        }
    }

    #[test]
    fn test_named_parameters_are_prefixed() {
        let mut rng = StdRng::seed_from_u64(0);
        let inner = Sequential::new().add(DenseLayer::new(2, 2, &mut rng, &Device::Cpu).unwrap());
        let mut net = Sequential::new()
            .add(DenseLayer::new(2, 2, &mut rng, &Device::Cpu).unwrap())
            .add(Activation::Relu);
        net.push(Box::new(inner));

        let names: Vec<String> = net.named_parameters().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["0.weight", "0.bias", "2.0.weight", "2.0.bias"]);
    }
}
