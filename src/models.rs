use std::path::Path;

use candle_core::safetensors::MmapedSafetensors;
use candle_core::{Device, Tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{LayerConfig, NetworkConfig};
use crate::error::{Error, Result};
use crate::layers::{CenteredLayer, DenseLayer, Layer, Sequential};

pub trait Model: Send + Sync {
    fn forward(&self, input: &Tensor) -> Result<Tensor>;
    fn num_layers(&self) -> usize;
    fn in_units(&self) -> Option<usize>;
}

/// Multilayer perceptron assembled from a [`NetworkConfig`].
pub struct MlpNetwork {
    device: Device,
    layers: Sequential,
    cfg: NetworkConfig,
}

impl MlpNetwork {
    /// Builds the network with parameters drawn from a generator seeded by `config.seed`.
    pub fn new(config: &NetworkConfig, device: &Device) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let mut layers = Sequential::new();
        for layer_cfg in &config.layers {
            let layer: Box<dyn Layer> = match layer_cfg {
                LayerConfig::Centered => Box::new(CenteredLayer::new()),
                LayerConfig::Dense { in_units, units, activation } => Box::new(
                    DenseLayer::new(*in_units, *units, &mut rng, device)?.with_activation(*activation),
                ),
                LayerConfig::Activation { function } => Box::new(*function),
            };
            layers.push(layer);
        }
        tracing::info!(layers = layers.len(), seed = config.seed, "built network");

        Ok(Self {
            device: device.clone(),
            layers,
            cfg: config.clone(),
        })
    }

    /// Builds the configured topology and restores dense parameters stored under
    /// `"{index}.weight"` and `"{index}.bias"`.
    pub fn load(config: &NetworkConfig, weights_path: &Path, device: &Device) -> Result<Self> {
        config.validate()?;
        let weights = unsafe { MmapedSafetensors::new(weights_path)? };

        let mut layers = Sequential::new();
        for (idx, layer_cfg) in config.layers.iter().enumerate() {
            let layer: Box<dyn Layer> = match layer_cfg {
                LayerConfig::Centered => Box::new(CenteredLayer::new()),
                LayerConfig::Dense { in_units, units, activation } => {
                    let dense = DenseLayer::load(&weights, &idx.to_string(), device)?
                        .with_activation(*activation);
                    if dense.in_units() != *in_units || dense.units() != *units {
                        return Err(Error::Config(format!(
                            "layer {}: stored parameters are {}x{}, configured {}x{}",
                            idx,
                            dense.in_units(),
                            dense.units(),
                            in_units,
                            units
                        )));
                    }
                    Box::new(dense)
                }
                LayerConfig::Activation { function } => Box::new(*function),
            };
            layers.push(layer);
        }
        tracing::info!(path = %weights_path.display(), layers = layers.len(), "loaded network");

        Ok(Self {
            device: device.clone(),
            layers,
            cfg: config.clone(),
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn layers(&self) -> &Sequential {
        &self.layers
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.cfg
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.layers.save_parameters(path)
    }
}

impl Model for MlpNetwork {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let input = input.to_device(&self.device)?;
        self.layers.forward(&input)
    }

    fn num_layers(&self) -> usize {
        self.layers.len()
    }

    fn in_units(&self) -> Option<usize> {
        self.cfg.in_units()
    }
}
