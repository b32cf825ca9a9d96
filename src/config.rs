use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::layers::Activation;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerConfig {
    Centered,
    Dense {
        in_units: usize,
        units: usize,
        #[serde(default = "default_activation")]
        activation: Option<Activation>,
    },
    Activation {
        function: Activation,
    },
}

fn default_activation() -> Option<Activation> {
    Some(Activation::Relu)
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    #[serde(default)]
    pub seed: u64,
    pub layers: Vec<LayerConfig>,
}

impl NetworkConfig {
    /// Checks that every dense layer receives the width produced upstream.
    ///
    /// Centering and activation layers keep their input shape, so the width
    /// flows through them unchanged.
    pub fn validate(&self) -> Result<()> {
        let mut width: Option<usize> = None;
        for (idx, layer) in self.layers.iter().enumerate() {
            if let LayerConfig::Dense { in_units, units, .. } = layer {
                if *in_units == 0 || *units == 0 {
                    return Err(Error::Config(format!(
                        "layer {}: dense dimensions must be positive",
                        idx
                    )));
                }
                if let Some(previous) = width {
                    if previous != *in_units {
                        return Err(Error::Config(format!(
                            "layer {}: expects {} input units but receives {}",
                            idx, in_units, previous
                        )));
                    }
                }
                width = Some(*units);
            }
        }
        Ok(())
    }

    /// Input width of the first dense layer, if the network has one.
    pub fn in_units(&self) -> Option<usize> {
        self.layers.iter().find_map(|layer| match layer {
            LayerConfig::Dense { in_units, .. } => Some(*in_units),
            _ => None,
        })
    }
}

impl Default for NetworkConfig {
    /// Two stacked dense layers followed by centering.
    fn default() -> Self {
        Self {
            seed: 42,
            layers: vec![
                LayerConfig::Dense { in_units: 64, units: 8, activation: Some(Activation::Relu) },
                LayerConfig::Dense { in_units: 8, units: 1, activation: Some(Activation::Relu) },
                LayerConfig::Centered,
            ],
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub weights_path: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let cfg = serde_json::from_reader::<File, AppConfig>(File::open(path)?)?;
        cfg.network.validate()?;
        Ok(cfg)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            network: NetworkConfig::default(),
            weights_path: None,
        }
    }
}
