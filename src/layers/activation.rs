use candle_core::Tensor;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::layers::layer::{ensure_float, Layer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Gelu,
    Relu,
    Silu,
}

impl Activation {
    pub fn from_str(name: &str) -> Result<Self> {
        match name {
            "gelu" => Ok(Activation::Gelu),
            "relu" => Ok(Activation::Relu),
            "silu" => Ok(Activation::Silu),
            _ => Err(Error::Config(format!("unsupported activation function: {}", name))),
        }
    }

    pub fn apply(&self, input: &Tensor) -> Result<Tensor> {
        let output = match self {
            Activation::Gelu => input.gelu()?,
            Activation::Relu => input.relu()?,
            Activation::Silu => input.silu()?,
        };
        Ok(output)
    }
}

impl Layer for Activation {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        ensure_float(input)?;
        self.apply(input)
    }
}
