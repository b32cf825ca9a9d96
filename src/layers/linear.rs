use candle_core::safetensors::MmapedSafetensors;
use candle_core::{DType, Device, Tensor};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{Error, Result};
use crate::layers::activation::Activation;
use crate::layers::layer::{ensure_float, Layer};

/// Draws a tensor of the given shape from `N(0, 1)` using the caller's random source.
pub fn standard_normal<R: Rng + ?Sized>(shape: &[usize], rng: &mut R, device: &Device) -> Result<Tensor> {
    let count = shape.iter().product::<usize>();
    let values: Vec<f32> = (0..count)
        .map(|_| Distribution::<f32>::sample(&StandardNormal, &mut *rng))
        .collect();
    Ok(Tensor::from_vec(values, shape, device)?)
}

/// Fully connected layer computing `activation(input · weight + bias)`.
///
/// The weight has shape `[in_units, units]` and the bias `[units]`. Without an
/// explicit activation the layer applies relu.
pub struct DenseLayer {
    weight: Tensor,
    bias: Tensor,
    activation: Option<Activation>,
    device: Device,
}

impl DenseLayer {
    pub fn new<R: Rng + ?Sized>(in_units: usize, units: usize, rng: &mut R, device: &Device) -> Result<Self> {
        if in_units == 0 || units == 0 {
            return Err(Error::Config(format!(
                "dense layer dimensions must be positive, got in_units={} units={}",
                in_units, units
            )));
        }

        let weight = standard_normal(&[in_units, units], rng, device)?;
        let bias = standard_normal(&[units], rng, device)?;
        tracing::debug!(in_units, units, "initialized dense layer");

        Ok(Self {
            weight,
            bias,
            activation: Some(Activation::Relu),
            device: device.clone(),
        })
    }

    /// Reads `{prefix}.weight` and `{prefix}.bias` from a safetensors archive.
    pub fn load(weights_map: &MmapedSafetensors, prefix: &str, device: &Device) -> Result<Self> {
        let weight = weights_map
            .load(&format!("{}.weight", prefix), device)?
            .to_dtype(DType::F32)?;
        let bias = weights_map
            .load(&format!("{}.bias", prefix), device)?
            .to_dtype(DType::F32)?;

        let (in_units, units) = weight.dims2()?;
        if bias.dims() != [units] {
            return Err(Error::ShapeMismatch {
                expected: vec![units],
                actual: bias.dims().to_vec(),
            });
        }
        if in_units == 0 || units == 0 {
            return Err(Error::Config(format!("{}.weight has an empty dimension", prefix)));
        }
        tracing::debug!(prefix, in_units, units, "loaded dense layer");

        Ok(Self {
            weight,
            bias,
            activation: Some(Activation::Relu),
            device: device.clone(),
        })
    }

    /// Replaces the activation; `None` leaves the affine output untouched.
    pub fn with_activation(mut self, activation: Option<Activation>) -> Self {
        self.activation = activation;
        self
    }

    pub fn in_units(&self) -> usize {
        self.weight.dims()[0]
    }

    pub fn units(&self) -> usize {
        self.weight.dims()[1]
    }

    pub fn weight(&self) -> &Tensor {
        &self.weight
    }

    pub fn bias(&self) -> &Tensor {
        &self.bias
    }

    pub fn activation(&self) -> Option<Activation> {
        self.activation
    }

    /// Swaps in parameters produced elsewhere, e.g. by an optimizer step.
    pub fn set_parameters(&mut self, weight: Tensor, bias: Tensor) -> Result<()> {
        let weight_shape = [self.in_units(), self.units()];
        if weight.dims() != weight_shape {
            return Err(Error::ShapeMismatch {
                expected: weight_shape.to_vec(),
                actual: weight.dims().to_vec(),
            });
        }
        if bias.dims() != [self.units()] {
            return Err(Error::ShapeMismatch {
                expected: vec![self.units()],
                actual: bias.dims().to_vec(),
            });
        }
        ensure_float(&weight)?;
        ensure_float(&bias)?;

        self.weight = weight.to_device(&self.device)?.to_dtype(DType::F32)?;
        self.bias = bias.to_device(&self.device)?.to_dtype(DType::F32)?;
        Ok(())
    }
}

impl Layer for DenseLayer {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        ensure_float(input)?;
        let in_units = self.in_units();
        match input.dims().last() {
            None => return Err(Error::InvalidInput("dense layer needs at least one dimension".to_string())),
            Some(&last) if last != in_units => {
                return Err(Error::ShapeMismatch {
                    expected: vec![in_units],
                    actual: input.dims().to_vec(),
                })
            }
            Some(_) => {}
        }

        let input = input.to_device(&self.device)?.to_dtype(self.weight.dtype())?;
        let output = if input.rank() == 1 {
            input.unsqueeze(0)?.matmul(&self.weight)?.squeeze(0)?
        } else {
            input.broadcast_matmul(&self.weight)?
        };
        let output = output.broadcast_add(&self.bias)?;
        tracing::debug!(shape = ?output.dims(), "dense forward");

        match self.activation {
            Some(activation) => activation.apply(&output),
            None => Ok(output),
        }
    }

    fn named_parameters(&self) -> Vec<(String, &Tensor)> {
        vec![
            ("weight".to_string(), &self.weight),
            ("bias".to_string(), &self.bias),
        ]
    }
}
