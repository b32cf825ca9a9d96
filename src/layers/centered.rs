use candle_core::{DType, Tensor};

use crate::error::{Error, Result};
use crate::layers::layer::{ensure_float, Layer};

/// Parameterless layer subtracting the mean of all input elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct CenteredLayer;

impl CenteredLayer {
    pub fn new() -> Self {
        Self
    }
}

impl Layer for CenteredLayer {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        ensure_float(input)?;
        if input.elem_count() == 0 {
            return Err(Error::InvalidInput("cannot center an empty tensor".to_string()));
        }

        // Accumulate in f64 so low precision inputs keep a usable mean.
        let mean = input.to_dtype(DType::F64)?.mean_all()?.to_scalar::<f64>()?;
        tracing::debug!(shape = ?input.dims(), mean, "centering input");

        Ok(input.affine(1.0, -mean)?)
    }
}
