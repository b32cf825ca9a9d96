use candle_core::Tensor;

use crate::error::{Error, Result};

pub trait Layer: Send + Sync {
    fn forward(&self, input: &Tensor) -> Result<Tensor>;

    /// Learnable tensors owned by the layer, keyed by their parameter name.
    fn named_parameters(&self) -> Vec<(String, &Tensor)> {
        Vec::new()
    }
}

/// Rejects tensors that cannot take part in floating-point arithmetic.
pub(crate) fn ensure_float(input: &Tensor) -> Result<()> {
    if !input.dtype().is_float() {
        return Err(Error::InvalidInput(format!(
            "expected a floating-point tensor, got {:?}",
            input.dtype()
        )));
    }
    Ok(())
}
