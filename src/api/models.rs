use candle_core::{DType, Device, Tensor};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A JSON tensor: either a single vector or a batch of equally long rows.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InputData {
    Vector(Vec<f32>),
    Matrix(Vec<Vec<f32>>),
}

impl InputData {
    pub fn to_tensor(&self, device: &Device) -> Result<Tensor> {
        match self {
            InputData::Vector(values) => {
                ensure_finite(values)?;
                Ok(Tensor::from_slice(values.as_slice(), values.len(), device)?)
            }
            InputData::Matrix(rows) => {
                let cols = rows.first().map(|row| row.len()).unwrap_or(0);
                if let Some(idx) = rows.iter().position(|row| row.len() != cols) {
                    return Err(Error::InvalidInput(format!(
                        "row {} has {} values, expected {}",
                        idx,
                        rows[idx].len(),
                        cols
                    )));
                }
                let data: Vec<f32> = rows.iter().flatten().copied().collect();
                ensure_finite(&data)?;
                Ok(Tensor::from_vec(data, (rows.len(), cols), device)?)
            }
        }
    }
}

fn ensure_finite(values: &[f32]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(Error::InvalidInput(format!("value at position {} is not finite", idx))),
        None => Ok(()),
    }
}

#[derive(Debug, Deserialize)]
pub struct ForwardRequest {
    pub input: InputData,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ForwardResponse {
    pub shape: Vec<usize>,
    /// Output values flattened in row-major order.
    pub output: Vec<f32>,
}

impl ForwardResponse {
    pub fn from_tensor(tensor: &Tensor) -> Result<Self> {
        Ok(Self {
            shape: tensor.dims().to_vec(),
            output: tensor.flatten_all()?.to_dtype(DType::F32)?.to_vec1::<f32>()?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub layers: usize,
    pub in_units: Option<usize>,
}
