//! Custom neural-network layers on top of `candle-core`.
//!
//! - [`layers::CenteredLayer`] subtracts the mean of its input and owns no parameters.
//! - [`layers::DenseLayer`] computes `relu(input · weight + bias)` with normally
//!   initialized parameters drawn from a caller-supplied random source.
//! - [`layers::Sequential`] chains layers, feeding each output to the next layer.
//!
//! ```rust
//! use candle_core::{Device, Tensor};
//! use custom_layers::layers::{CenteredLayer, DenseLayer, Layer, Sequential};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let net = Sequential::new()
//!     .add(DenseLayer::new(4, 8, &mut rng, &Device::Cpu)?)
//!     .add(CenteredLayer::new());
//!
//! let x = Tensor::ones((2, 4), candle_core::DType::F32, &Device::Cpu)?;
//! let y = net.forward(&x)?;
//! assert_eq!(y.dims(), &[2, 8]);
//! # Ok::<(), custom_layers::Error>(())
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod layers;
pub mod models;

pub use error::{Error, Result};
