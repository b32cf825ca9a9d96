pub mod activation;
pub mod centered;
pub mod layer;
pub mod linear;
pub mod sequential;

pub use activation::Activation;
pub use centered::CenteredLayer;
pub use layer::Layer;
pub use linear::{standard_normal, DenseLayer};
pub use sequential::Sequential;
