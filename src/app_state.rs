use candle_core::Device;

use crate::models::Model;

pub struct AppState {
    pub model: Box<dyn Model>,
    pub device: Device,
    pub model_name: String,
}
