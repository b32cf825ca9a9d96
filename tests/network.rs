//! End-to-end checks over networks built from configuration.

use candle_core::{DType, Device, Tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;

use custom_layers::config::{LayerConfig, NetworkConfig};
use custom_layers::layers::{standard_normal, Activation, CenteredLayer, DenseLayer, Layer, Sequential};
use custom_layers::models::{MlpNetwork, Model};
use custom_layers::Error;

fn network_config(seed: u64) -> NetworkConfig {
    NetworkConfig {
        seed,
        layers: vec![
            LayerConfig::Dense { in_units: 5, units: 8, activation: Some(Activation::Relu) },
            LayerConfig::Activation { function: Activation::Silu },
            LayerConfig::Dense { in_units: 8, units: 3, activation: None },
            LayerConfig::Centered,
        ],
    }
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("custom_layers_{}_{}.safetensors", name, std::process::id()))
}

#[test]
fn saved_parameters_restore_the_same_network() {
    let cfg = network_config(21);
    let original = MlpNetwork::new(&cfg, &Device::Cpu).unwrap();
    let path = temp_path("roundtrip");
    original.save(&path).unwrap();

    // A different seed would give different parameters unless they are loaded.
    let mut reload_cfg = cfg.clone();
    reload_cfg.seed = 999;
    let restored = MlpNetwork::load(&reload_cfg, &path, &Device::Cpu).unwrap();
    std::fs::remove_file(&path).ok();

    let mut rng = StdRng::seed_from_u64(4);
    let input = standard_normal(&[3, 5], &mut rng, &Device::Cpu).unwrap();
    assert_eq!(
        original.forward(&input).unwrap().to_vec2::<f32>().unwrap(),
        restored.forward(&input).unwrap().to_vec2::<f32>().unwrap()
    );
}

#[test]
fn loading_into_a_different_topology_fails() {
    let path = temp_path("topology");
    MlpNetwork::new(&network_config(1), &Device::Cpu).unwrap().save(&path).unwrap();

    let other = NetworkConfig {
        seed: 1,
        layers: vec![LayerConfig::Dense { in_units: 5, units: 4, activation: None }],
    };
    let result = MlpNetwork::load(&other, &path, &Device::Cpu);
    std::fs::remove_file(&path).ok();

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn network_output_is_centered() {
    let net = MlpNetwork::new(&network_config(8), &Device::Cpu).unwrap();
    let input = Tensor::arange(0f32, 20., &Device::Cpu).unwrap().reshape((4, 5)).unwrap();

    let output = net.forward(&input).unwrap();
    assert_eq!(output.dims(), &[4, 3]);
    let mean = output.mean_all().unwrap().to_scalar::<f32>().unwrap();
    assert!(mean.abs() < 1e-4, "mean was {}", mean);
}

#[test]
fn stacked_dense_layers_match_manual_chaining() {
    let mut rng = StdRng::seed_from_u64(0);
    let first = DenseLayer::new(64, 8, &mut rng, &Device::Cpu).unwrap();
    let second = DenseLayer::new(8, 1, &mut rng, &Device::Cpu).unwrap();
    let x = Tensor::rand(0f32, 1f32, (2, 64), &Device::Cpu).unwrap();

    let manual = second.forward(&first.forward(&x).unwrap()).unwrap();
    let net = Sequential::new().add(first).add(second);
    let chained = net.forward(&x).unwrap();

    assert_eq!(chained.dims(), &[2, 1]);
    assert_eq!(chained.to_vec2::<f32>().unwrap(), manual.to_vec2::<f32>().unwrap());
}

#[test]
fn shape_mismatch_surfaces_through_the_network() {
    let net = MlpNetwork::new(&network_config(0), &Device::Cpu).unwrap();
    let input = Tensor::zeros((2, 6), DType::F32, &Device::Cpu).unwrap();

    assert!(matches!(net.forward(&input), Err(Error::ShapeMismatch { .. })));
}

#[test]
fn centering_layer_on_a_batch() {
    let x = Tensor::new(&[[1f32, 2., 3.], [4., 5., 6.]], &Device::Cpu).unwrap();
    let y = CenteredLayer::new().forward(&x).unwrap();

    assert_eq!(y.to_vec2::<f32>().unwrap(), vec![vec![-2.5, -1.5, -0.5], vec![0.5, 1.5, 2.5]]);
}
