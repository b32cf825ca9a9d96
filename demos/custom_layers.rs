use anyhow::Error;
use candle_core::{Device, Tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;

use custom_layers::layers::{standard_normal, CenteredLayer, DenseLayer, Layer, Sequential};

fn main() -> Result<(), Error> {
    let device = Device::Cpu;
    let mut rng = StdRng::seed_from_u64(0);

    // Layer without parameters
    let layer = CenteredLayer::new();
    let x = Tensor::new(&[1f32, 2., 3., 4., 5.], &device)?;
    println!("CenteredLayer({:?}) = {:?}", x.to_vec1::<f32>()?, layer.forward(&x)?.to_vec1::<f32>()?);

    // Centering as part of a larger model: the mean of the output is zero
    let net = Sequential::new()
        .add(DenseLayer::new(8, 128, &mut rng, &device)?.with_activation(None))
        .add(CenteredLayer::new());
    let y = net.forward(&standard_normal(&[4, 8], &mut rng, &device)?)?;
    println!("mean after centering: {:e}", y.mean_all()?.to_scalar::<f32>()?);

    // Layer with parameters
    let linear = DenseLayer::new(5, 3, &mut rng, &device)?;
    println!("weight shape {:?}, bias shape {:?}", linear.weight().dims(), linear.bias().dims());
    let out = linear.forward(&standard_normal(&[2, 5], &mut rng, &device)?)?;
    println!("DenseLayer(5, 3) on [2, 5]: {:?}", out.to_vec2::<f32>()?);

    // Stacking custom layers
    let net = Sequential::new()
        .add(DenseLayer::new(64, 8, &mut rng, &device)?)
        .add(DenseLayer::new(8, 1, &mut rng, &device)?);
    let out = net.forward(&Tensor::rand(0f32, 1f32, (2, 64), &device)?)?;
    println!("Sequential(DenseLayer(64, 8), DenseLayer(8, 1)): {:?}", out.to_vec2::<f32>()?);

    for (name, tensor) in net.named_parameters() {
        println!("{:<10} {:?}", name, tensor.dims());
    }

    Ok(())
}
