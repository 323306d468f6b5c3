#![allow(clippy::panic)] // benchmark setup failure has nowhere to propagate to.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rover_physics::{Rover, VehicleConfig};
use rover_utils::{Matrix3, Vector3};

fn update_benchmark(c: &mut Criterion) {
    let mut rover: Rover = match VehicleConfig::reference().build() {
        Ok(r) => r,
        Err(e) => panic!("reference vehicle must build: {e}"),
    };
    rover.velocity.value = Vector3::new(0.4, 0.1, -0.02);
    rover.angvel.value = Vector3::new(0.05, -0.2, 0.3);
    rover.attitude.value = Matrix3::from_array([[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
    let commands = [10.0, 8.0, -2.0, -2.0, 0.5];

    c.bench_function("rover update", |b| {
        b.iter(|| rover.update(black_box(&commands)))
    });
}

criterion_group!(benches, update_benchmark);
criterion_main!(benches);
