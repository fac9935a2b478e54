//! Step-time benchmark for every universe kind and step strategy

use multiverse_life::domain::{ConwayRule, Life3DRule, Universe, Universe2D, Universe25D, Universe3D};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Instant;

fn time_steps(iterations: u32, mut step: impl FnMut()) -> f64 {
    let start = Instant::now();
    for _ in 0..iterations {
        step();
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn volume(size: usize) -> Universe3D {
    let mut universe = Universe3D::new(size, size, size, Arc::new(Life3DRule));
    universe.randomize_with(&mut StdRng::seed_from_u64(size as u64));
    universe
}

fn benchmark_3d_sequential(size: usize, iterations: u32) -> f64 {
    let mut universe = volume(size);
    time_steps(iterations, || universe.step())
}

fn benchmark_3d_parallel(size: usize, iterations: u32) -> f64 {
    let mut universe = volume(size);
    time_steps(iterations, || universe.step_parallel())
}

fn benchmark_2d(size: usize, iterations: u32) -> f64 {
    let mut universe = Universe2D::new(size, size, Arc::new(ConwayRule));
    universe.randomize_with(&mut StdRng::seed_from_u64(size as u64));
    time_steps(iterations, || universe.step())
}

fn benchmark_25d(size: usize, layers: usize, interaction: bool, iterations: u32) -> f64 {
    let mut universe = Universe25D::new(size, size, layers, Arc::new(ConwayRule));
    universe.randomize_with(&mut StdRng::seed_from_u64(size as u64));
    universe.set_layer_interaction(interaction);
    time_steps(iterations, || universe.step())
}

fn cells_per_sec(cells: usize, ms: f64) -> f64 {
    cells as f64 / (ms / 1000.0) / 1_000_000.0
}

fn main() {
    println!("=== Multiverse Life Step Benchmark ===\n");
    let iterations = 10;

    println!("--- 3D (B6/S567) ---");
    println!("{:>12} {:>12} {:>12} {:>10} {:>14}", "Size", "Sequential", "Parallel", "Speedup", "Mcells/sec");
    println!("{:-<64}", "");
    for size in [16, 32, 64, 96, 128] {
        let seq_ms = benchmark_3d_sequential(size, iterations);
        let par_ms = benchmark_3d_parallel(size, iterations);
        println!(
            "{:>12} {:>12.2} {:>12.2} {:>9.1}x {:>14.1}",
            format!("{}^3", size),
            seq_ms,
            par_ms,
            seq_ms / par_ms,
            cells_per_sec(size * size * size, par_ms)
        );
    }

    println!("\n--- 2D (B3/S23) ---");
    println!("{:>12} {:>12} {:>14}", "Size", "ms/gen", "Mcells/sec");
    println!("{:-<40}", "");
    for size in [100, 500, 1000, 2000] {
        let ms = benchmark_2d(size, iterations);
        println!("{:>12} {:>12.2} {:>14.1}", format!("{}x{}", size, size), ms, cells_per_sec(size * size, ms));
    }

    println!("\n--- 2.5D (8 layers) ---");
    println!("{:>12} {:>12} {:>12} {:>10}", "Size", "Independent", "Interacting", "Overhead");
    println!("{:-<50}", "");
    for size in [64, 256, 512] {
        let independent_ms = benchmark_25d(size, 8, false, iterations);
        let interacting_ms = benchmark_25d(size, 8, true, iterations);
        println!(
            "{:>12} {:>12.2} {:>12.2} {:>9.1}x",
            format!("{}x{}", size, size),
            independent_ms,
            interacting_ms,
            interacting_ms / independent_ms
        );
    }
}
