//! Stepping throughput for each backend

use std::time::Instant;

use anyhow::Context;
use gpu_life::{Backend, LifeError, SeedPolicy, Stepper};

/// Average milliseconds per generation, or `None` if the backend is unavailable
fn benchmark(backend: Backend, size: usize, iterations: u32) -> anyhow::Result<Option<f64>> {
    let kernel = match backend.kernel(size, size) {
        Ok(kernel) => kernel,
        Err(LifeError::Unsupported(reason)) => {
            log::warn!("{} backend skipped: {}", backend.name(), reason);
            return Ok(None);
        }
        Err(e) => return Err(e).context("building kernel"),
    };
    let seed = SeedPolicy::seeded(0.4, 0xC0FFEE)
        .generate(size, size)
        .with_context(|| format!("seeding {}x{} grid", size, size))?;
    let mut stepper = Stepper::new(seed, kernel);

    // First step pays for the initial upload on the GPU
    stepper.step()?;

    let start = Instant::now();
    for _ in 0..iterations {
        stepper.step()?;
    }
    Ok(Some(start.elapsed().as_secs_f64() * 1000.0 / iterations as f64))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Game of Life Stepping Benchmark ===\n");

    let sizes = [32, 128, 512, 1024, 2048];
    let iterations = 20;

    println!("{:>10} {:>12} {:>12} {:>12}", "Size", "CPU", "CPU+Par", "GPU");
    println!("{:-<50}", "");

    for size in sizes {
        let cells: Vec<String> = Backend::all()
            .into_iter()
            .map(|backend| -> anyhow::Result<String> {
                // Serial stepping on the largest grids takes too long to be useful
                if backend == Backend::Serial && size > 1024 {
                    return Ok(format!("{:>12}", "-"));
                }
                Ok(match benchmark(backend, size, iterations)? {
                    Some(ms) => format!("{:>12.3}", ms),
                    None => format!("{:>12}", "n/a"),
                })
            })
            .collect::<anyhow::Result<_>>()?;

        println!("{:>10} {}", format!("{}x{}", size, size), cells.join(" "));
    }

    println!("\nTimes are ms/generation and include the GPU readback.");
    Ok(())
}
