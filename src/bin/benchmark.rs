//! Serial vs parallel generation step on random boards

use std::time::Instant;

use life_stream::domain::{Grid, rules};
use rand::SeedableRng;
use rand::rngs::StdRng;

type Step = fn(&Grid) -> Grid;

fn benchmark(step: Step, size: usize, iterations: u32) -> f64 {
    let mut rng = StdRng::seed_from_u64(size as u64);
    let mut grid = Grid::random(size, size, 0.25, &mut rng);

    let start = Instant::now();
    for _ in 0..iterations {
        grid = step(&grid);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== Game of Life Generation Benchmark ===\n");

    let sizes = [64, 128, 256, 512, 1000, 2000];
    let iterations = 20;

    println!("{:>10} {:>12} {:>12} {:>10} {:>8}", "Size", "Serial", "Parallel", "Speedup", "Auto");
    println!("{:-<58}", "");

    for size in sizes {
        let serial_ms = benchmark(rules::next_generation, size, iterations);
        let parallel_ms = benchmark(rules::next_generation_parallel, size, iterations);
        let auto = if size * size >= rules::PARALLEL_THRESHOLD {
            "par"
        } else {
            "serial"
        };

        println!(
            "{:>10} {:>12.2} {:>12.2} {:>9.1}x {:>8}",
            format!("{}x{}", size, size),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms,
            auto
        );
    }

    println!("\n=== Throughput at 1000x1000 ===\n");

    let size = 1000;
    let cells = (size * size) as f64;
    let parallel_ms = benchmark(rules::advance, size, iterations);
    let cells_per_sec = cells / (parallel_ms / 1000.0);
    println!("advance: {:.2} ms/gen, {:.1} M cells/sec", parallel_ms, cells_per_sec / 1_000_000.0);
}
