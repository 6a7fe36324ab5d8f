use criterion::{black_box, AxisScale, BenchmarkId, Criterion, PlotConfiguration, SamplingMode};
use mandelsweep::core::configuration::Configuration;
use mandelsweep::engine::Engine;
use mandelsweep::fractal::buffer::IterationBuffer;
use mandelsweep::fractal::kernel::Mandelbrot;
use mandelsweep::fractal::Scene;
use mandelsweep::serial;

use super::rayon_rows::rayon_rows;

pub fn mandelbrot_set(criterion: &mut Criterion) {
    // Sets up criterion.
    let plot_cfg = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    let mut group = criterion.benchmark_group("Mandelbrot set processing time");
    group
        .sampling_mode(SamplingMode::Auto)
        .plot_config(plot_cfg)
        .sample_size(10);

    let scene = Scene::default();
    let engine = Engine::from_configuration(&Configuration::default());
    let mut buffer = IterationBuffer::for_scene(&scene);

    group.bench_function(BenchmarkId::new("serial", 1), |b| {
        b.iter(|| {
            buffer.clear();
            serial::compute_into(&Mandelbrot, &scene, &mut buffer).unwrap();
            black_box(&buffer);
        })
    });

    let max_threads = num_cpus::get().min(engine.max_threads());
    for threads in 1..=max_threads {
        group.bench_function(BenchmarkId::new("engine", threads), |b| {
            b.iter(|| {
                buffer.clear();
                engine
                    .compute_into(&Mandelbrot, threads, &scene, &mut buffer)
                    .unwrap();
                black_box(&buffer);
            })
        });

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap();
        group.bench_function(BenchmarkId::new("rayon", threads), |b| {
            b.iter(|| {
                buffer.clear();
                rayon_rows(&pool, &Mandelbrot, &scene, &mut buffer);
                black_box(&buffer);
            })
        });
    }
    group.finish();
}

criterion::criterion_group!(benches, mandelbrot_set);
