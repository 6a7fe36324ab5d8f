use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::info;
use mandelsweep::benchmark::{self, Sweep};
use mandelsweep::core::configuration::Configuration;
use mandelsweep::engine::Engine;
use mandelsweep::fractal::buffer::IterationBuffer;
use mandelsweep::fractal::kernel::Mandelbrot;
use mandelsweep::fractal::viewport::View;
use mandelsweep::fractal::{Scene, FRACTAL_HEIGHT, FRACTAL_WIDTH, MAX_ITERS};
use mandelsweep::image_writer::write_ppm;
use mandelsweep::verify::verify;

#[derive(Parser)]
#[command(
    name = "mandelsweep",
    about = "Render the Mandelbrot set on many threads and find the fastest thread count"
)]
struct Cli {
    /// Use N threads (the sweep overrides it unless --single is given)
    #[arg(short, long, value_name = "N", default_value_t = 2)]
    threads: usize,
    /// Use the specified view settings (1: whole set, 2: zoomed detail)
    #[arg(short, long, value_name = "INT", default_value_t = 1, allow_negative_numbers = true)]
    view: i64,
    /// Only time --threads instead of sweeping the thread counts
    #[arg(long)]
    single: bool,
    /// First thread count of the sweep
    #[arg(long, value_name = "N", default_value_t = 2)]
    min_threads: usize,
    /// Last thread count of the sweep [default: the configured thread cap]
    #[arg(long, value_name = "N")]
    max_threads: Option<usize>,
    /// Directory the PPM images are written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,
    /// Also write the image of every sweep step as mandelbrot-thread-<N>.ppm
    #[arg(long)]
    save_steps: bool,
}

fn save(buffer: &IterationBuffer, path: &Path, max_iterations: u32) -> anyhow::Result<()> {
    write_ppm(buffer, path, max_iterations).with_context(|| format!("writing {}", path.display()))
}

/// Compare the parallel output against the serial one and pick the exit code.
fn check_output(output_serial: &IterationBuffer, output_thread: &IterationBuffer) -> ExitCode {
    match verify(output_serial, output_thread) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{}", err);
            println!("Error : Output from threads does not match serial output");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &Configuration) -> anyhow::Result<ExitCode> {
    let engine = Engine::from_configuration(config);
    engine.check_threads(cli.threads)?;
    let view = View::from_index(cli.view)?;
    let scene = Scene::new(view.viewport(), FRACTAL_WIDTH, FRACTAL_HEIGHT, MAX_ITERS)?;
    let kernel = Mandelbrot;
    let max_iterations = scene.max_iterations();
    info!("Rendering {:?} view, {}x{}", view, scene.width(), scene.height());

    let mut output_serial = IterationBuffer::for_scene(&scene);
    let mut output_thread = IterationBuffer::for_scene(&scene);

    let serial_time =
        benchmark::serial_baseline(&kernel, &scene, config.trials(), &mut output_serial)?;
    println!("[mandelbrot serial]:\t\t[{:.3}] ms", serial_time.as_secs_f64() * 1000.0);
    save(&output_serial, &cli.output_dir.join("mandelbrot-serial.ppm"), max_iterations)?;

    let threads = if cli.single {
        cli.threads..=cli.threads
    } else {
        cli.min_threads..=cli.max_threads.unwrap_or(engine.max_threads())
    };
    let mut step_error = None;
    let report = Sweep::new(&engine, &kernel, &scene)
        .threads(threads)
        .trials(config.trials())
        .run_with(&mut output_thread, |sample, buffer| {
            println!(
                "[mandelbrot thread]:\t\t[{:.3}] ms\t({} threads)",
                sample.millis(),
                sample.num_threads
            );
            if cli.save_steps && step_error.is_none() {
                let name = format!("mandelbrot-thread-{}.ppm", sample.num_threads);
                if let Err(err) = save(buffer, &cli.output_dir.join(name), max_iterations) {
                    step_error = Some(err);
                }
            }
        })?;
    if let Some(err) = step_error {
        return Err(err);
    }
    save(&output_thread, &cli.output_dir.join("mandelbrot-thread.ppm"), max_iterations)?;

    let code = check_output(&output_serial, &output_thread);
    if code != ExitCode::SUCCESS {
        return Ok(code);
    }

    let optimal = report.optimal;
    println!("[mandelbrot best thread]:\t[{:.3}] ms", optimal.millis());
    println!(
        "\t\t\t\t({:.2}x speedup from {} threads)",
        optimal.speedup(serial_time),
        optimal.num_threads
    );
    println!("Optimal number of threads: {}.", optimal.num_threads);
    if !cli.single {
        println!(
            "Thread counts within {:.0}% of the optimum: {:?}",
            config.tolerance() * 100.0,
            report.near_optimal(config.tolerance())
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Map the outcome of a run to the process exit code, reporting errors.
fn exit_code(result: anyhow::Result<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = Configuration::new_default()
        .map_err(anyhow::Error::from)
        .and_then(|config| run(cli, &config));
    exit_code(result)
}
