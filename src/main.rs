use bezier_interp::{points, BezierInterpolator, Mode, SolverSettings};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Clone, Copy, ValueEnum)]
enum SolveMode {
    /// LU decomposition with partial pivoting.
    Lu,
    /// Jacobi iteration.
    Jacobi,
}

#[derive(Parser)]
#[command(author, version, about)]
/// Computes the control points of a free-end cubic Bézier curve through the
/// points of a point file. Each line of the file holds the x and y coordinate
/// of one point; further columns are ignored. A file name given without an
/// extension gets `.pnt` appended.
struct Cli {
    /// Point file to interpolate.
    input: PathBuf,

    /// Write the result to this file instead of stdout.
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// How to solve the linear system.
    #[clap(short, long, value_enum, default_value = "lu")]
    mode: SolveMode,

    /// The maximum number of Jacobi iterations to perform.
    #[clap(long, default_value = "1000")]
    max: usize,

    /// The Jacobi error tolerance.
    #[clap(short, long, default_value = "1e-12")]
    eps: f64,

    /// Write a polyline with this many samples per segment instead of the
    /// control points.
    #[clap(short, long)]
    samples: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Cli::parse();

    let settings = SolverSettings {
        mode: match args.mode {
            SolveMode::Lu => Mode::Lu,
            SolveMode::Jacobi => Mode::Jacobi,
        },
        max: args.max,
        eps: args.eps,
        ..SolverSettings::default()
    };
    if settings.mode == Mode::Jacobi && settings.eps > SolverSettings::default().eps {
        log::warn!(
            "Jacobi tolerance {:e} is looser than the default {:e}",
            settings.eps,
            SolverSettings::default().eps
        );
    }

    let input = points::read_points(&args.input)
        .with_context(|| format!("could not load points from {}", args.input.display()))?;
    log::info!("Read {} points", input.len());

    let curve = BezierInterpolator::interpolate_with(&input, &settings)
        .context("interpolation failed")?;

    let result = match args.samples {
        Some(samples) => curve.generate(samples),
        None => curve.into_control_points(),
    };

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("could not create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            points::write_points(&mut writer, &result)?;
            writer.flush()?;
            log::info!("Wrote {} points to {}", result.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            points::write_points(&mut writer, &result)?;
            log::info!("Wrote {} points", result.len());
        }
    }

    Ok(())
}
