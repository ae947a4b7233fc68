use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use image::{ColorType, DynamicImage};
use ll_core::{Planar, narrow_u16_to_u8, widen_u8_to_u16};
use ll_filter::{Params, Variant};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "ll_runner")]
#[command(about = "Run the local Laplacian pipeline variants over an image and time them")]
struct Cli {
    /// Input image; 8-bit samples required
    input: PathBuf,
    /// Number of intensity levels (minimum 2)
    levels: usize,
    /// Overall detail amplitude, spread over `levels - 1` intensity steps
    alpha: f32,
    /// Tone-curve slope: < 1 compresses the range, > 1 expands it
    beta: f32,
    /// Output image path; format inferred from the extension
    output: PathBuf,
    /// Timing repetitions per variant
    #[arg(long, default_value_t = 10)]
    iterations: u32,
    /// Write a JSON timing report to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct VariantTiming {
    variant: &'static str,
    avg_ms: f64,
}

#[derive(Debug, Serialize)]
struct Report {
    input: String,
    width: usize,
    height: usize,
    levels: usize,
    alpha: f32,
    beta: f32,
    iterations: u32,
    timings: Vec<VariantTiming>,
}

fn main() -> Result<()> {
    env_logger::init();

    // The original driver exits with code 1 on usage errors; clap's default
    // error exit is 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    if cli.levels < 2 {
        bail!("levels must be at least 2, got {}", cli.levels);
    }
    if cli.iterations == 0 {
        bail!("iterations must be positive");
    }

    println!("reading {} ...", cli.input.display());
    let decoded =
        image::open(&cli.input).with_context(|| format!("opening {}", cli.input.display()))?;
    ensure_8bit_samples(&decoded)?;

    let rgb = decoded.to_rgb8();
    let width = rgb.width() as usize;
    let height = rgb.height() as usize;

    let planar8 = interleaved_to_planar(rgb.as_raw(), width, height)?;
    let input = widen_u8_to_u16(&planar8);
    let mut output = Planar::new_fill(3, width, height, 0u16);

    let params = Params {
        levels: cli.levels,
        alpha: cli.alpha / (cli.levels - 1) as f32,
        beta: cli.beta,
    };

    let mut timings = Vec::with_capacity(Variant::ALL.len());
    for variant in Variant::ALL {
        let avg_ms = time_variant(variant, &input, &params, &mut output, cli.iterations)?;
        println!(
            "{}: {avg_ms:.3} ms average over {} runs",
            variant.name(),
            cli.iterations
        );
        timings.push(VariantTiming {
            variant: variant.name(),
            avg_ms,
        });
    }

    let narrowed = narrow_u16_to_u8(&output);
    let interleaved = planar_to_interleaved(&narrowed);
    let out_img = image::RgbImage::from_raw(width as u32, height as u32, interleaved)
        .context("assembling the output image buffer")?;
    out_img
        .save(&cli.output)
        .with_context(|| format!("saving {}", cli.output.display()))?;
    println!("saved {}", cli.output.display());

    if let Some(report_path) = &cli.report {
        let report = Report {
            input: cli.input.display().to_string(),
            width,
            height,
            levels: cli.levels,
            alpha: cli.alpha,
            beta: cli.beta,
            iterations: cli.iterations,
            timings,
        };
        let file = fs::File::create(report_path)
            .with_context(|| format!("creating {}", report_path.display()))?;
        serde_json::to_writer_pretty(file, &report)
            .with_context(|| format!("writing JSON to {}", report_path.display()))?;
        println!("report written to {}", report_path.display());
    }

    Ok(())
}

/// Times `iterations` invocations of one variant against the same buffers and
/// returns the average wall-clock duration in milliseconds.
fn time_variant(
    variant: Variant,
    input: &Planar<u16>,
    params: &Params,
    output: &mut Planar<u16>,
    iterations: u32,
) -> Result<f64> {
    let t0 = Instant::now();
    for _ in 0..iterations {
        variant
            .run(input, params, output)
            .with_context(|| format!("running the {} variant", variant.name()))?;
    }
    Ok(t0.elapsed().as_secs_f64() * 1e3 / iterations as f64)
}

/// The pipeline mirrors the original driver's 8-bit input contract; wider
/// sample types are rejected rather than silently narrowed.
fn ensure_8bit_samples(img: &DynamicImage) -> Result<()> {
    match img.color() {
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => Ok(()),
        other => bail!("expected 8-bit samples, got {other:?}"),
    }
}

fn interleaved_to_planar(data: &[u8], width: usize, height: usize) -> Result<Planar<u8>> {
    let plane_len = width * height;
    let mut planar = vec![0u8; 3 * plane_len];
    for (i, px) in data.chunks_exact(3).enumerate() {
        planar[i] = px[0];
        planar[plane_len + i] = px[1];
        planar[2 * plane_len + i] = px[2];
    }
    Planar::from_vec(3, width, height, planar).context("building the planar input buffer")
}

fn planar_to_interleaved(img: &Planar<u8>) -> Vec<u8> {
    let plane_len = img.width() * img.height();
    let data = img.data();
    let mut out = vec![0u8; 3 * plane_len];
    for (i, px) in out.chunks_exact_mut(3).enumerate() {
        px[0] = data[i];
        px[1] = data[plane_len + i];
        px[2] = data[2 * plane_len + i];
    }
    out
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use ll_core::Planar;
    use ll_filter::{Params, Variant};

    use super::{Cli, interleaved_to_planar, planar_to_interleaved, time_variant};

    #[test]
    fn fewer_than_five_positional_args_is_a_usage_error() {
        let err = Cli::try_parse_from(["ll_runner", "in.png", "8", "1", "1"]);
        assert!(err.is_err());
    }

    #[test]
    fn full_command_line_parses() {
        let cli = Cli::try_parse_from([
            "ll_runner",
            "in.png",
            "8",
            "1",
            "1",
            "out.png",
            "--iterations",
            "3",
        ])
        .expect("valid command line");

        assert_eq!(cli.levels, 8);
        assert_eq!(cli.iterations, 3);
        assert!(cli.report.is_none());
    }

    #[test]
    fn non_numeric_levels_is_rejected_by_the_parser() {
        let err = Cli::try_parse_from(["ll_runner", "in.png", "x", "1", "1", "out.png"]);
        assert!(err.is_err());
    }

    #[test]
    fn interleaved_planar_round_trip() {
        let rgb: Vec<u8> = vec![
            10, 20, 30, // (0, 0)
            40, 50, 60, // (1, 0)
            70, 80, 90, // (0, 1)
            11, 21, 31, // (1, 1)
        ];
        let planar = interleaved_to_planar(&rgb, 2, 2).expect("valid buffer");

        assert_eq!(planar.channel(0).row(0), &[10, 40]);
        assert_eq!(planar.channel(1).row(1), &[80, 21]);
        assert_eq!(planar_to_interleaved(&planar), rgb);
    }

    #[test]
    fn timed_average_is_positive_and_finite() {
        let input = Planar::new_fill(3, 8, 6, 12000u16);
        let mut output = Planar::new_fill(3, 8, 6, 0u16);
        let params = Params {
            levels: 2,
            alpha: 0.5,
            beta: 1.0,
        };

        let avg_ms = time_variant(Variant::Serial, &input, &params, &mut output, 2)
            .expect("variant should run");
        assert!(avg_ms.is_finite());
        assert!(avg_ms > 0.0);
    }
}
