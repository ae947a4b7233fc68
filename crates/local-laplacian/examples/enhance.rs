//! Example: enhance local contrast in a photo.
//!
//! Loads an 8-bit image, runs the rayon variant of the local Laplacian filter
//! once, prints the elapsed time, and writes the result next to the input.
//!
//! Run from the workspace root:
//!   cargo run -p local-laplacian --example enhance -- --help
//!   cargo run -p local-laplacian --example enhance -- --input photo.png

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use local_laplacian::{Params, Planar, local_laplacian_parallel, narrow_u16_to_u8, widen_u8_to_u16};

#[derive(Parser, Debug)]
#[command(about = "Enhance local contrast with the local Laplacian filter")]
struct Args {
    /// Path to the input image (8-bit samples)
    #[arg(long, default_value = "data/flower.png")]
    input: String,

    /// Number of intensity levels
    #[arg(long, default_value_t = 8)]
    levels: usize,

    /// Overall detail amplitude
    #[arg(long, default_value_t = 1.0)]
    alpha: f32,

    /// Tone-curve slope
    #[arg(long, default_value_t = 1.0)]
    beta: f32,

    /// Output path (default: <input stem>_enhanced.png next to input)
    #[arg(long)]
    out: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let out_path = args.out.unwrap_or_else(|| {
        let p = std::path::Path::new(&args.input);
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        let dir = p.parent().unwrap_or(std::path::Path::new("."));
        dir.join(format!("{stem}_enhanced.png"))
            .to_string_lossy()
            .into_owned()
    });

    let rgb = image::open(&args.input)
        .with_context(|| format!("opening {}", args.input))?
        .to_rgb8();
    let width = rgb.width() as usize;
    let height = rgb.height() as usize;
    println!("loaded {}: {width}x{height}", args.input);

    // Interleaved RGB -> channel-major planes, widened to 16 bits.
    let plane_len = width * height;
    let mut planar = vec![0u8; 3 * plane_len];
    for (i, px) in rgb.as_raw().chunks_exact(3).enumerate() {
        planar[i] = px[0];
        planar[plane_len + i] = px[1];
        planar[2 * plane_len + i] = px[2];
    }
    let input = widen_u8_to_u16(
        &Planar::from_vec(3, width, height, planar).context("building planar buffer")?,
    );
    let mut output = Planar::new_fill(3, width, height, 0u16);

    let params = Params {
        levels: args.levels,
        alpha: args.alpha / (args.levels.max(2) - 1) as f32,
        beta: args.beta,
    };

    let t0 = Instant::now();
    local_laplacian_parallel(&input, &params, &mut output).context("running the filter")?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;
    println!(
        "filtered with levels={}, alpha={:.3}, beta={:.3}  ({elapsed_ms:.2} ms)",
        args.levels, args.alpha, args.beta
    );

    // Planes back to interleaved 8-bit for encoding.
    let narrowed = narrow_u16_to_u8(&output);
    let mut interleaved = vec![0u8; 3 * plane_len];
    for (i, px) in interleaved.chunks_exact_mut(3).enumerate() {
        px[0] = narrowed.data()[i];
        px[1] = narrowed.data()[plane_len + i];
        px[2] = narrowed.data()[2 * plane_len + i];
    }
    let out_img = image::RgbImage::from_raw(width as u32, height as u32, interleaved)
        .context("assembling output image")?;
    out_img
        .save(&out_path)
        .with_context(|| format!("saving {out_path}"))?;

    println!("result written to {out_path}");
    Ok(())
}
