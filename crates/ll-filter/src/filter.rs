use ll_core::{Image, Planar};
use ll_pyr::{GaussianPyramid, LaplacianPyramid, collapse_laplacian_into, max_levels_for};
use log::debug;

use crate::Error;
use crate::remap::RemapLut;

/// Tuning parameters of the operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    /// Number of discrete intensity levels the luminance range is split into.
    /// Must be at least 2.
    pub levels: usize,
    /// Remap amplitude per intensity step. Drivers that expose a single
    /// overall strength knob divide it by `levels - 1` before filling this in.
    pub alpha: f32,
    /// Tone-curve slope around each intensity level: `< 1` compresses the
    /// global range, `> 1` expands it.
    pub beta: f32,
}

/// Keeps chroma ratios finite on near-black pixels.
const CHROMA_EPS: f32 = 0.01;

const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// Single-threaded local Laplacian enhancement of a planar 16-bit RGB image.
///
/// `output` must be pre-allocated with the input's shape; it is overwritten
/// entirely.
pub fn local_laplacian(
    input: &Planar<u16>,
    params: &Params,
    output: &mut Planar<u16>,
) -> Result<(), Error> {
    validate(input, params, output)?;
    let depth = pyramid_depth(input, params);

    let float = to_float(input);
    let gray = luminance(&float);
    let lut = RemapLut::new(params.alpha, params.levels);

    // One remapped Laplacian pyramid per intensity level. The Gaussian
    // scratch pyramid is reused across the stack.
    let mut base = Image::new_fill(gray.width(), gray.height(), 0.0f32);
    let mut gauss = GaussianPyramid::new();
    let mut stack = Vec::with_capacity(params.levels);
    for k in 0..params.levels {
        remap_base_into(&gray, k, params, &lut, &mut base);
        gauss.build_from_f32(&base.as_view(), depth);
        let mut lap = LaplacianPyramid::new();
        lap.build_from(&gauss);
        stack.push(lap);
    }

    let mut in_gauss = GaussianPyramid::new();
    in_gauss.build_from_f32(&gray.as_view(), depth);

    let bands: Vec<Image<f32>> = in_gauss
        .levels()
        .iter()
        .enumerate()
        .map(|(j, gray_level)| merge_level(gray_level, &stack, j, params.levels))
        .collect();

    let mut collapsed = Image::new_fill(gray.width(), gray.height(), 0.0f32);
    collapse_laplacian_into(&bands, &mut collapsed);

    let plane_len = input.width() * input.height();
    for (c, plane) in output.planes_mut().into_iter().enumerate() {
        let chroma = &float.data()[c * plane_len..(c + 1) * plane_len];
        rescale_chroma_plane(plane, chroma, gray.data(), collapsed.data());
    }

    Ok(())
}

pub(crate) fn validate(
    input: &Planar<u16>,
    params: &Params,
    output: &Planar<u16>,
) -> Result<(), Error> {
    if params.levels < 2 {
        return Err(Error::BadLevels(params.levels));
    }
    if input.channels() != 3 {
        return Err(Error::ChannelMismatch {
            expected: 3,
            actual: input.channels(),
        });
    }
    if output.channels() != 3 {
        return Err(Error::ChannelMismatch {
            expected: 3,
            actual: output.channels(),
        });
    }
    if input.width() == 0 || input.height() == 0 {
        return Err(Error::EmptyImage);
    }
    if output.width() != input.width() || output.height() != input.height() {
        return Err(Error::ShapeMismatch {
            expected: (input.width(), input.height()),
            actual: (output.width(), output.height()),
        });
    }
    Ok(())
}

pub(crate) fn pyramid_depth(input: &Planar<u16>, params: &Params) -> usize {
    let depth = max_levels_for(input.width(), input.height(), params.levels);
    debug!(
        "local laplacian: {}x{}, {} intensity levels, pyramid depth {depth}",
        input.width(),
        input.height(),
        params.levels
    );
    depth
}

/// Converts 16-bit samples to `f32` in `[0, 1]`.
pub(crate) fn to_float(input: &Planar<u16>) -> Planar<f32> {
    let mut out = Planar::new_fill(input.channels(), input.width(), input.height(), 0.0f32);
    for (o, &v) in out.data_mut().iter_mut().zip(input.data()) {
        *o = v as f32 / 65535.0;
    }
    out
}

/// Rec. 601 luminance of a planar float RGB image.
pub(crate) fn luminance(float: &Planar<f32>) -> Image<f32> {
    let plane_len = float.width() * float.height();
    let (r, rest) = float.data().split_at(plane_len);
    let (g, b) = rest.split_at(plane_len);

    let mut out = Image::new_fill(float.width(), float.height(), 0.0f32);
    for (i, o) in out.data_mut().iter_mut().enumerate() {
        *o = LUMA_R * r[i] + LUMA_G * g[i] + LUMA_B * b[i];
    }
    out
}

/// Fills `out` with the remapped base image for intensity level `k`:
/// a tone curve anchored at `level_k` plus the tabulated detail remap.
pub(crate) fn remap_base_into(
    gray: &Image<f32>,
    k: usize,
    params: &Params,
    lut: &RemapLut,
    out: &mut Image<f32>,
) {
    let steps = (params.levels - 1) as f32;
    let level_k = k as f32 / steps;
    let idx_max = lut.span() as i32;
    let bias = 256 * k as i32;

    for (o, &g) in out.data_mut().iter_mut().zip(gray.data()) {
        let idx = ((g * steps * 256.0) as i32).clamp(0, idx_max);
        *o = params.beta * (g - level_k) + level_k + lut.at(idx - bias);
    }
}

/// Assembles one output band by interpolating, per pixel, between the two
/// stack pyramids whose intensity levels bracket the local luminance.
pub(crate) fn merge_level(
    gray_level: &Image<f32>,
    stack: &[LaplacianPyramid],
    j: usize,
    levels: usize,
) -> Image<f32> {
    let mut out = Image::new_fill(gray_level.width(), gray_level.height(), 0.0f32);
    let bands = stack_bands(stack, j);
    for y in 0..gray_level.height() {
        merge_row(gray_level.row(y), &bands, levels, y, out.row_mut(y));
    }
    out
}

pub(crate) fn stack_bands<'a>(stack: &'a [LaplacianPyramid], j: usize) -> Vec<&'a Image<f32>> {
    stack
        .iter()
        .map(|lap| lap.level(j).expect("stack pyramids share one depth"))
        .collect()
}

pub(crate) fn merge_row(
    gray_row: &[f32],
    bands: &[&Image<f32>],
    levels: usize,
    y: usize,
    out_row: &mut [f32],
) {
    let steps = (levels - 1) as f32;
    for (x, out) in out_row.iter_mut().enumerate() {
        let lvl = gray_row[x] * steps;
        let li = (lvl as i32).clamp(0, levels as i32 - 2) as usize;
        let lf = lvl - li as f32;
        let lo = bands[li].row(y)[x];
        let hi = bands[li + 1].row(y)[x];
        *out = (1.0 - lf) * lo + lf * hi;
    }
}

/// Writes one output channel: the collapsed luminance scaled by the channel's
/// chroma ratio, clamped and widened back to 16 bits.
pub(crate) fn rescale_chroma_plane(
    plane: &mut [u16],
    chroma: &[f32],
    gray: &[f32],
    collapsed: &[f32],
) {
    for (((o, &c), &g), &s) in plane
        .iter_mut()
        .zip(chroma)
        .zip(gray)
        .zip(collapsed)
    {
        let v = s * (c + CHROMA_EPS) / (g + CHROMA_EPS);
        *o = (v.clamp(0.0, 1.0) * 65535.0) as u16;
    }
}
