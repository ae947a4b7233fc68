use ll_core::{Image, Planar};
use ll_pyr::{GaussianPyramid, LaplacianPyramid, collapse_laplacian_into};
use rayon::prelude::*;

use crate::Error;
use crate::filter::{
    Params, luminance, merge_row, pyramid_depth, remap_base_into, rescale_chroma_plane,
    stack_bands, to_float, validate,
};
use crate::remap::RemapLut;

/// Rayon execution of the local Laplacian operator.
///
/// The intensity-level stack is built with one task per level, and the merge
/// and chroma stages run row- and plane-parallel. All pixel arithmetic is
/// shared with [`crate::local_laplacian`], so the output buffer is identical
/// bit for bit; only the wall-clock profile differs.
pub fn local_laplacian_parallel(
    input: &Planar<u16>,
    params: &Params,
    output: &mut Planar<u16>,
) -> Result<(), Error> {
    validate(input, params, output)?;
    let depth = pyramid_depth(input, params);

    let float = to_float(input);
    let gray = luminance(&float);
    let lut = RemapLut::new(params.alpha, params.levels);

    let stack: Vec<LaplacianPyramid> = (0..params.levels)
        .into_par_iter()
        .map(|k| {
            let mut base = Image::new_fill(gray.width(), gray.height(), 0.0f32);
            remap_base_into(&gray, k, params, &lut, &mut base);

            let mut gauss = GaussianPyramid::new();
            gauss.build_from_f32(&base.as_view(), depth);
            let mut lap = LaplacianPyramid::new();
            lap.build_from(&gauss);
            lap
        })
        .collect();

    let mut in_gauss = GaussianPyramid::new();
    in_gauss.build_from_f32(&gray.as_view(), depth);

    let bands: Vec<Image<f32>> = in_gauss
        .levels()
        .iter()
        .enumerate()
        .map(|(j, gray_level)| merge_level_rows(gray_level, &stack, j, params.levels))
        .collect();

    let mut collapsed = Image::new_fill(gray.width(), gray.height(), 0.0f32);
    collapse_laplacian_into(&bands, &mut collapsed);

    let plane_len = input.width() * input.height();
    let float_data = float.data();
    output
        .planes_mut()
        .into_par_iter()
        .enumerate()
        .for_each(|(c, plane)| {
            let chroma = &float_data[c * plane_len..(c + 1) * plane_len];
            rescale_chroma_plane(plane, chroma, gray.data(), collapsed.data());
        });

    Ok(())
}

fn merge_level_rows(
    gray_level: &Image<f32>,
    stack: &[LaplacianPyramid],
    j: usize,
    levels: usize,
) -> Image<f32> {
    let mut out = Image::new_fill(gray_level.width(), gray_level.height(), 0.0f32);
    let bands = stack_bands(stack, j);
    let width = gray_level.width();

    out.data_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, out_row)| {
            merge_row(gray_level.row(y), &bands, levels, y, out_row);
        });
    out
}

#[cfg(test)]
mod tests {
    use ll_core::Planar;

    use super::local_laplacian_parallel;
    use crate::{Params, local_laplacian};

    fn colorful(w: usize, h: usize) -> Planar<u16> {
        let plane_len = w * h;
        let mut data = Vec::with_capacity(3 * plane_len);
        for c in 0..3usize {
            for i in 0..plane_len {
                data.push(((i * (9973 + 101 * c) + 17 * c) % 65536) as u16);
            }
        }
        Planar::from_vec(3, w, h, data).expect("valid planar buffer")
    }

    #[test]
    fn parallel_output_matches_serial_bit_for_bit() {
        let input = colorful(40, 27);
        let params = Params {
            levels: 5,
            alpha: 0.25,
            beta: 1.4,
        };

        let mut serial = Planar::new_fill(3, 40, 27, 0u16);
        let mut parallel = Planar::new_fill(3, 40, 27, 0u16);

        local_laplacian(&input, &params, &mut serial).expect("serial filter should succeed");
        local_laplacian_parallel(&input, &params, &mut parallel)
            .expect("parallel filter should succeed");

        assert_eq!(serial.data(), parallel.data());
    }

    #[test]
    fn parallel_validates_like_serial() {
        let input = colorful(8, 8);
        let mut output = Planar::new_fill(3, 8, 8, 0u16);
        let params = Params {
            levels: 0,
            alpha: 0.1,
            beta: 1.0,
        };

        assert_eq!(
            local_laplacian_parallel(&input, &params, &mut output).unwrap_err(),
            crate::Error::BadLevels(0)
        );
    }
}
