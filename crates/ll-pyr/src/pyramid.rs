use ll_core::{Image, ImageView};
use log::debug;

use crate::downsample::downsample_binomial_f32_into;
use crate::upsample::upsample_lerp_f32_into;

/// Reusable f32 Gaussian pyramid.
///
/// Level 0 is a copy of the input; each next level is a binomial-blurred 2x
/// decimation of the previous one. If a requested level cannot be built
/// because `width < 2` or `height < 2`, building stops early.
#[derive(Debug, Default, Clone)]
pub struct GaussianPyramid {
    levels: Vec<Image<f32>>,
}

impl GaussianPyramid {
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Ensures that internal buffers match the size chain implied by
    /// `(base_w, base_h, num_levels)`: `(w, h), (w/2, h/2), ...`.
    pub fn ensure(&mut self, base_w: usize, base_h: usize, num_levels: usize) {
        if num_levels == 0 {
            self.levels.clear();
            return;
        }

        self.levels.truncate(num_levels);
        self.levels
            .resize_with(num_levels, || Image::new_fill(0, 0, 0.0f32));

        let mut w = base_w;
        let mut h = base_h;
        for level in &mut self.levels {
            if level.width() != w || level.height() != h {
                *level = Image::new_fill(w, h, 0.0f32);
            }
            w /= 2;
            h /= 2;
        }
    }

    pub fn build_from_f32(&mut self, src: &ImageView<'_, f32>, num_levels: usize) {
        let build_levels = max_levels_for(src.width(), src.height(), num_levels);
        if build_levels < num_levels {
            debug!("pyramid depth clamped to {build_levels} of {num_levels} requested levels");
        }
        if build_levels == 0 {
            self.levels.clear();
            return;
        }

        self.ensure(src.width(), src.height(), build_levels);
        copy_f32(src, &mut self.levels[0]);

        for level_idx in 1..build_levels {
            let (prev_levels, curr_and_tail) = self.levels.split_at_mut(level_idx);
            let prev = &prev_levels[level_idx - 1];
            let curr = &mut curr_and_tail[0];
            downsample_binomial_f32_into(&prev.as_view(), curr);
        }
    }

    pub fn level(&self, i: usize) -> Option<&Image<f32>> {
        self.levels.get(i)
    }

    pub fn levels(&self) -> &[Image<f32>] {
        &self.levels
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }
}

/// Reusable f32 Laplacian (band-pass) pyramid.
///
/// `lap[j] = gauss[j] - upsample(gauss[j + 1])`, with the coarsest level kept
/// as-is, so collapsing reconstructs the Gaussian base level exactly.
#[derive(Debug, Default, Clone)]
pub struct LaplacianPyramid {
    levels: Vec<Image<f32>>,
}

impl LaplacianPyramid {
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    pub fn build_from(&mut self, gauss: &GaussianPyramid) {
        let num = gauss.num_levels();
        self.levels.truncate(num);
        self.levels
            .resize_with(num, || Image::new_fill(0, 0, 0.0f32));

        if num == 0 {
            return;
        }

        for j in 0..num {
            let g = gauss.level(j).expect("level index within pyramid depth");
            if self.levels[j].width() != g.width() || self.levels[j].height() != g.height() {
                self.levels[j] = Image::new_fill(g.width(), g.height(), 0.0f32);
            }

            if j + 1 == num {
                self.levels[j].data_mut().copy_from_slice(g.data());
            } else {
                let finer = g;
                let coarser = gauss.level(j + 1).expect("level index within pyramid depth");
                // Upsample in place, then flip it into `finer - upsampled`.
                upsample_lerp_f32_into(&coarser.as_view(), &mut self.levels[j]);
                for (d, &s) in self.levels[j].data_mut().iter_mut().zip(finer.data()) {
                    *d = s - *d;
                }
            }
        }
    }

    pub fn level(&self, i: usize) -> Option<&Image<f32>> {
        self.levels.get(i)
    }

    pub fn levels(&self) -> &[Image<f32>] {
        &self.levels
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn collapse_into(&self, out: &mut Image<f32>) {
        collapse_laplacian_into(&self.levels, out);
    }
}

/// Collapses a Laplacian level chain back into its base image: starting from
/// the coarsest level, repeatedly upsample and add the next band.
///
/// `out` must match the dimensions of `levels[0]`.
pub fn collapse_laplacian_into(levels: &[Image<f32>], out: &mut Image<f32>) {
    let num = levels.len();
    assert!(num > 0, "cannot collapse an empty pyramid");
    debug_assert_eq!(out.width(), levels[0].width());
    debug_assert_eq!(out.height(), levels[0].height());

    let mut acc = levels[num - 1].clone();
    for j in (0..num - 1).rev() {
        let band = &levels[j];
        let mut next = Image::new_fill(band.width(), band.height(), 0.0f32);
        upsample_lerp_f32_into(&acc.as_view(), &mut next);
        for (d, &b) in next.data_mut().iter_mut().zip(band.data()) {
            *d += b;
        }
        acc = next;
    }

    out.data_mut().copy_from_slice(acc.data());
}

/// Number of levels that can actually be built for a `base_w x base_h` image,
/// capped at `requested_levels`. Building stops once a level would drop below
/// 2x2.
pub fn max_levels_for(base_w: usize, base_h: usize, requested_levels: usize) -> usize {
    if requested_levels == 0 || base_w == 0 || base_h == 0 {
        return 0;
    }

    let mut levels = 1usize;
    let mut w = base_w;
    let mut h = base_h;
    while levels < requested_levels && w >= 2 && h >= 2 {
        w /= 2;
        h /= 2;
        levels += 1;
    }
    levels
}

fn copy_f32(src: &ImageView<'_, f32>, dst: &mut Image<f32>) {
    debug_assert_eq!(src.width(), dst.width());
    debug_assert_eq!(src.height(), dst.height());

    let dst_w = dst.width();
    for y in 0..src.height() {
        let src_row = src.row(y);
        dst.data_mut()[y * dst_w..(y + 1) * dst_w].copy_from_slice(src_row);
    }
}
