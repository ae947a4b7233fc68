use ll_core::{Image, ImageView, map_clamp};

#[inline]
fn dst_dims(src_w: usize, src_h: usize) -> (usize, usize) {
    (src_w / 2, src_h / 2)
}

/// Separable `[1, 3, 3, 1] / 8` binomial blur followed by 2x decimation.
pub fn downsample_binomial_f32(src: &ImageView<'_, f32>) -> Image<f32> {
    let (dst_w, dst_h) = dst_dims(src.width(), src.height());
    let mut dst = Image::new_fill(dst_w, dst_h, 0.0f32);
    downsample_binomial_f32_into(src, &mut dst);
    dst
}

/// In-place variant of [`downsample_binomial_f32`]; `dst` must already have
/// dimensions `(src.width() / 2, src.height() / 2)`.
///
/// For destination pixel `x`, the horizontal pass reads source taps
/// `2x - 1, 2x, 2x + 1, 2x + 2` with weights `1, 3, 3, 1`; the vertical pass
/// does the same over rows. Edge taps clamp to the border.
pub fn downsample_binomial_f32_into(src: &ImageView<'_, f32>, dst: &mut Image<f32>) {
    let dst_w = src.width() / 2;
    let dst_h = src.height() / 2;
    debug_assert_eq!(dst.width(), dst_w);
    debug_assert_eq!(dst.height(), dst_h);

    if dst_w == 0 || dst_h == 0 {
        return;
    }

    // Horizontal pass over every source row; decimated in x only.
    let mut hpass = Image::new_fill(dst_w, src.height(), 0.0f32);
    for y in 0..src.height() {
        let src_row = src.row(y);
        blur_decimate_row(src_row, hpass.row_mut(y));
    }

    // Vertical pass over the decimated columns.
    let src_h = src.height();
    for y in 0..dst_h {
        let sy = 2 * y;
        let r0 = hpass.row(map_clamp(sy as isize - 1, src_h));
        let r1 = hpass.row(sy);
        let r2 = hpass.row(map_clamp(sy as isize + 1, src_h));
        let r3 = hpass.row(map_clamp(sy as isize + 2, src_h));

        let dst_row = dst.row_mut(y);
        for (x, out) in dst_row.iter_mut().enumerate() {
            *out = (r0[x] + 3.0 * (r1[x] + r2[x]) + r3[x]) * 0.125;
        }
    }
}

fn blur_decimate_row(src_row: &[f32], dst_row: &mut [f32]) {
    let w = src_row.len();
    for (x, out) in dst_row.iter_mut().enumerate() {
        let sx = 2 * x;
        let a = src_row[map_clamp(sx as isize - 1, w)];
        let b = src_row[sx];
        let c = src_row[map_clamp(sx as isize + 1, w)];
        let d = src_row[map_clamp(sx as isize + 2, w)];
        *out = (a + 3.0 * (b + c) + d) * 0.125;
    }
}

#[cfg(test)]
mod tests {
    use ll_core::Image;

    use crate::downsample_binomial_f32;

    #[test]
    fn constant_image_stays_constant() {
        let src = Image::new_fill(8, 6, 0.375f32);
        let dst = downsample_binomial_f32(&src.as_view());

        assert_eq!(dst.width(), 4);
        assert_eq!(dst.height(), 3);
        for &v in dst.data() {
            assert!((v - 0.375).abs() < 1e-6);
        }
    }

    #[test]
    fn odd_dimensions_drop_last_row_col() {
        let src = Image::new_fill(5, 3, 1.0f32);
        let dst = downsample_binomial_f32(&src.as_view());
        assert_eq!(dst.width(), 2);
        assert_eq!(dst.height(), 1);
    }

    #[test]
    fn known_values_on_2x2() {
        // Single output pixel: both passes clamp their outer taps, so the
        // result is ((a+3a+3b+b)/8 ...) combined symmetrically.
        let src = Image::from_vec(2, 2, vec![0.0f32, 1.0, 0.0, 1.0]).expect("valid image");
        let dst = downsample_binomial_f32(&src.as_view());

        assert_eq!(dst.width(), 1);
        assert_eq!(dst.height(), 1);
        // Horizontal: (0 + 3*(0 + 1) + 1) / 8 = 0.5 in both rows; vertical of
        // a constant column is that constant.
        assert!((dst.data()[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn interior_pixel_uses_1331_weights() {
        let mut data = vec![0.0f32; 8 * 8];
        data[3 * 8 + 4] = 1.0; // single impulse at (4, 3)
        let src = Image::from_vec(8, 8, data).expect("valid image");

        let dst = downsample_binomial_f32(&src.as_view());
        // Impulse lands on tap `2x` of dst x=2 (weight 3/8) and on tap
        // `2y + 1` of dst y=1 (weight 3/8).
        let got = dst.data()[dst.width() + 2];
        assert!((got - 9.0 / 64.0).abs() < 1e-6);
    }
}
