use ll_core::{Image, ImageView, map_clamp};

/// 2x zoom by linear interpolation, phase-matched to the binomial downsample.
///
/// Even destination samples copy source sample `x / 2`; odd samples blend the
/// two neighbors with weights 3/4 and 1/4. The destination drives the loop:
/// `dst.width() / 2 == src.width()` (and likewise for height), which lets an
/// odd-sized base level reconstruct from its drop-odd half. Edge taps clamp.
pub fn upsample_lerp_f32_into(src: &ImageView<'_, f32>, dst: &mut Image<f32>) {
    debug_assert_eq!(dst.width() / 2, src.width());
    debug_assert_eq!(dst.height() / 2, src.height());

    if dst.width() == 0 || dst.height() == 0 {
        return;
    }

    // Horizontal zoom of every source row.
    let mut hpass = Image::new_fill(dst.width(), src.height(), 0.0f32);
    for y in 0..src.height() {
        let src_row = src.row(y);
        zoom_row(src_row, hpass.row_mut(y));
    }

    // Vertical zoom into the destination.
    let src_h = src.height();
    let dst_w = dst.width();
    for y in 0..dst.height() {
        let lo = hpass.row(map_clamp((y / 2) as isize, src_h));
        let hi = hpass.row(map_clamp(((y + 1) / 2) as isize, src_h));
        let dst_row = dst.row_mut(y);

        if y % 2 == 0 {
            dst_row.copy_from_slice(&lo[..dst_w]);
        } else {
            for x in 0..dst_w {
                dst_row[x] = 0.75 * lo[x] + 0.25 * hi[x];
            }
        }
    }
}

fn zoom_row(src_row: &[f32], dst_row: &mut [f32]) {
    let w = src_row.len();
    for (x, out) in dst_row.iter_mut().enumerate() {
        let lo = src_row[map_clamp((x / 2) as isize, w)];
        if x % 2 == 0 {
            *out = lo;
        } else {
            let hi = src_row[map_clamp(((x + 1) / 2) as isize, w)];
            *out = 0.75 * lo + 0.25 * hi;
        }
    }
}

#[cfg(test)]
mod tests {
    use ll_core::Image;

    use crate::upsample_lerp_f32_into;

    #[test]
    fn constant_image_stays_constant() {
        let src = Image::new_fill(3, 2, 0.625f32);
        let mut dst = Image::new_fill(6, 4, 0.0f32);
        upsample_lerp_f32_into(&src.as_view(), &mut dst);

        for &v in dst.data() {
            assert!((v - 0.625).abs() < 1e-6);
        }
    }

    #[test]
    fn even_samples_copy_odd_samples_blend() {
        let src = Image::from_vec(2, 1, vec![0.0f32, 1.0]).expect("valid image");
        let mut dst = Image::new_fill(4, 2, 0.0f32);
        upsample_lerp_f32_into(&src.as_view(), &mut dst);

        let row = dst.row(0);
        assert!((row[0] - 0.0).abs() < 1e-6);
        assert!((row[1] - 0.25).abs() < 1e-6); // 0.75 * src[0] + 0.25 * src[1]
        assert!((row[2] - 1.0).abs() < 1e-6);
        assert!((row[3] - 1.0).abs() < 1e-6); // hi tap clamps at the border
    }

    #[test]
    fn odd_destination_dimensions_are_filled() {
        let src = Image::from_vec(2, 1, vec![0.2f32, 0.8]).expect("valid image");
        let mut dst = Image::new_fill(5, 3, -1.0f32);
        upsample_lerp_f32_into(&src.as_view(), &mut dst);

        // x = 4 is even: copies clamped source sample 2 -> 1.
        assert!((dst.row(0)[4] - 0.8).abs() < 1e-6);
        // No destination pixel is left untouched.
        for &v in dst.data() {
            assert!(v >= 0.0);
        }
    }
}
