use crate::Planar;

/// Widens 8-bit samples to the full 16-bit range.
///
/// `v * 257` spreads `[0, 255]` evenly over `[0, 65535]` (255 * 257 == 65535)
/// and is exactly inverted by [`narrow_u16_to_u8`].
pub fn widen_u8_to_u16(src: &Planar<u8>) -> Planar<u16> {
    let data = src.data().iter().map(|&v| v as u16 * 257).collect();
    Planar::from_vec(src.channels(), src.width(), src.height(), data)
        .expect("widening preserves the buffer shape")
}

/// Narrows 16-bit samples back to 8 bits by integer division by 257.
pub fn narrow_u16_to_u8(src: &Planar<u16>) -> Planar<u8> {
    let data = src.data().iter().map(|&v| (v / 257) as u8).collect();
    Planar::from_vec(src.channels(), src.width(), src.height(), data)
        .expect("narrowing preserves the buffer shape")
}

#[cfg(test)]
mod tests {
    use super::{narrow_u16_to_u8, widen_u8_to_u16};
    use crate::Planar;

    #[test]
    fn widen_endpoints() {
        let src = Planar::from_vec(1, 2, 1, vec![0u8, 255]).expect("valid planar buffer");
        let wide = widen_u8_to_u16(&src);
        assert_eq!(wide.data(), &[0u16, 65535]);
    }

    #[test]
    fn widen_narrow_round_trips_every_value() {
        let values: Vec<u8> = (0..=255).collect();
        let src = Planar::from_vec(1, 256, 1, values.clone()).expect("valid planar buffer");

        let back = narrow_u16_to_u8(&widen_u8_to_u16(&src));
        assert_eq!(back.data(), values.as_slice());
    }

    #[test]
    fn narrow_truncates_between_steps() {
        // 257 * v + r for r in [0, 256] still narrows to v.
        let src = Planar::from_vec(1, 3, 1, vec![257u16 * 7, 257 * 7 + 128, 257 * 7 + 256])
            .expect("valid planar buffer");
        let out = narrow_u16_to_u8(&src);
        assert_eq!(out.data(), &[7u8, 7, 7]);
    }
}
