/// Detail remapping function, tabulated with 256 entries per intensity level.
///
/// `remap(i) = alpha * fx * exp(-fx^2 / 2)` with `fx = i / 256`, over the
/// argument domain `[-256 (levels - 1), 256 (levels - 1)]` that the remapped
/// base images index into. `alpha` scales the detail boost: zero disables it,
/// negative values smooth instead of enhance.
#[derive(Debug, Clone)]
pub struct RemapLut {
    values: Vec<f32>,
    zero: usize,
}

impl RemapLut {
    pub fn new(alpha: f32, levels: usize) -> Self {
        debug_assert!(levels >= 2, "remap table needs at least 2 levels");
        let span = 256 * (levels - 1);
        let mut values = Vec::with_capacity(2 * span + 1);
        for i in -(span as i32)..=(span as i32) {
            let fx = i as f32 / 256.0;
            values.push(alpha * fx * (-fx * fx / 2.0).exp());
        }
        Self { values, zero: span }
    }

    /// Looks up the remap value for argument `i` (may be negative).
    #[inline]
    pub fn at(&self, i: i32) -> f32 {
        let idx = i + self.zero as i32;
        debug_assert!(
            (0..self.values.len() as i32).contains(&idx),
            "remap argument out of tabulated domain"
        );
        self.values[idx as usize]
    }

    /// Largest tabulated argument magnitude, `256 * (levels - 1)`.
    pub fn span(&self) -> usize {
        self.zero
    }
}

#[cfg(test)]
mod tests {
    use super::RemapLut;

    #[test]
    fn zero_argument_maps_to_zero() {
        let lut = RemapLut::new(0.7, 4);
        assert_eq!(lut.at(0), 0.0);
    }

    #[test]
    fn table_is_odd_symmetric() {
        let lut = RemapLut::new(1.0, 3);
        for i in [1, 100, 256, 511, 512] {
            assert!((lut.at(i) + lut.at(-i)).abs() < 1e-7);
        }
    }

    #[test]
    fn peak_sits_at_one_intensity_step() {
        // d/dfx of fx * exp(-fx^2/2) vanishes at fx = 1, i.e. argument 256.
        let lut = RemapLut::new(2.0, 2);
        let peak = 2.0 * (-0.5f32).exp();
        assert!((lut.at(256) - peak).abs() < 1e-6);
        assert!(lut.at(255) < lut.at(256));
        assert!(lut.at(256) > lut.at(256 - 32));
    }

    #[test]
    fn span_covers_the_merge_domain() {
        let lut = RemapLut::new(0.5, 8);
        assert_eq!(lut.span(), 256 * 7);
        // Extreme arguments stay finite and tiny.
        assert!(lut.at(256 * 7).abs() < 1e-6);
        assert!(lut.at(-(256 * 7)).abs() < 1e-6);
    }
}
