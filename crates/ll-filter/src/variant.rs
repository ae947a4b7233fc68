use ll_core::Planar;

use crate::Error;
use crate::filter::{Params, local_laplacian};
use crate::parallel::local_laplacian_parallel;

/// The execution strategies a driver can dispatch by name.
///
/// Both variants compute the same function; they are compared by timing, not
/// by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Single-threaded reference execution.
    Serial,
    /// Rayon data-parallel execution.
    Parallel,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Serial, Variant::Parallel];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Serial => "serial",
            Variant::Parallel => "parallel",
        }
    }

    pub fn run(
        self,
        input: &Planar<u16>,
        params: &Params,
        output: &mut Planar<u16>,
    ) -> Result<(), Error> {
        match self {
            Variant::Serial => local_laplacian(input, params, output),
            Variant::Parallel => local_laplacian_parallel(input, params, output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Variant;

    #[test]
    fn table_names_are_distinct() {
        assert_eq!(Variant::ALL.len(), 2);
        assert_ne!(Variant::ALL[0].name(), Variant::ALL[1].name());
    }

    #[test]
    fn dispatch_runs_the_filter() {
        use ll_core::Planar;

        let input = Planar::new_fill(3, 8, 6, 32768u16);
        let mut output = Planar::new_fill(3, 8, 6, 0u16);
        let params = crate::Params {
            levels: 2,
            alpha: 0.5,
            beta: 1.0,
        };

        for variant in Variant::ALL {
            variant
                .run(&input, &params, &mut output)
                .expect("variant should run");
        }
    }
}
