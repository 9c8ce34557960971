// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Numerical agreement between backend outputs.

use marlu::c64;
use ndarray::{ArrayView, Dimension, Zip};

/// The relative L2 error between two arrays:
/// `sqrt(sum |a - b|^2 / max(sum |a|^2, sum |b|^2))`.
///
/// Works on real and complex arrays alike. Two zero arrays compare as 0. The
/// shapes must match.
pub fn l2error<A, D>(a: ArrayView<A, D>, b: ArrayView<A, D>) -> f64
where
    A: Copy + Into<c64>,
    D: Dimension,
{
    assert_eq!(a.shape(), b.shape(), "l2error shapes must match");

    let mut diff = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    Zip::from(a).and(b).for_each(|&a, &b| {
        let a: c64 = a.into();
        let b: c64 = b.into();
        diff += (a - b).norm_sqr();
        norm_a += a.norm_sqr();
        norm_b += b.norm_sqr();
    });

    let denom = norm_a.max(norm_b);
    if denom == 0.0 {
        0.0
    } else {
        (diff / denom).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::prelude::*;

    #[test]
    fn identical_arrays() {
        let a = array![[1.0, -2.0], [0.5, 4.0]];
        assert_abs_diff_eq!(l2error(a.view(), a.view()), 0.0);

        let c = array![c64::new(1.0, 1.0), c64::new(-2.0, 0.25)];
        assert_abs_diff_eq!(l2error(c.view(), c.view()), 0.0);
    }

    #[test]
    fn zero_arrays() {
        let a = Array1::<f64>::zeros(8);
        assert_abs_diff_eq!(l2error(a.view(), a.view()), 0.0);
    }

    #[test]
    fn known_displacement() {
        // |a| = 5, |a - b| = 3, and b is the smaller of the two.
        let a = array![3.0, 4.0];
        let b = array![0.0, 4.0];
        assert_abs_diff_eq!(l2error(a.view(), b.view()), 3.0 / 5.0);
        // Swapping the arguments leaves the denominator at the bigger norm.
        assert_abs_diff_eq!(l2error(b.view(), a.view()), 3.0 / 5.0);
    }

    #[test]
    fn complex_displacement() {
        let a = array![c64::new(0.0, 3.0), c64::new(4.0, 0.0)];
        let b = array![c64::new(0.0, 0.0), c64::new(4.0, 0.0)];
        assert_abs_diff_eq!(l2error(a.view(), b.view()), 3.0 / 5.0);
    }
}
