// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The image-plane resolution heuristic.
//!
//! The dirty image must be able to resolve the highest spatial frequency
//! present in the unmasked data. The longest baseline (in wavelengths) sets
//! that frequency, and together with the field of view it fixes a minimum
//! pixel count.

use ndarray::prelude::*;

use crate::{constants::VEL_C, ms::MeasurementSet};

/// The pixel layout of a dirty image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageGeometry {
    pub npix_x: usize,
    pub npix_y: usize,

    /// The angular size of a pixel along x \[radians\].
    pub pixsize_x: f64,

    /// The angular size of a pixel along y \[radians\].
    pub pixsize_y: f64,
}

impl ImageGeometry {
    /// Derive a square image geometry for a measurement set and a field of
    /// view \[degrees\].
    pub fn from_ms(ms: &MeasurementSet, fov_deg: f64) -> ImageGeometry {
        let npix = num_pixels(ms.uvw.view(), ms.freqs.view(), fov_deg, ms.mask.view());
        let pixsize = fov_deg.to_radians() / npix as f64;
        ImageGeometry {
            npix_x: npix,
            npix_y: npix,
            pixsize_x: pixsize,
            pixsize_y: pixsize,
        }
    }
}

/// The number of pixels along one image axis needed to resolve the highest
/// spatial frequency among the unmasked (row, channel) entries.
///
/// Each baseline length is converted to wavelengths per channel; the maximum
/// over the mask, scaled by the field of view, gives a minimum pixel count,
/// which is then rounded up to the nearest even integer.
///
/// Degenerate inputs (an all-false mask, all-zero baselines) aren't guarded
/// and produce the minimum image size rather than an error.
pub fn num_pixels(
    uvw: ArrayView2<f64>,
    freqs: ArrayView1<f64>,
    fov_deg: f64,
    mask: ArrayView2<bool>,
) -> usize {
    let mut max_bl_wavelengths: f64 = 0.0;
    for (uvw, mask) in uvw.outer_iter().zip(mask.outer_iter()) {
        let bl = (uvw[0].powi(2) + uvw[1].powi(2) + uvw[2].powi(2)).sqrt();
        for (&freq, &valid) in freqs.iter().zip(mask.iter()) {
            if valid {
                max_bl_wavelengths = max_bl_wavelengths.max(bl * freq / VEL_C);
            }
        }
    }

    let min_size = (2.0 * fov_deg.to_radians() * max_bl_wavelengths) as usize + 1;
    // Make even.
    min_size + (min_size % 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_row(uvw: [f64; 3], freq: f64) -> (Array2<f64>, Array1<f64>, Array2<bool>) {
        (
            array![[uvw[0], uvw[1], uvw[2]]],
            array![freq],
            array![[true]],
        )
    }

    #[test]
    fn worked_example() {
        // A 1000 m baseline at 1 GHz is ~3.336 kilowavelengths; over a
        // 1-degree field that asks for floor(2 * (pi/180) * 3336) + 1 = 117
        // pixels, made even.
        let (uvw, freqs, mask) = single_row([600.0, 800.0, 0.0], 1e9);
        let npix = num_pixels(uvw.view(), freqs.view(), 1.0, mask.view());
        assert_eq!(npix, 118);
    }

    #[test]
    fn always_positive_and_even() {
        for &bl in &[0.0, 1.0, 35.0, 1000.0, 8.5e4] {
            for &fov_deg in &[0.1, 1.0, 25.0] {
                let (uvw, freqs, mask) = single_row([bl, 0.0, 0.0], 150e6);
                let npix = num_pixels(uvw.view(), freqs.view(), fov_deg, mask.view());
                assert!(npix > 0);
                assert_eq!(npix % 2, 0);
            }
        }
    }

    #[test]
    fn monotonic_in_fov() {
        let (uvw, freqs, mask) = single_row([250.0, -300.0, 12.0], 200e6);
        let mut last = 0;
        for &fov_deg in &[0.5, 1.0, 2.0, 5.0, 12.0, 30.0] {
            let npix = num_pixels(uvw.view(), freqs.view(), fov_deg, mask.view());
            assert!(npix >= last, "npix {npix} shrank against {last}");
            last = npix;
        }
    }

    #[test]
    fn monotonic_in_baseline() {
        let freqs = array![150e6];
        let mask = array![[true]];
        let mut last = 0;
        for &bl in &[10.0, 100.0, 1000.0, 5000.0, 1e5] {
            let uvw = array![[bl, 0.0, 0.0]];
            let npix = num_pixels(uvw.view(), freqs.view(), 2.0, mask.view());
            assert!(npix >= last, "npix {npix} shrank against {last}");
            last = npix;
        }
    }

    #[test]
    fn mask_selects_the_maximum() {
        // Two rows; the long baseline is masked out, so only the short one
        // counts.
        let uvw = array![[100.0, 0.0, 0.0], [100000.0, 0.0, 0.0]];
        let freqs = array![150e6];
        let all = array![[true], [true]];
        let short_only = array![[true], [false]];

        let with_all = num_pixels(uvw.view(), freqs.view(), 1.0, all.view());
        let with_short = num_pixels(uvw.view(), freqs.view(), 1.0, short_only.view());
        assert!(with_short < with_all);

        // An all-false mask degenerates to the minimum image size.
        let none = array![[false], [false]];
        assert_eq!(num_pixels(uvw.view(), freqs.view(), 1.0, none.view()), 2);
    }

    #[test]
    fn geometry_from_ms() {
        let (uvw, freqs, mask) = single_row([600.0, 800.0, 0.0], 1e9);
        let ms = MeasurementSet {
            uvw,
            freqs,
            vis: array![[marlu::c64::new(1.0, 0.0)]],
            wgt: array![[1.0]],
            mask,
        };
        let geom = ImageGeometry::from_ms(&ms, 1.0);
        assert_eq!(geom.npix_x, 118);
        assert_eq!(geom.npix_y, 118);
        let fov_rad = 1.0_f64.to_radians();
        approx::assert_abs_diff_eq!(geom.pixsize_x, fov_rad / 118.0);
        approx::assert_abs_diff_eq!(geom.pixsize_y, geom.pixsize_x);
    }
}
