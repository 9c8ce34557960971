// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The exact direct evaluation of the transform pair.
//!
//! This is not gridding: there is no grid, no convolution kernels and no FFT,
//! just the plain sum that the fast library approximates. It gives the
//! harness a reference output on any machine. The cost scales with
//! rows × channels × pixels, so keep the images small.

use log::debug;
use marlu::c64;
use ndarray::{parallel::prelude::*, prelude::*};

use super::{GridderError, GridderParams};
use crate::{
    constants::{TAU, VEL_C},
    ms::MeasurementSet,
};

/// A masked-in visibility with its baseline coordinates scaled to
/// wavelengths.
struct Sample {
    u: f64,
    v: f64,
    w: f64,
    /// The weighted visibility.
    val: c64,
}

/// A dirty-image pixel with its tangent-plane coordinates.
struct Pixel {
    x: f64,
    y: f64,
    nm1: f64,
    /// The pixel value already divided by `n`.
    val: f64,
}

pub(super) fn vis_to_dirty(
    ms: &MeasurementSet,
    params: &GridderParams,
) -> Result<Array2<f64>, GridderError> {
    let geom = params.geometry;
    // Flatten the unmasked entries once; the pixel loops then don't touch the
    // mask at all.
    let samples = collect_samples(ms);
    debug!(
        "Direct evaluation of {} samples onto {}x{} pixels",
        samples.len(),
        geom.npix_x,
        geom.npix_y
    );

    let mut dirty = Array2::zeros((geom.npix_x, geom.npix_y));
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(params.nthreads)
        .build()?;
    pool.install(|| {
        dirty
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(i, mut dirty_row)| {
                let x = (i as f64 - geom.npix_x as f64 / 2.0) * geom.pixsize_x;
                for (j, out) in dirty_row.iter_mut().enumerate() {
                    let y = (j as f64 - geom.npix_y as f64 / 2.0) * geom.pixsize_y;
                    let nm1 = n_minus_one(x, y, params.do_wgridding);
                    let mut acc = 0.0;
                    for s in &samples {
                        let phase = TAU * (x * s.u + y * s.v - nm1 * s.w);
                        acc += (s.val * c64::cis(phase)).re;
                    }
                    *out = acc / (nm1 + 1.0);
                }
            });
    });
    Ok(dirty)
}

pub(super) fn dirty_to_vis(
    ms: &MeasurementSet,
    dirty: ArrayView2<f64>,
    params: &GridderParams,
) -> Result<Array2<c64>, GridderError> {
    let pixels = collect_pixels(dirty, params);
    debug!(
        "Direct evaluation of {} pixels onto {}x{} visibilities",
        pixels.len(),
        ms.num_rows(),
        ms.num_chans()
    );

    let mut vis = Array2::zeros((ms.num_rows(), ms.num_chans()));
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(params.nthreads)
        .build()?;
    pool.install(|| {
        vis.axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(i_row, mut vis_row)| {
                let uvw = ms.uvw.row(i_row);
                for (i_chan, out) in vis_row.iter_mut().enumerate() {
                    // Masked-out entries stay zero.
                    if !ms.mask[(i_row, i_chan)] {
                        continue;
                    }
                    let scale = ms.freqs[i_chan] / VEL_C;
                    let (u, v, w) = (uvw[0] * scale, uvw[1] * scale, uvw[2] * scale);
                    let mut acc = c64::default();
                    for p in &pixels {
                        let phase = TAU * (p.x * u + p.y * v - p.nm1 * w);
                        acc += p.val * c64::cis(-phase);
                    }
                    *out = acc * ms.wgt[(i_row, i_chan)];
                }
            });
    });
    Ok(vis)
}

fn collect_samples(ms: &MeasurementSet) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(ms.mask.iter().filter(|&&m| m).count());
    for ((uvw, vis), (wgt, mask)) in ms
        .uvw
        .outer_iter()
        .zip(ms.vis.outer_iter())
        .zip(ms.wgt.outer_iter().zip(ms.mask.outer_iter()))
    {
        for (((&freq, &vis), &wgt), &valid) in ms
            .freqs
            .iter()
            .zip(vis.iter())
            .zip(wgt.iter())
            .zip(mask.iter())
        {
            if !valid {
                continue;
            }
            let scale = freq / VEL_C;
            samples.push(Sample {
                u: uvw[0] * scale,
                v: uvw[1] * scale,
                w: uvw[2] * scale,
                val: vis * wgt,
            });
        }
    }
    samples
}

fn collect_pixels(dirty: ArrayView2<f64>, params: &GridderParams) -> Vec<Pixel> {
    let geom = params.geometry;
    let mut pixels = Vec::with_capacity(geom.npix_x * geom.npix_y);
    for (i, dirty_row) in dirty.outer_iter().enumerate() {
        let x = (i as f64 - geom.npix_x as f64 / 2.0) * geom.pixsize_x;
        for (j, &val) in dirty_row.iter().enumerate() {
            let y = (j as f64 - geom.npix_y as f64 / 2.0) * geom.pixsize_y;
            let nm1 = n_minus_one(x, y, params.do_wgridding);
            pixels.push(Pixel {
                x,
                y,
                nm1,
                val: val / (nm1 + 1.0),
            });
        }
    }
    pixels
}

/// `sqrt(1 - x^2 - y^2) - 1`, written so it doesn't cancel near the image
/// centre. Without the w correction the sky is treated as flat, i.e. zero.
fn n_minus_one(x: f64, y: f64, do_wgridding: bool) -> f64 {
    if do_wgridding {
        let r2 = x * x + y * y;
        -r2 / ((1.0 - r2).sqrt() + 1.0)
    } else {
        0.0
    }
}
