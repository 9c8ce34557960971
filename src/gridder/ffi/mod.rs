// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Bindings to the external gridding library.
//!
//! build.rs links the library when the `wgridder` feature is enabled; point
//! `WGRIDDER_LIB` at its location if it isn't on the default search path.
//! Both entry points run on the CPU unless asked for a GPU, and both return 0
//! on success. Everything about kernel selection, W-stacking and device
//! dispatch happens on the other side of this boundary.

use marlu::c64;
use ndarray::prelude::*;

use super::{GridderError, GridderParams};
use crate::ms::MeasurementSet;

extern "C" {
    fn wgridder_vis2dirty(
        uvw: *const f64,
        nrows: usize,
        freqs: *const f64,
        nchans: usize,
        vis: *const c64,
        wgt: *const f64,
        mask: *const u8,
        npix_x: usize,
        npix_y: usize,
        pixsize_x: f64,
        pixsize_y: f64,
        epsilon: f64,
        do_wgridding: i32,
        nthreads: usize,
        verbosity: i32,
        gpu: i32,
        dirty: *mut f64,
    ) -> i32;

    fn wgridder_dirty2vis(
        uvw: *const f64,
        nrows: usize,
        freqs: *const f64,
        nchans: usize,
        dirty: *const f64,
        wgt: *const f64,
        mask: *const u8,
        npix_x: usize,
        npix_y: usize,
        pixsize_x: f64,
        pixsize_y: f64,
        epsilon: f64,
        do_wgridding: i32,
        nthreads: usize,
        verbosity: i32,
        gpu: i32,
        vis: *mut c64,
    ) -> i32;
}

pub(super) fn vis_to_dirty(
    ms: &MeasurementSet,
    params: &GridderParams,
    gpu: bool,
) -> Result<Array2<f64>, GridderError> {
    let geom = params.geometry;
    let uvw = ms.uvw.as_standard_layout();
    let freqs = ms.freqs.as_standard_layout();
    let vis = ms.vis.as_standard_layout();
    let wgt = ms.wgt.as_standard_layout();
    let mask = byte_mask(&ms.mask);
    let mut dirty = Array2::zeros((geom.npix_x, geom.npix_y));

    let status = unsafe {
        wgridder_vis2dirty(
            uvw.as_ptr(),
            ms.num_rows(),
            freqs.as_ptr(),
            ms.num_chans(),
            vis.as_ptr(),
            wgt.as_ptr(),
            mask.as_ptr(),
            geom.npix_x,
            geom.npix_y,
            geom.pixsize_x,
            geom.pixsize_y,
            params.epsilon,
            params.do_wgridding.into(),
            params.nthreads,
            verbosity(),
            gpu.into(),
            dirty.as_mut_ptr(),
        )
    };
    if status != 0 {
        return Err(GridderError::External(status));
    }
    Ok(dirty)
}

pub(super) fn dirty_to_vis(
    ms: &MeasurementSet,
    dirty: ArrayView2<f64>,
    params: &GridderParams,
    gpu: bool,
) -> Result<Array2<c64>, GridderError> {
    let geom = params.geometry;
    let uvw = ms.uvw.as_standard_layout();
    let freqs = ms.freqs.as_standard_layout();
    let dirty = dirty.as_standard_layout();
    let wgt = ms.wgt.as_standard_layout();
    let mask = byte_mask(&ms.mask);
    let mut vis = Array2::zeros((ms.num_rows(), ms.num_chans()));

    let status = unsafe {
        wgridder_dirty2vis(
            uvw.as_ptr(),
            ms.num_rows(),
            freqs.as_ptr(),
            ms.num_chans(),
            dirty.as_ptr(),
            wgt.as_ptr(),
            mask.as_ptr(),
            geom.npix_x,
            geom.npix_y,
            geom.pixsize_x,
            geom.pixsize_y,
            params.epsilon,
            params.do_wgridding.into(),
            params.nthreads,
            verbosity(),
            gpu.into(),
            vis.as_mut_ptr(),
        )
    };
    if status != 0 {
        return Err(GridderError::External(status));
    }
    Ok(vis)
}

fn byte_mask(mask: &Array2<bool>) -> Array2<u8> {
    mask.map(|&m| u8::from(m))
}

/// The library prints its own progress information; only ask for it when our
/// logging is at least at the debug level.
fn verbosity() -> i32 {
    i32::from(log::log_enabled!(log::Level::Debug))
}
