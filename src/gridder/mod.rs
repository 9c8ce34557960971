// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The forward and adjoint transforms between visibilities and a dirty
//! image.
//!
//! Both directions take the same parameters. The heavy lifting sits behind
//! [`Backend`]: either the exact direct evaluation in this crate, or the
//! external gridding library (`wgridder` feature), which is invoked as an
//! opaque pair of entry points and may run on a GPU.

mod direct;
mod error;
#[cfg(feature = "wgridder")]
mod ffi;

pub use error::GridderError;

use marlu::c64;
use ndarray::prelude::*;

use crate::{ms::MeasurementSet, resolution::ImageGeometry};

/// Which implementation services the transform calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Exact summation over every unmasked (row, channel, pixel) triple. No
    /// accuracy parameter and no external library; slow but dependable.
    Direct,

    /// The external gridding library. The `gpu` flag is handed through
    /// untouched; the library decides what to do with it. Only available when
    /// the crate is built with the `wgridder` feature.
    Wgridder { gpu: bool },
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Direct => write!(f, "direct"),
            Backend::Wgridder { gpu: false } => write!(f, "wgridder"),
            Backend::Wgridder { gpu: true } => write!(f, "wgridder (gpu)"),
        }
    }
}

/// The knobs shared by both transform directions.
#[derive(Debug, Clone, Copy)]
pub struct GridderParams {
    pub geometry: ImageGeometry,

    /// The accuracy requested from the external library. The direct
    /// evaluation is exact and ignores this.
    pub epsilon: f64,

    /// Apply the wide-field w-term correction.
    pub do_wgridding: bool,

    /// How many threads to transform with. Zero means "let the backend
    /// choose".
    pub nthreads: usize,

    pub backend: Backend,
}

/// Transform visibilities into a dirty image. Weights are applied to the
/// visibilities, and masked-out entries contribute nothing.
pub fn vis_to_dirty(
    ms: &MeasurementSet,
    params: &GridderParams,
) -> Result<Array2<f64>, GridderError> {
    match params.backend {
        Backend::Direct => direct::vis_to_dirty(ms, params),
        Backend::Wgridder { gpu } => external_vis_to_dirty(ms, params, gpu),
    }
}

/// Transform a dirty image into visibilities (the adjoint of
/// [`vis_to_dirty`]). Weights are applied to the output, and masked-out
/// entries are zero.
pub fn dirty_to_vis(
    ms: &MeasurementSet,
    dirty: ArrayView2<f64>,
    params: &GridderParams,
) -> Result<Array2<c64>, GridderError> {
    let (got_x, got_y) = dirty.dim();
    if (got_x, got_y) != (params.geometry.npix_x, params.geometry.npix_y) {
        return Err(GridderError::DirtyImageShape {
            got_x,
            got_y,
            exp_x: params.geometry.npix_x,
            exp_y: params.geometry.npix_y,
        });
    }
    match params.backend {
        Backend::Direct => direct::dirty_to_vis(ms, dirty, params),
        Backend::Wgridder { gpu } => external_dirty_to_vis(ms, dirty, params, gpu),
    }
}

fn external_vis_to_dirty(
    ms: &MeasurementSet,
    params: &GridderParams,
    gpu: bool,
) -> Result<Array2<f64>, GridderError> {
    cfg_if::cfg_if! {
        if #[cfg(feature = "wgridder")] {
            ffi::vis_to_dirty(ms, params, gpu)
        } else {
            let _ = (ms, params, gpu);
            Err(GridderError::LibraryNotCompiled)
        }
    }
}

fn external_dirty_to_vis(
    ms: &MeasurementSet,
    dirty: ArrayView2<f64>,
    params: &GridderParams,
    gpu: bool,
) -> Result<Array2<c64>, GridderError> {
    cfg_if::cfg_if! {
        if #[cfg(feature = "wgridder")] {
            ffi::dirty_to_vis(ms, dirty, params, gpu)
        } else {
            let _ = (ms, dirty, params, gpu);
            Err(GridderError::LibraryNotCompiled)
        }
    }
}
