// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Benchmarking harness for the forward and adjoint interferometric gridding
transforms.

A measurement set is read from a `.npz` archive, an image-plane resolution is
derived from its visibility geometry, and the two transforms (visibilities →
dirty image and its adjoint) are run on one or more backends so that their
timings and outputs can be compared. The gridding algorithm itself lives in an
external library (available behind the `wgridder` feature); this crate only
carries an exact direct evaluation as a reference backend.
 */

pub mod constants;
pub mod gridder;
pub mod metrics;
pub mod ms;
pub mod resolution;

// Re-exports.
pub use gridder::{dirty_to_vis, vis_to_dirty, Backend, GridderError, GridderParams};
pub use metrics::l2error;
pub use ms::{MeasurementSet, ReadMsError};
pub use resolution::ImageGeometry;
