// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with the gridding transforms.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridderError {
    #[error("The dirty image has shape {got_x}x{got_y}, but the image geometry specifies {exp_x}x{exp_y}")]
    DirtyImageShape {
        got_x: usize,
        got_y: usize,
        exp_x: usize,
        exp_y: usize,
    },

    /// An error associated with building the rayon thread pool.
    #[error("Couldn't build a thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("wgridder_bench wasn't compiled with the \"wgridder\" feature; the external gridding library isn't available")]
    LibraryNotCompiled,

    #[cfg(feature = "wgridder")]
    #[error("The external gridding library returned error code {0}")]
    External(i32),
}
