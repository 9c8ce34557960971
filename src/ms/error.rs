// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with reading a measurement set.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadMsError {
    #[error("Specified measurement set '{0}' doesn't exist")]
    FileDoesntExist(String),

    #[error("The archive has no array named '{0}'; is this a measurement set?")]
    MissingArray(&'static str),

    /// Baseline coordinates must be 3-D.
    #[error("Array 'uvw' has {cols} columns, but baseline coordinates need 3")]
    UvwShape { cols: usize },

    #[error("Array '{name}' has shape {got_rows}x{got_cols}, but expected {exp_rows}x{exp_cols}")]
    ShapeMismatch {
        name: &'static str,
        got_rows: usize,
        got_cols: usize,
        exp_rows: usize,
        exp_cols: usize,
    },

    /// An error associated with the ndarray-npy crate.
    #[error("npz error: {0}")]
    Npz(#[from] ndarray_npy::ReadNpzError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
