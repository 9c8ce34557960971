// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to read a measurement set from a `.npz` archive.
//!
//! The archive is expected to contain the named arrays `uvw`, `freqs`, `vis`
//! and `wgt`, and optionally `mask`. This is the layout produced by numpy's
//! `savez` on the usual columns of an interferometric dataset.

mod error;

pub use error::ReadMsError;

use std::{fs::File, path::Path};

use log::debug;
use marlu::c64;
use ndarray::{prelude::*, Zip};
use ndarray_npy::{NpzReader, ReadNpzError, ReadableElement};

/// The arrays of one interferometric observation.
///
/// The arrays are parallel: `uvw` has one row of baseline coordinates per
/// sampled visibility row, and `vis`, `wgt` and `mask` all have shape
/// `(num_rows, num_chans)`.
pub struct MeasurementSet {
    /// Baseline coordinates \[metres\]. One (u, v, w) triple per row.
    pub uvw: Array2<f64>,

    /// The frequency at the centre of each channel \[Hz\].
    pub freqs: Array1<f64>,

    /// One complex visibility per (row, channel).
    pub vis: Array2<c64>,

    /// One real weight per (row, channel).
    pub wgt: Array2<f64>,

    /// Which (row, channel) entries are valid.
    pub mask: Array2<bool>,
}

impl MeasurementSet {
    /// Read a [`MeasurementSet`] out of a `.npz` archive and apply the
    /// validity fix-ups ([`MeasurementSet::flag_invalid`]).
    ///
    /// A missing `mask` array is treated as all-true. A mask stored as bytes
    /// (numpy `uint8`) is accepted alongside one stored as bools.
    pub fn load<P: AsRef<Path>>(file: P) -> Result<MeasurementSet, ReadMsError> {
        // If the file doesn't exist, the zip reader will handle it, but the
        // error message is horrendous.
        let file = file.as_ref();
        if !file.exists() {
            return Err(ReadMsError::FileDoesntExist(file.display().to_string()));
        }
        let mut npz = NpzReader::new(File::open(file)?)?;

        // numpy stores each array as "<name>.npy" inside the archive; accept
        // either form of the name.
        let names = npz.names()?;
        let has = |base: &str| {
            names
                .iter()
                .any(|n| n == base || n.strip_suffix(".npy") == Some(base))
        };
        for required in ["uvw", "freqs", "vis", "wgt"] {
            if !has(required) {
                return Err(ReadMsError::MissingArray(required));
            }
        }

        let uvw: Array2<f64> = by_name(&mut npz, "uvw")?;
        let freqs: Array1<f64> = by_name(&mut npz, "freqs")?;
        let vis: Array2<c64> = by_name(&mut npz, "vis")?;
        let wgt: Array2<f64> = by_name(&mut npz, "wgt")?;
        let mask: Array2<bool> = if has("mask") {
            match by_name::<bool, Ix2>(&mut npz, "mask") {
                Ok(mask) => mask,
                // Not bools; try bytes.
                Err(_) => by_name::<u8, Ix2>(&mut npz, "mask")?.mapv(|v| v != 0),
            }
        } else {
            debug!("No mask in the archive; treating every entry as valid");
            Array2::from_elem(vis.raw_dim(), true)
        };

        if uvw.len_of(Axis(1)) != 3 {
            return Err(ReadMsError::UvwShape {
                cols: uvw.len_of(Axis(1)),
            });
        }
        let expected = (uvw.len_of(Axis(0)), freqs.len());
        check_shape("vis", vis.dim(), expected)?;
        check_shape("wgt", wgt.dim(), expected)?;
        check_shape("mask", mask.dim(), expected)?;

        let mut ms = MeasurementSet {
            uvw,
            freqs,
            vis,
            wgt,
            mask,
        };
        ms.flag_invalid();
        Ok(ms)
    }

    /// The number of sampled visibility rows.
    pub fn num_rows(&self) -> usize {
        self.uvw.len_of(Axis(0))
    }

    /// The number of frequency channels.
    pub fn num_chans(&self) -> usize {
        self.freqs.len()
    }

    /// The number of (row, channel) entries carrying a non-zero weight. Used
    /// for throughput reporting.
    pub fn num_unflagged(&self) -> usize {
        self.wgt.iter().filter(|&&w| w != 0.0).count()
    }

    /// Zero the weight of any exactly-zero visibility, then take any
    /// zero-weight entry out of the mask.
    ///
    /// Datasets in the wild flag dead correlator outputs by writing zero
    /// visibilities, zero weights, or both; after this, the mask alone tells
    /// which entries to use.
    pub fn flag_invalid(&mut self) {
        Zip::from(&mut self.wgt).and(&self.vis).for_each(|w, &v| {
            if v == c64::new(0.0, 0.0) {
                *w = 0.0;
            }
        });
        Zip::from(&mut self.mask).and(&self.wgt).for_each(|m, &w| {
            if w == 0.0 {
                *m = false;
            }
        });
    }
}

/// Get an array out of the archive, with or without the ".npy" suffix on the
/// entry name.
fn by_name<T, D>(npz: &mut NpzReader<File>, base: &str) -> Result<Array<T, D>, ReadNpzError>
where
    T: ReadableElement,
    D: Dimension,
{
    match npz.by_name(base) {
        Ok(array) => Ok(array),
        Err(_) => npz.by_name(&format!("{base}.npy")),
    }
}

fn check_shape(
    name: &'static str,
    got: (usize, usize),
    expected: (usize, usize),
) -> Result<(), ReadMsError> {
    if got == expected {
        Ok(())
    } else {
        Err(ReadMsError::ShapeMismatch {
            name,
            got_rows: got.0,
            got_cols: got.1,
            exp_rows: expected.0,
            exp_cols: expected.1,
        })
    }
}
