// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Benchmarks. These run against synthetic measurement sets so that no data files
are needed.
 */

use criterion::*;
use marlu::c64;
use ndarray::prelude::*;

use wgridder_bench::{
    dirty_to_vis, resolution::num_pixels, vis_to_dirty, Backend, GridderParams, ImageGeometry,
    MeasurementSet,
};

/// A deterministic spread of baselines and phases; nothing about the values
/// matters beyond not being uniform.
fn synthetic_ms(num_rows: usize, num_chans: usize) -> MeasurementSet {
    let uvw = Array2::from_shape_fn((num_rows, 3), |(i, j)| {
        200.0 * ((i * 3 + j + 1) as f64).sin() + 20.0 * j as f64
    });
    let freqs = Array1::from_shape_fn(num_chans, |i| 120e6 + 1e6 * i as f64);
    let vis = Array2::from_shape_fn((num_rows, num_chans), |(i, j)| {
        c64::cis(0.37 * i as f64 - 0.11 * j as f64)
    });
    let wgt = Array2::from_shape_fn((num_rows, num_chans), |(i, j)| 1.0 + ((i + j) % 3) as f64);
    let mask = Array2::from_elem((num_rows, num_chans), true);
    MeasurementSet {
        uvw,
        freqs,
        vis,
        wgt,
        mask,
    }
}

fn gridding(c: &mut Criterion) {
    c.bench_function("num_pixels", |b| {
        let ms = synthetic_ms(10_000, 16);
        b.iter(|| {
            num_pixels(ms.uvw.view(), ms.freqs.view(), 2.5, ms.mask.view());
        })
    });

    let ms = synthetic_ms(256, 4);
    let params = GridderParams {
        geometry: ImageGeometry {
            npix_x: 64,
            npix_y: 64,
            pixsize_x: 1e-4,
            pixsize_y: 1e-4,
        },
        epsilon: 1e-4,
        do_wgridding: false,
        nthreads: 4,
        backend: Backend::Direct,
    };

    c.bench_function("vis_to_dirty (direct)", |b| {
        b.iter(|| {
            vis_to_dirty(&ms, &params).unwrap();
        })
    });

    c.bench_function("vis_to_dirty (direct, wgridding)", |b| {
        let params = GridderParams {
            do_wgridding: true,
            ..params
        };
        b.iter(|| {
            vis_to_dirty(&ms, &params).unwrap();
        })
    });

    c.bench_function("dirty_to_vis (direct)", |b| {
        let dirty = vis_to_dirty(&ms, &params).unwrap();
        b.iter(|| {
            dirty_to_vis(&ms, dirty.view(), &params).unwrap();
        })
    });
}

criterion_group!(benches, gridding);
criterion_main!(benches);
