// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Compare the gridding backends on a measurement set.

Build and run with something like:
cargo run --release --bin wgridder-bench -- /data/L_UV_DATA-IF1.npz --fov-deg 1.0
 */

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use ndarray_npy::write_npy;

use wgridder_bench::{
    constants::DEFAULT_EPSILON, dirty_to_vis, l2error, vis_to_dirty, Backend, GridderParams,
    ImageGeometry, MeasurementSet,
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the measurement-set .npz archive.
    ms: PathBuf,

    /// The field of view of the dirty image [degrees].
    #[arg(long)]
    fov_deg: f64,

    /// The accuracy requested from the external gridding library.
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    epsilon: f64,

    /// The number of threads to transform with. 0 lets the backend choose.
    #[arg(long, default_value_t = 8)]
    nthreads: usize,

    /// Apply the wide-field w-term correction.
    #[arg(long)]
    do_wgridding: bool,

    /// Also run the external gridding library and report how well it agrees
    /// with the direct evaluation. Needs the "wgridder" feature.
    #[arg(long)]
    compare: bool,

    /// Ask the external library for a GPU.
    #[arg(long, requires = "compare")]
    gpu: bool,

    /// How many times to repeat the external library's calls when timing
    /// them.
    #[arg(long, default_value_t = 1)]
    ntries: usize,

    /// Write the direct evaluation's dirty image to this .npy file.
    #[arg(long)]
    dirty_out: Option<PathBuf>,

    /// The verbosity of the program. Specify this flag multiple times to
    /// increase the verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbosity: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(match args.verbosity {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    let ms = MeasurementSet::load(&args.ms)?;
    info!(
        "Read {} rows x {} channels from {}",
        ms.num_rows(),
        ms.num_chans(),
        args.ms.display()
    );
    let num_vis = ms.num_unflagged();
    debug!("{num_vis} entries carry a non-zero weight");

    let geometry = ImageGeometry::from_ms(&ms, args.fov_deg);
    info!(
        "Dirty image: {}x{} pixels of {:.3e} rad",
        geometry.npix_x, geometry.npix_y, geometry.pixsize_x
    );

    let direct = GridderParams {
        geometry,
        epsilon: args.epsilon,
        do_wgridding: args.do_wgridding,
        nthreads: args.nthreads,
        backend: Backend::Direct,
    };
    let external = GridderParams {
        backend: Backend::Wgridder { gpu: args.gpu },
        ..direct
    };

    info!("Gridding with the {} backend...", direct.backend);
    let start = Instant::now();
    let dirty = vis_to_dirty(&ms, &direct)?;
    report(start.elapsed(), 1, num_vis, args.nthreads);

    if args.compare {
        info!("Gridding with the {} backend...", external.backend);
        let start = Instant::now();
        let mut result = vis_to_dirty(&ms, &external)?;
        for _ in 1..args.ntries {
            result = vis_to_dirty(&ms, &external)?;
        }
        report(start.elapsed(), args.ntries.max(1), num_vis, args.nthreads);
        info!(
            "vis -> dirty relative error: {:.3e}",
            l2error(result.view(), dirty.view())
        );
    }

    info!("Degridding with the {} backend...", direct.backend);
    let start = Instant::now();
    let vis = dirty_to_vis(&ms, dirty.view(), &direct)?;
    report(start.elapsed(), 1, num_vis, args.nthreads);

    if args.compare {
        info!("Degridding with the {} backend...", external.backend);
        let start = Instant::now();
        let mut result = dirty_to_vis(&ms, dirty.view(), &external)?;
        for _ in 1..args.ntries {
            result = dirty_to_vis(&ms, dirty.view(), &external)?;
        }
        report(start.elapsed(), args.ntries.max(1), num_vis, args.nthreads);
        info!(
            "dirty -> vis relative error: {:.3e}",
            l2error(result.view(), vis.view())
        );
    }

    if let Some(out) = args.dirty_out {
        write_npy(&out, &dirty)?;
        info!("Wrote the dirty image to {}", out.display());
    }

    Ok(())
}

/// Print how long a transform took and its per-thread throughput, matching
/// the numbers the external library's own demos report.
fn report(elapsed: Duration, ntries: usize, num_vis: usize, nthreads: usize) {
    let t = elapsed.as_secs_f64() / ntries as f64;
    info!("{t:.6} s");
    info!(
        "{:.0} visibilities/thread/s",
        num_vis as f64 / nthreads.max(1) as f64 / t
    );
}
