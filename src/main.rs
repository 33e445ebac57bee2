#![doc = include_str!("../README.md")]

/*
 * UBXTRACK continuously tracks a GNSS receiver's fix against cadastral
 * parcel boundaries in a local Transverse Mercator system.
 * This program is shipped under the Mozilla Public V2 license.
 */

use env_logger::{Builder, Target};
use log::{info, warn};

use tokio::{signal, sync::watch};

mod boundary;
mod cli;
mod error;
mod fix;
mod overlay;
mod projection;
mod render;
mod source;
mod status;
mod tracker;

use crate::{
    boundary::BoundaryStore,
    cli::Cli,
    render::{ConsoleMap, ConsolePanel},
    source::HttpFixSource,
    status::Monitor,
    tracker::Tracker,
};

/// Startup zoom of the map view, before the first fix ratchets it in.
const INITIAL_ZOOM: f64 = 9.0;

#[tokio::main(flavor = "current_thread")]
pub async fn main() {
    let mut builder = Builder::from_default_env();

    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    // cli
    let cli = Cli::new();

    // parcel boundaries
    let store = match cli.parcels() {
        Some(path) => BoundaryStore::from_geojson_file(path)
            .unwrap_or_else(|e| panic!("Failed to load parcel boundaries \"{}\": {}", path, e)),
        None => BoundaryStore::empty(),
    };

    if store.is_empty() {
        warn!("no parcel boundaries loaded - distance readout will stay n/a");
    }

    // fix sources; one timeout policy for both feeds
    let timeout = cli.timeout();

    let position_source = HttpFixSource::new(cli.url(), timeout)
        .unwrap_or_else(|e| panic!("Failed to set up position source: {}", e));

    let status_source = HttpFixSource::new(cli.status_url(), timeout)
        .unwrap_or_else(|e| panic!("Failed to set up status source: {}", e));

    info!("polling {}", position_source.url());

    // shutdown channel
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        signal::ctrl_c()
            .await
            .unwrap_or_else(|e| panic!("Tokio signal handling error: {}", e));

        let _ = shutdown_tx.send(true);
    });

    let mut tracker = Tracker::new(
        position_source,
        store,
        ConsoleMap::new(INITIAL_ZOOM),
        ConsolePanel::new(),
        cli.map_period(),
        shutdown_rx.clone(),
    );

    let mut monitor = Monitor::new(
        status_source,
        ConsolePanel::new(),
        cli.status_period(),
        shutdown_rx,
    );

    info!("application deployed");

    // both periodic loops share the single-threaded executor and only
    // suspend while fetching; Ctrl-C stops them through the channel
    tokio::join!(tracker.run(), monitor.run());

    info!("shutdown complete");
}
