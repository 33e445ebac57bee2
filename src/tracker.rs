use std::time::Duration;

use log::{debug, warn};
use tokio::{
    sync::watch,
    time::{MissedTickBehavior, interval},
};

use crate::{
    boundary::{BoundaryStore, locate},
    fix::PvtFix,
    overlay::OverlayState,
    projection,
    render::{MapSurface, StatusPanel},
    source::FixSource,
};

/// Zoom level the view is raised to once a fix arrives. The ratchet is
/// one-way: a user zooming further in is never pulled back out.
const TRACKING_ZOOM: f64 = 19.0;

/// Poll-loop phase. A new fetch is only issued from [State::Idle], after
/// the previous tick has fully completed and the timer has re-armed.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
enum State {
    #[default]
    Idle,
    Fetching,
}

/// The position poll loop: fetch, project, locate, update the overlay,
/// push to the render and display surfaces.
pub struct Tracker<S: FixSource, M: MapSurface, P: StatusPanel> {
    source: S,

    /// Parcel boundaries, immutable for the lifetime of the loop
    store: BoundaryStore,

    map: M,
    panel: P,

    /// Overlay geometries, owned here and mutated in place per tick
    overlay: OverlayState,

    /// Tick period
    period: Duration,

    state: State,

    /// Shutdown channel
    shutdown: watch::Receiver<bool>,
}

impl<S: FixSource, M: MapSurface, P: StatusPanel> Tracker<S, M, P> {
    /// Builds a new [Tracker]; the overlay starts empty.
    pub fn new(
        source: S,
        store: BoundaryStore,
        map: M,
        panel: P,
        period: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            source,
            store,
            map,
            panel,
            overlay: OverlayState::new(),
            period,
            state: State::default(),
            shutdown,
        }
    }

    /// Runs until the shutdown channel fires. No tick outcome stops the
    /// loop: fetch failures are logged and the timer re-arms regardless.
    pub async fn run(&mut self) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {},
                _ = self.shutdown.changed() => {
                    debug!("position tracker stopped");
                    return;
                },
            }

            // ticks are never reentrant: the timer only re-arms once the
            // previous completion has run
            debug_assert!(self.state == State::Idle);
            self.tick().await;
        }
    }

    /// One poll cycle: fetch and, on success, apply.
    async fn tick(&mut self) {
        self.state = State::Fetching;

        match self.source.fetch().await {
            Ok(fix) => self.apply(&fix),
            Err(e) => warn!("position fetch failed: {}", e),
        }

        self.state = State::Idle;
    }

    /// Applies one received fix. Without a geographic position the whole
    /// geometry pass is skipped and every display keeps its previous
    /// value.
    fn apply(&mut self, fix: &PvtFix) {
        let (lon, lat) = match fix.position() {
            Ok(position) => position,
            Err(e) => {
                debug!("no position in this fix ({}), keeping last state", e);
                return;
            }
        };

        let local = projection::to_local(lon, lat);

        self.map.set_center(local);
        if self.map.zoom() < TRACKING_ZOOM {
            self.map.set_zoom(TRACKING_ZOOM);
        }
        self.map.set_position(local);

        let closest = locate(local, &self.store);
        if let Some(closest) = &closest {
            debug!(
                "closest parcel {} vertex ({:.3}, {:.3})",
                closest.feature_id, closest.vertex.x, closest.vertex.y
            );
        }

        self.overlay.apply(local, closest.as_ref());
        self.map.request_redraw(&self.overlay);

        let info = format!(
            "{}\n{}\n{:.3}\n{:.3}\n{}",
            lat,
            lon,
            local.x,
            local.y,
            self.overlay.distance_readout()
        );
        self.panel.set_text("info", &info);
    }
}
