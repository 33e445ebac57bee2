use std::time::Duration;

use log::{debug, warn};
use tokio::{
    sync::watch,
    time::{MissedTickBehavior, interval},
};

use crate::{
    fix::{PvtFix, fixed_or_na, text_or_na},
    projection,
    render::StatusPanel,
    source::FixSource,
};

pub mod badge;

pub use badge::{FIX_BAD_CLASS, FIX_OK_CLASS, RtkBadge};

/// Cadastre portal the status view links the current projected position
/// into.
const CADASTRE_VIEWER_URL: &str = "https://oss.uredjenazemlja.hr/map";

/// Decimal places for the numeric status metrics.
const METRIC_DECIMALS: usize = 3;

/// The fix-quality monitor: an independent poll loop classifying the
/// receiver's fix type and RTK correction state for the status view.
pub struct Monitor<S: FixSource, P: StatusPanel> {
    source: S,
    panel: P,

    /// Tick period
    period: Duration,

    /// Badge currently shown, kept when a tick carries no decodable code
    badge: Option<RtkBadge>,

    /// Shutdown channel
    shutdown: watch::Receiver<bool>,
}

impl<S: FixSource, P: StatusPanel> Monitor<S, P> {
    /// Builds a new [Monitor].
    pub fn new(source: S, panel: P, period: Duration, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            source,
            panel,
            period,
            badge: None,
            shutdown,
        }
    }

    /// Runs until the shutdown channel fires; the timer re-arms after
    /// every tick whether the fetch succeeded or not.
    pub async fn run(&mut self) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {},
                _ = self.shutdown.changed() => {
                    debug!("status monitor stopped");
                    return;
                },
            }

            self.tick().await;
        }
    }

    async fn tick(&mut self) {
        match self.source.fetch().await {
            Ok(fix) => self.apply(&fix),
            Err(e) => warn!("status fetch failed: {}", e),
        }
    }

    /// Pushes one received document to the presentation layer.
    fn apply(&mut self, fix: &PvtFix) {
        self.panel.set_text("fixType", &text_or_na(fix.fix_type));

        let fix_ok = fix.gnss_fix_ok.unwrap_or(false);
        self.panel.set_class(
            "gnssFixOK",
            if fix_ok { FIX_OK_CLASS } else { FIX_BAD_CLASS },
        );

        if let Some(code) = fix.corr_soln {
            match RtkBadge::from_code(code) {
                Some(badge) => {
                    if self.badge != Some(badge) {
                        debug!("correction state -> {}", badge.label());
                    }

                    self.badge = Some(badge);
                    self.panel.set_text("rtk", badge.label());
                    self.panel.set_class("rtk", badge.css_class());
                }
                // undecodable code: keep whatever badge is showing
                None => warn!("unhandled corrSoln value {}", code),
            }
        }

        self.panel.set_text("latitude", &text_or_na(fix.lat));
        self.panel.set_text("longitude", &text_or_na(fix.lon));

        self.panel
            .set_text("height", &fixed_or_na(fix.height, METRIC_DECIMALS));
        self.panel
            .set_text("hMSL", &fixed_or_na(fix.h_msl, METRIC_DECIMALS));
        self.panel
            .set_text("hAcc", &fixed_or_na(fix.h_acc, METRIC_DECIMALS));
        self.panel
            .set_text("vAcc", &fixed_or_na(fix.v_acc, METRIC_DECIMALS));
        self.panel
            .set_text("sss", &fixed_or_na(fix.usss, METRIC_DECIMALS));
        self.panel
            .set_text("ttff", &fixed_or_na(fix.ttff, METRIC_DECIMALS));

        match fix.position() {
            Ok((lon, lat)) => {
                let local = projection::to_local(lon, lat);

                self.panel
                    .set_text("htrs", &format!("{:.3}, {:.3}", local.x, local.y));
                self.panel.set_link(
                    "katastar_url",
                    &format!(
                        "{}?center={:.3},{:.3}&zoom=22",
                        CADASTRE_VIEWER_URL, local.x, local.y
                    ),
                );
            }
            Err(_) => {
                self.panel.set_text("htrs", "n/a");
                self.panel.set_link("katastar_url", "#");
            }
        }
    }
}
