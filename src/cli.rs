use std::time::Duration;

use clap::{Arg, ArgMatches, ColorChoice, Command};

pub struct Cli {
    /// Arguments passed by user
    matches: ArgMatches,
}

impl Cli {
    /// Build new command line interface
    pub fn new() -> Self {
        Self {
            matches: {
                Command::new("ubxtrack")
                    .version(env!("CARGO_PKG_VERSION"))
                    .about("Live GNSS fix tracking against cadastral parcel boundaries")
                    .color(ColorChoice::Always)
                    .arg_required_else_help(true)
                    .next_help_heading("Receiver endpoint")
                    .arg(
                        Arg::new("url")
                            .short('u')
                            .long("url")
                            .value_name("URL")
                            .required(true)
                            .help("Position resource of the receiver bridge, returning one
NAV-PVT JSON document per GET. Example: http://192.168.4.1/ubx/pos"),
                    )
                    .arg(
                        Arg::new("status-url")
                            .long("status-url")
                            .value_name("URL")
                            .required(false)
                            .help("Resource polled by the fix-quality monitor.
When not defined, the position resource is polled for status too."),
                    )
                    .arg(
                        Arg::new("timeout")
                            .long("timeout")
                            .value_name("MILLISECONDS")
                            .required(false)
                            .help("Request timeout applied to both feeds. A request past the
timeout counts as a failed tick; the loop keeps polling. Default is 2000 ms."),
                    )
                    .next_help_heading("Parcel boundaries")
                    .arg(
                        Arg::new("parcels")
                            .long("parcels")
                            .short('g')
                            .value_name("FILENAME")
                            .required(false)
                            .help("GeoJSON FeatureCollection of parcel polygons, with outer
rings in projected coordinates. Without it the boundary distance stays \"n/a\"."),
                    )
                    .next_help_heading("Polling")
                    .arg(
                        Arg::new("map-period")
                            .long("map-period")
                            .value_name("MILLISECONDS")
                            .required(false)
                            .help("Position poll period. Default is 3000 ms."),
                    )
                    .arg(
                        Arg::new("status-period")
                            .long("status-period")
                            .value_name("MILLISECONDS")
                            .required(false)
                            .help("Status poll period. Default is 2500 ms."),
                    )
                    .get_matches()
            },
        }
    }

    /// Returns the position resource URL
    pub fn url(&self) -> &String {
        self.matches
            .get_one::<String>("url")
            .unwrap_or_else(|| panic!("invalid command line: --url is required"))
    }

    /// Returns the status resource URL; falls back to the position resource
    pub fn status_url(&self) -> &String {
        self.matches
            .get_one::<String>("status-url")
            .unwrap_or_else(|| self.url())
    }

    /// Returns the parcel boundary file, when one was given
    pub fn parcels(&self) -> Option<&String> {
        self.matches.get_one::<String>("parcels")
    }

    /// Returns the position poll period
    pub fn map_period(&self) -> Duration {
        self.period_ms("map-period", 3000)
    }

    /// Returns the status poll period
    pub fn status_period(&self) -> Duration {
        self.period_ms("status-period", 2500)
    }

    /// Returns the request timeout for both feeds
    pub fn timeout(&self) -> Duration {
        self.period_ms("timeout", 2000)
    }

    fn period_ms(&self, id: &str, default_ms: u64) -> Duration {
        if let Some(raw) = self.matches.get_one::<String>(id) {
            let ms = raw
                .trim()
                .parse::<u64>()
                .unwrap_or_else(|e| panic!("invalid --{} value: {}", id, e));

            Duration::from_millis(ms)
        } else {
            Duration::from_millis(default_ms)
        }
    }
}
