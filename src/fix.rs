use serde::Deserialize;

use crate::error::{Error, Result};

/// One NAV-PVT position/status document, as served by the receiver bridge.
///
/// Every field is optional: before the receiver acquires a solution the
/// document may carry status fields only, or nothing at all. Absent values
/// render as "n/a" downstream, never as zero.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct PvtFix {
    /// Longitude, degrees, WGS84
    pub lon: Option<f64>,

    /// Latitude, degrees, WGS84
    pub lat: Option<f64>,

    /// Receiver fix type code, rendered verbatim
    #[serde(rename = "fixType")]
    pub fix_type: Option<u8>,

    /// Valid-fix flag
    #[serde(rename = "gnssFixOK")]
    pub gnss_fix_ok: Option<bool>,

    /// RTK correction state: 0 none, 1 float, 2 fixed
    #[serde(rename = "corrSoln")]
    pub corr_soln: Option<u8>,

    /// Height above ellipsoid, meters
    pub height: Option<f64>,

    /// Height above mean sea level, meters
    #[serde(rename = "hMSL")]
    pub h_msl: Option<f64>,

    /// Horizontal accuracy estimate, meters
    #[serde(rename = "hAcc")]
    pub h_acc: Option<f64>,

    /// Vertical accuracy estimate, meters
    #[serde(rename = "vAcc")]
    pub v_acc: Option<f64>,

    /// Seconds since startup
    pub usss: Option<f64>,

    /// Time to first fix, seconds
    pub ttff: Option<f64>,
}

impl PvtFix {
    /// Geographic position, when the receiver has one.
    pub fn position(&self) -> Result<(f64, f64)> {
        let lon = self.lon.ok_or(Error::MissingField("lon"))?;
        let lat = self.lat.ok_or(Error::MissingField("lat"))?;
        Ok((lon, lat))
    }
}

/// Renders an optional metric at fixed precision, "n/a" when absent.
pub fn fixed_or_na(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "n/a".to_string(),
    }
}

/// Renders an optional value verbatim, "n/a" when absent.
pub fn text_or_na<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::{fixed_or_na, text_or_na, PvtFix};

    #[test]
    fn deserializes_partial_document() {
        let fix: PvtFix = serde_json::from_str(
            r#"{"fixType": 3, "gnssFixOK": true, "corrSoln": 2, "hAcc": 0.014}"#,
        )
        .unwrap();

        assert_eq!(fix.fix_type, Some(3));
        assert_eq!(fix.gnss_fix_ok, Some(true));
        assert_eq!(fix.corr_soln, Some(2));
        assert_eq!(fix.h_acc, Some(0.014));
        assert!(fix.lon.is_none());
        assert!(fix.position().is_err());
    }

    #[test]
    fn deserializes_full_document() {
        let fix: PvtFix = serde_json::from_str(
            r#"{
                "lon": 16.43, "lat": 45.33,
                "fixType": 3, "gnssFixOK": true, "corrSoln": 1,
                "height": 183.402, "hMSL": 138.927,
                "hAcc": 0.014, "vAcc": 0.01,
                "usss": 1240.0, "ttff": 28.415
            }"#,
        )
        .unwrap();

        assert_eq!(fix.position().unwrap(), (16.43, 45.33));
        assert_eq!(fix.h_msl, Some(138.927));
        assert_eq!(fix.ttff, Some(28.415));
    }

    #[test]
    fn sentinels() {
        assert_eq!(fixed_or_na(Some(1.23456), 3), "1.235");
        assert_eq!(fixed_or_na(None, 3), "n/a");
        assert_eq!(text_or_na(Some(3u8)), "3");
        assert_eq!(text_or_na::<u8>(None), "n/a");
    }
}
