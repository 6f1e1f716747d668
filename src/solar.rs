//! Sub-solar position: the point on Earth directly beneath the sun.
//!
//! The solar right ascension and declination come from
//! `practical-astronomy-rust`; the sub-solar longitude is the right
//! ascension minus Greenwich mean sidereal time, folded into (-180, 180].

use chrono::{DateTime, Datelike, Offset, TimeZone, Timelike, Utc};
use log::debug;
use practical_astronomy_rust::sun as pa_sun;

use crate::error::GeometryError;
use crate::geo::GeoPoint;

/// Sub-solar position for a UTC instant. Pure: every call builds its own
/// ephemeris inputs, so concurrent frame computations never share state.
pub fn subsolar_position(instant: DateTime<Utc>) -> GeoPoint {
    let y = instant.year() as u32;
    let mo = instant.month();
    let d = instant.day();
    let hh = instant.hour() as f64;
    let mm = instant.minute() as f64;
    let ss = instant.second() as f64 + (instant.timestamp_subsec_micros() as f64) / 1.0e6;

    let (ra_h, ra_m, ra_s, dec_d, dec_m, dec_s) =
        pa_sun::precise_position_of_sun(hh, mm, ss, d as f64, mo, y, false, 0);
    let ra = hms_to_deg(ra_h, ra_m, ra_s);
    let dec = dms_to_deg(dec_d, dec_m, dec_s);

    let gmst = gmst_deg(instant.year(), mo, d, instant.hour(), instant.minute(), ss);

    let mut lon = ra - gmst;
    if lon < -180.0 {
        lon += 360.0;
    } else if lon > 180.0 {
        lon -= 360.0;
    }

    debug!(
        "[subsolar_position] {} -> lat {:.4}, lon {:.4}",
        instant, dec, lon
    );
    GeoPoint {
        latitude: dec,
        longitude: lon,
    }
}

/// Checked boundary for zoned timestamps: fails unless the instant is
/// normalized to UTC, then delegates to [`subsolar_position`].
pub fn subsolar_position_at<Tz: TimeZone>(instant: &DateTime<Tz>) -> Result<GeoPoint, GeometryError> {
    let offset_seconds = instant.offset().fix().local_minus_utc();
    if offset_seconds != 0 {
        return Err(GeometryError::InvalidTime { offset_seconds });
    }
    Ok(subsolar_position(instant.with_timezone(&Utc)))
}

fn gmst_deg(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> f64 {
    // Simple GMST (degrees)
    let a = (14 - month as i32) / 12;
    let y = year + 4800 - a;
    let m = month as i32 + 12 * a - 3;
    let jdn = day as i32 + ((153 * m + 2) / 5) + 365 * y + y / 4 - y / 100 + y / 400 - 32045;
    let dayfrac = (hour as f64 + (minute as f64) / 60.0 + second / 3600.0) / 24.0;
    let jd = jdn as f64 + dayfrac;
    let d = jd - 2451545.0;
    let t = d / 36525.0;
    let gmst = 280.46061837 + 360.98564736629 * d + 0.000387933 * t * t - t * t * t / 38710000.0;
    unwind_deg(gmst)
}

fn unwind_deg(mut x: f64) -> f64 {
    x %= 360.0;
    if x < 0.0 {
        x += 360.0;
    }
    x
}

fn hms_to_deg(h: f64, m: f64, s: f64) -> f64 {
    (h + m / 60.0 + s / 3600.0) * 15.0
}

fn dms_to_deg(d: f64, m: f64, s: f64) -> f64 {
    let sign = if d < 0.0 { -1.0 } else { 1.0 };
    sign * (d.abs() + m / 60.0 + s / 3600.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::wrap_longitude;
    use chrono::{Duration, FixedOffset};

    // Reference positions from https://gml.noaa.gov/grad/solcalc/

    #[test]
    fn june_solstice_noon() {
        let t = Utc.with_ymd_and_hms(2023, 6, 21, 12, 0, 45).unwrap();
        let p = subsolar_position(t);
        assert!((p.latitude - 23.44).abs() < 0.2, "lat {}", p.latitude);
        assert!(p.longitude.abs() < 1.0, "lon {}", p.longitude);
    }

    #[test]
    fn september_equinox_afternoon() {
        let t = Utc.with_ymd_and_hms(2025, 9, 22, 18, 19, 0).unwrap();
        let p = subsolar_position(t);
        assert!(p.latitude.abs() < 0.5, "lat {}", p.latitude);
        assert!((p.longitude - -97.0).abs() < 1.0, "lon {}", p.longitude);
    }

    #[test]
    fn near_dateline_instant() {
        let t = Utc.with_ymd_and_hms(2025, 5, 4, 0, 56, 51).unwrap();
        let p = subsolar_position(t);
        assert!((p.latitude - 16.0).abs() < 1.0, "lat {}", p.latitude);
        assert!((p.longitude - 165.0).abs() < 1.0, "lon {}", p.longitude);
    }

    #[test]
    fn longitude_is_normalized() {
        // Sweep a full day in 20-minute steps; longitude must stay canonical.
        let mut t = Utc.with_ymd_and_hms(2021, 7, 2, 0, 0, 0).unwrap();
        for _ in 0..72 {
            let p = subsolar_position(t);
            assert!(p.longitude > -180.0 && p.longitude <= 180.0, "lon {}", p.longitude);
            assert!(p.latitude.abs() <= 23.5, "lat {}", p.latitude);
            t += Duration::minutes(20);
        }
    }

    #[test]
    fn sun_tracks_westward_fifteen_degrees_per_hour() {
        let t = Utc.with_ymd_and_hms(2021, 7, 2, 18, 50, 0).unwrap();
        let before = subsolar_position(t);
        let after = subsolar_position(t + Duration::hours(1));
        let drift = wrap_longitude(after.longitude - before.longitude);
        assert!((drift + 15.0).abs() < 0.1, "drift {}", drift);
    }

    #[test]
    fn zoned_instant_is_rejected() {
        let offset = FixedOffset::west_opt(7 * 3600).unwrap();
        let t = offset.with_ymd_and_hms(2021, 7, 2, 11, 50, 0).unwrap();
        assert!(matches!(
            subsolar_position_at(&t),
            Err(GeometryError::InvalidTime { offset_seconds: -25200 })
        ));
    }

    #[test]
    fn utc_instant_passes_checked_boundary() {
        let t = Utc.with_ymd_and_hms(2021, 7, 2, 18, 50, 0).unwrap();
        let checked = subsolar_position_at(&t).unwrap();
        assert_eq!(checked, subsolar_position(t));
    }
}
