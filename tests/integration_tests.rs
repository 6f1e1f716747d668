use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::Deserialize;

use flightglobe::{
    subsolar_position, wrap_longitude, Airport, DayNightMap, EquirectangularImage, FlightPlan,
    GeoPoint, GeometryError,
};

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
const BLACK: [f32; 3] = [0.0, 0.0, 0.0];

fn lax() -> Airport {
    Airport::new("Los Angeles International Airport", "LAX", 33.9425, -118.408).unwrap()
}

fn den() -> Airport {
    Airport::new("Denver International Airport", "DEN", 39.8617, -104.6731).unwrap()
}

fn nrt() -> Airport {
    Airport::new("Narita International Airport", "NRT", 35.7647, 140.3864).unwrap()
}

#[derive(Debug, Deserialize)]
struct SubsolarFixture {
    #[serde(rename = "version")]
    _version: u32,
    #[serde(rename = "description")]
    _description: String,
    tolerance_deg: f64,
    points: Vec<ReferencePoint>,
}

#[derive(Debug, Deserialize)]
struct ReferencePoint {
    utc: String,
    latitude: f64,
    longitude: f64,
}

#[test]
fn subsolar_positions_match_reference_fixture() {
    // Golden values checked against the NOAA solar calculator.
    let fixture: SubsolarFixture =
        serde_json::from_str(include_str!("fixtures/subsolar_reference.json"))
            .expect("fixture JSON should parse");

    for point in &fixture.points {
        let instant = DateTime::parse_from_rfc3339(&point.utc)
            .expect("fixture instant should parse")
            .with_timezone(&Utc);
        let actual = subsolar_position(instant);

        let lat_err = (actual.latitude - point.latitude).abs();
        let lon_err = wrap_longitude(actual.longitude - point.longitude).abs();
        assert!(
            lat_err <= fixture.tolerance_deg,
            "{}: latitude {:.3} vs reference {:.3}",
            point.utc,
            actual.latitude,
            point.latitude
        );
        assert!(
            lon_err <= fixture.tolerance_deg,
            "{}: longitude {:.3} vs reference {:.3}",
            point.utc,
            actual.longitude,
            point.longitude
        );
    }
}

#[test]
fn united_2283_reference_flight() {
    // UA2283 LAX -> DEN on 2021-07-02, local times converted to UTC:
    // 6:50 pm PDT departure, 10:06 pm MDT arrival, 2 h 16 min in the air.
    let plan = FlightPlan::new(
        lax(),
        Utc.with_ymd_and_hms(2021, 7, 3, 1, 50, 0).unwrap(),
        den(),
        Utc.with_ymd_and_hms(2021, 7, 3, 4, 6, 0).unwrap(),
    )
    .unwrap();

    assert_eq!(plan.frame_count(), 137);
    assert_eq!(plan.flight_path().len(), 137);
    assert_eq!(plan.camera_path().len(), 137);

    let first = plan.flight_path()[0];
    let last = plan.flight_path()[136];
    assert!((first.latitude - 33.9425).abs() < 1e-9);
    assert!((first.longitude - -118.408).abs() < 1e-9);
    assert!((last.latitude - 39.8617).abs() < 1e-9);
    assert!((last.longitude - -104.6731).abs() < 1e-9);

    // Camera latitudes are a strict arithmetic progression.
    let lats: Vec<f64> = plan.camera_path().iter().map(|p| p.latitude).collect();
    let step = (lats[136] - lats[0]) / 136.0;
    for pair in lats.windows(2) {
        assert!(((pair[1] - pair[0]) - step).abs() < 1e-9);
    }
}

#[test]
fn frame_loop_produces_renderable_maps() {
    let plan = FlightPlan::new(
        lax(),
        Utc.with_ymd_and_hms(2021, 7, 3, 1, 50, 0).unwrap(),
        den(),
        Utc.with_ymd_and_hms(2021, 7, 3, 4, 6, 0).unwrap(),
    )
    .unwrap();

    let day = EquirectangularImage::filled(145, 73, WHITE);
    let night = EquirectangularImage::filled(145, 73, BLACK);

    let frame = plan.frames().next().unwrap();
    assert_eq!(frame.index, 0);
    assert_eq!(frame.instant, plan.departure());

    let map = DayNightMap::new(frame.subsolar, &day, &night).unwrap();
    let blended = map.composite();

    // Directly under the sun the map is pure day; at the antipode pure night.
    assert_eq!(blended.sample_nearest(frame.subsolar), WHITE);
    let antipode = GeoPoint {
        latitude: -frame.subsolar.latitude,
        longitude: wrap_longitude(frame.subsolar.longitude + 180.0),
    };
    assert_eq!(blended.sample_nearest(antipode), BLACK);

    // Convex blend of unit-range textures stays in unit range.
    for pixel in blended.pixels() {
        for channel in pixel {
            assert!((0.0..=1.0).contains(channel));
        }
    }

    // Frames advance one minute at a time through the whole flight.
    let frames: Vec<_> = plan.frames().collect();
    assert_eq!(frames.len(), 137);
    assert_eq!(frames[136].instant, plan.arrival());
    for pair in frames.windows(2) {
        assert_eq!(pair[1].instant - pair[0].instant, Duration::minutes(1));
    }
}

#[test]
fn pacific_route_stays_continuous_for_the_camera() {
    // NRT -> LAX crosses the antimeridian; the exposed longitudes must be
    // unwrapped so a projection centered on the camera never jumps 360.
    let plan = FlightPlan::new(
        nrt(),
        Utc.with_ymd_and_hms(2021, 7, 2, 17, 0, 0).unwrap(),
        lax(),
        Utc.with_ymd_and_hms(2021, 7, 3, 2, 55, 0).unwrap(),
    )
    .unwrap();

    for path in [plan.flight_path(), plan.camera_path()] {
        for pair in path.windows(2) {
            let jump = (pair[1].longitude - pair[0].longitude).abs();
            assert!(jump < 5.0, "longitude discontinuity of {} degrees", jump);
        }
    }

    // Unwrapped longitudes wrap back to canonical values at render time.
    let unwrapped = plan
        .flight_path()
        .iter()
        .find(|p| p.longitude > 180.0)
        .expect("route should carry unwrapped longitudes");
    let canonical = wrap_longitude(unwrapped.longitude);
    assert!(canonical > -180.0 && canonical <= 180.0);
}

#[test]
fn degenerate_schedules_fail_fast() {
    let t = Utc.with_ymd_and_hms(2021, 7, 3, 1, 50, 0).unwrap();
    let same = FlightPlan::new(lax(), t, den(), t);
    assert!(matches!(
        same,
        Err(GeometryError::InvalidFlightDuration { .. })
    ));

    let inverted = FlightPlan::new(lax(), t, den(), t - Duration::minutes(90));
    assert!(matches!(
        inverted,
        Err(GeometryError::InvalidFlightDuration { .. })
    ));
}
