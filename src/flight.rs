//! Flight planning: the great-circle flight path, the camera path that
//! follows it, and per-frame geometry for the animation exporter.

use std::sync::Once;

use chrono::{DateTime, Duration, Utc};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geo::GeoPoint;
use crate::geodesic;
use crate::solar;

static INIT_LOGGER: Once = Once::new();

fn init_logger() {
    INIT_LOGGER.call_once(|| {
        let _ = env_logger::Builder::from_default_env().try_init();
    });
}

/// An airport as the planner needs it: display metadata plus its location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub name: String,
    pub iata: String,
    pub location: GeoPoint,
}

impl Airport {
    pub fn new(
        name: &str,
        iata: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, GeometryError> {
        Ok(Self {
            name: name.to_owned(),
            iata: iata.to_owned(),
            location: GeoPoint::new(latitude, longitude)?,
        })
    }
}

/// Everything the exporter needs to render one animation frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGeometry {
    pub index: usize,
    pub instant: DateTime<Utc>,
    /// Aircraft position along the great-circle route.
    pub aircraft: GeoPoint,
    /// Projection center for this frame.
    pub camera: GeoPoint,
    /// Sub-solar point at this frame's instant.
    pub subsolar: GeoPoint,
}

/// A planned flight sampled once per minute of flight time.
///
/// Paths are computed at construction and never change. Longitudes are
/// dateline-unwrapped when the route straddles the antimeridian; wrap them
/// back with [`crate::geo::wrap_longitude`] only when a projection needs
/// canonical values.
#[derive(Clone, Debug)]
pub struct FlightPlan {
    origin: Airport,
    destination: Airport,
    departure: DateTime<Utc>,
    arrival: DateTime<Utc>,
    frame_count: usize,
    flight_path: Vec<GeoPoint>,
    camera_path: Vec<GeoPoint>,
}

impl FlightPlan {
    pub fn new(
        origin: Airport,
        departure: DateTime<Utc>,
        destination: Airport,
        arrival: DateTime<Utc>,
    ) -> Result<Self, GeometryError> {
        init_logger();
        if arrival <= departure {
            error!(
                "[FlightPlan] arrival {} is not after departure {}",
                arrival, departure
            );
            return Err(GeometryError::InvalidFlightDuration { departure, arrival });
        }
        let duration = arrival - departure;
        let frame_count = (duration.num_seconds() / 60) as usize + 1;

        let mut flight_path =
            geodesic::sample_points(origin.location, destination.location, frame_count);
        dateline_fix(&mut flight_path);

        // The camera shares the flight longitudes but pans linearly in
        // latitude, so the view glides instead of following every wiggle
        // of the great circle. Runs after the dateline fix so the linear
        // interpolation never sees a 360-degree jump.
        let first_lat = flight_path[0].latitude;
        let last_lat = flight_path[frame_count - 1].latitude;
        let lat_step = if frame_count > 1 {
            (last_lat - first_lat) / (frame_count - 1) as f64
        } else {
            0.0
        };
        let camera_path: Vec<GeoPoint> = flight_path
            .iter()
            .enumerate()
            .map(|(i, p)| GeoPoint {
                latitude: first_lat + lat_step * i as f64,
                longitude: p.longitude,
            })
            .collect();

        info!(
            "[FlightPlan] {} -> {}: {} frames over {} minutes",
            origin.iata,
            destination.iata,
            frame_count,
            duration.num_minutes()
        );
        debug!(
            "[FlightPlan] route ({:.4}, {:.4}) -> ({:.4}, {:.4})",
            origin.location.latitude,
            origin.location.longitude,
            destination.location.latitude,
            destination.location.longitude
        );

        Ok(Self {
            origin,
            destination,
            departure,
            arrival,
            frame_count,
            flight_path,
            camera_path,
        })
    }

    pub fn origin(&self) -> &Airport {
        &self.origin
    }

    pub fn destination(&self) -> &Airport {
        &self.destination
    }

    pub fn departure(&self) -> DateTime<Utc> {
        self.departure
    }

    pub fn arrival(&self) -> DateTime<Utc> {
        self.arrival
    }

    /// One sample per minute of flight, both endpoints included.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn flight_path(&self) -> &[GeoPoint] {
        &self.flight_path
    }

    pub fn camera_path(&self) -> &[GeoPoint] {
        &self.camera_path
    }

    /// UTC instant of frame `index` (departure + index minutes).
    pub fn instant(&self, index: usize) -> DateTime<Utc> {
        self.departure + Duration::minutes(index as i64)
    }

    /// Geometry for one frame. `index` must be below
    /// [`frame_count`](Self::frame_count).
    pub fn frame(&self, index: usize) -> FrameGeometry {
        let instant = self.instant(index);
        FrameGeometry {
            index,
            instant,
            aircraft: self.flight_path[index],
            camera: self.camera_path[index],
            subsolar: solar::subsolar_position(instant),
        }
    }

    /// All frames in order, ready for the export loop.
    pub fn frames(&self) -> impl Iterator<Item = FrameGeometry> + '_ {
        (0..self.frame_count).map(move |index| self.frame(index))
    }
}

/// Unwrap a longitude sequence that straddles the antimeridian: when any
/// point lies within 5 degrees of it, every negative longitude shifts by
/// +360 so downstream interpolation and camera centering see a continuous
/// sequence.
pub fn dateline_fix(path: &mut [GeoPoint]) {
    let near_antimeridian = path
        .iter()
        .any(|p| p.longitude < -175.0 || p.longitude > 175.0);
    if !near_antimeridian {
        return;
    }
    for p in path.iter_mut() {
        if p.longitude < 0.0 {
            p.longitude += 360.0;
        }
    }
}
