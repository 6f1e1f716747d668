//! Geometry engine for day/night-shaded flight animations on a rotating
//! globe.
//!
//! The crate plans a great-circle flight path and a camera path between two
//! airports, computes the sub-solar point for every minute of the flight,
//! and composites day and night equirectangular textures through a smooth
//! twilight band. Rendering, projection and video encoding belong to the
//! consumer; everything here is pure, synchronous computation over
//! immutable inputs, so frames can be produced concurrently.
//!
//! Typical frame loop:
//!
//! ```no_run
//! use chrono::{TimeZone, Utc};
//! use flightglobe::{Airport, DayNightMap, EquirectangularImage, FlightPlan};
//!
//! # fn main() -> Result<(), flightglobe::GeometryError> {
//! let day = EquirectangularImage::open("anc/earth_day.jpg")?;
//! let night = EquirectangularImage::open("anc/earth_night.jpg")?;
//!
//! let plan = FlightPlan::new(
//!     Airport::new("Los Angeles International Airport", "LAX", 33.9425, -118.408)?,
//!     Utc.with_ymd_and_hms(2021, 7, 3, 1, 50, 0).unwrap(),
//!     Airport::new("Denver International Airport", "DEN", 39.8617, -104.6731)?,
//!     Utc.with_ymd_and_hms(2021, 7, 3, 4, 6, 0).unwrap(),
//! )?;
//!
//! for frame in plan.frames() {
//!     let map = DayNightMap::new(frame.subsolar, &day, &night)?;
//!     let texture = map.composite();
//!     // hand texture, frame.camera and frame.aircraft to the renderer
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod flight;
pub mod geo;
pub mod geodesic;
pub mod solar;
pub mod terminator;

pub use error::GeometryError;
pub use flight::{dateline_fix, Airport, FlightPlan, FrameGeometry};
pub use geo::{angular_distance, wrap_longitude, GeoPoint};
pub use solar::{subsolar_position, subsolar_position_at};
pub use terminator::{
    blend, terminator_weight, zenith_angle_grid, DayNightMap, EquirectangularImage, ScalarGrid,
};
