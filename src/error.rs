use chrono::{DateTime, Utc};

/// Everything that can go wrong while building flight geometry or
/// compositing the day/night map. All variants are raised at input
/// boundaries; once a plan or compositor is constructed, the remaining
/// computation is total.
#[derive(thiserror::Error, Debug)]
pub enum GeometryError {
    #[error("instant is offset {offset_seconds} s from UTC; normalize it before use")]
    InvalidTime { offset_seconds: i32 },

    #[error("arrival {arrival} is not after departure {departure}")]
    InvalidFlightDuration {
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    },

    #[error(
        "day texture is {day_width}x{day_height} but night texture is {night_width}x{night_height}"
    )]
    DimensionMismatch {
        day_width: usize,
        day_height: usize,
        night_width: usize,
        night_height: usize,
    },

    #[error("coordinate ({latitude}, {longitude}) is outside the valid range")]
    OutOfRangeCoordinate { latitude: f64, longitude: f64 },

    #[error("texture decode failed: {0}")]
    Texture(#[from] image::ImageError),
}
