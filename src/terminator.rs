//! Day/night compositing of equirectangular Earth textures.
//!
//! For a given sub-solar point, every texture cell gets a solar zenith
//! angle (great-circle angle to the sub-solar point), the angle maps to a
//! night-side weight with a smooth twilight ramp, and the two textures are
//! blended as a convex combination.

use std::path::Path;

use log::{debug, error, info};

use crate::error::GeometryError;
use crate::geo::{haversine_radians, wrap_longitude, GeoPoint};

/// Grid resolution (longitude x latitude samples) used when no texture
/// dictates a size. Tunable, not a correctness contract.
pub const DEFAULT_GRID_WIDTH: usize = 3600;
pub const DEFAULT_GRID_HEIGHT: usize = 1800;

/// Zenith angle at which daylight ends and the twilight ramp begins.
const DAY_MAX_SZA_DEG: f64 = 90.0;
/// Zenith angle past which the surface is fully dark.
const NIGHT_MIN_SZA_DEG: f64 = 108.0;
const TWILIGHT_WIDTH_DEG: f64 = NIGHT_MIN_SZA_DEG - DAY_MAX_SZA_DEG;

/// An RGB image in equirectangular projection, samples in [0, 1].
///
/// Row 0 is the north pole, column 0 is 180° W; both axes sample their
/// endpoints inclusively, so row `height-1` is the south pole and column
/// `width-1` is 180° E.
#[derive(Clone, Debug, PartialEq)]
pub struct EquirectangularImage {
    width: usize,
    height: usize,
    pixels: Vec<[f32; 3]>,
}

impl EquirectangularImage {
    /// Decode a JPEG/PNG world texture and normalize it to [0, 1] floats.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GeometryError> {
        let decoded = image::open(path.as_ref())?.to_rgb8();
        let (width, height) = decoded.dimensions();
        info!(
            "[EquirectangularImage::open] {} ({}x{})",
            path.as_ref().display(),
            width,
            height
        );
        let pixels = decoded
            .pixels()
            .map(|p| {
                [
                    p.0[0] as f32 / 255.0,
                    p.0[1] as f32 / 255.0,
                    p.0[2] as f32 / 255.0,
                ]
            })
            .collect();
        Ok(Self {
            width: width as usize,
            height: height as usize,
            pixels,
        })
    }

    /// A uniformly colored image, mostly useful as a test texture.
    pub fn filled(width: usize, height: usize, rgb: [f32; 3]) -> Self {
        Self {
            width,
            height,
            pixels: vec![rgb; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[[f32; 3]] {
        &self.pixels
    }

    pub fn pixel(&self, row: usize, col: usize) -> [f32; 3] {
        self.pixels[row * self.width + col]
    }

    /// Nearest-sample lookup by geographic position. Longitudes outside
    /// (-180, 180] are wrapped first, so dateline-unwrapped path points can
    /// be sampled directly.
    pub fn sample_nearest(&self, point: GeoPoint) -> [f32; 3] {
        let lat = point.latitude.clamp(-90.0, 90.0);
        let lon = wrap_longitude(point.longitude);
        let row = ((90.0 - lat) / 180.0 * (self.height - 1) as f64).round() as usize;
        let col = ((lon + 180.0) / 360.0 * (self.width - 1) as f64).round() as usize;
        self.pixel(row, col)
    }
}

/// A single-channel grid with the same orientation as
/// [`EquirectangularImage`]: solar zenith angles or blend weights.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarGrid {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl ScalarGrid {
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            values: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn value(&self, row: usize, col: usize) -> f32 {
        self.values[row * self.width + col]
    }
}

/// Night-side contribution for a solar zenith angle in degrees: 0 on the
/// day side, 1 beyond the far edge of twilight, and a sin² ramp across the
/// 18°-wide band in between.
pub fn terminator_weight(sza_deg: f64) -> f64 {
    if sza_deg <= DAY_MAX_SZA_DEG {
        0.0
    } else if sza_deg > NIGHT_MIN_SZA_DEG {
        1.0
    } else {
        let x = (sza_deg - DAY_MAX_SZA_DEG) / TWILIGHT_WIDTH_DEG;
        (x * std::f64::consts::FRAC_PI_2).sin().powi(2)
    }
}

/// Solar zenith angle in degrees at every cell of a `width` x `height`
/// equirectangular grid, for the given sub-solar point.
pub fn zenith_angle_grid(subsolar: GeoPoint, width: usize, height: usize) -> ScalarGrid {
    let lat0 = subsolar.latitude.to_radians();
    let lon0 = wrap_longitude(subsolar.longitude).to_radians();
    let mut values = Vec::with_capacity(width * height);
    for row in 0..height {
        let lat = latitude_for_row(row, height).to_radians();
        for col in 0..width {
            let lon = longitude_for_column(col, width).to_radians();
            values.push(haversine_radians(lat0, lon0, lat, lon) as f32);
        }
    }
    ScalarGrid {
        width,
        height,
        values,
    }
}

/// `day * (1 - w) + night * w`, per channel. Weights in [0, 1] keep the
/// output in [0, 1] for any valid textures.
pub fn blend(
    day: &EquirectangularImage,
    night: &EquirectangularImage,
    weights: &ScalarGrid,
) -> EquirectangularImage {
    debug_assert_eq!((day.width, day.height), (night.width, night.height));
    debug_assert_eq!((day.width, day.height), (weights.width, weights.height));
    let pixels = day
        .pixels
        .iter()
        .zip(night.pixels.iter())
        .zip(weights.values.iter())
        .map(|((d, n), &w)| {
            [
                d[0] * (1.0 - w) + n[0] * w,
                d[1] * (1.0 - w) + n[1] * w,
                d[2] * (1.0 - w) + n[2] * w,
            ]
        })
        .collect();
    EquirectangularImage {
        width: day.width,
        height: day.height,
        pixels,
    }
}

/// Composites a day and a night texture for one sub-solar point.
///
/// Construction validates the texture pair; [`composite`](Self::composite)
/// is then a pure function of the stored sub-solar position, recomputed
/// per frame and safe to run for many frames concurrently over the same
/// shared textures.
pub struct DayNightMap<'a> {
    subsolar: GeoPoint,
    day: &'a EquirectangularImage,
    night: &'a EquirectangularImage,
}

impl<'a> DayNightMap<'a> {
    pub fn new(
        subsolar: GeoPoint,
        day: &'a EquirectangularImage,
        night: &'a EquirectangularImage,
    ) -> Result<Self, GeometryError> {
        if day.width != night.width || day.height != night.height {
            error!(
                "[DayNightMap] texture size mismatch: day {}x{}, night {}x{}",
                day.width, day.height, night.width, night.height
            );
            return Err(GeometryError::DimensionMismatch {
                day_width: day.width,
                day_height: day.height,
                night_width: night.width,
                night_height: night.height,
            });
        }
        Ok(Self {
            subsolar,
            day,
            night,
        })
    }

    pub fn subsolar(&self) -> GeoPoint {
        self.subsolar
    }

    /// Solar zenith angle at every texture cell, degrees in [0, 180].
    pub fn zenith_angles(&self) -> ScalarGrid {
        zenith_angle_grid(self.subsolar, self.day.width, self.day.height)
    }

    /// Map a zenith-angle grid to night-side blend weights.
    pub fn twilight_weights(sza: &ScalarGrid) -> ScalarGrid {
        ScalarGrid {
            width: sza.width,
            height: sza.height,
            values: sza
                .values
                .iter()
                .map(|&v| terminator_weight(v as f64) as f32)
                .collect(),
        }
    }

    /// The blended map for this sub-solar point.
    pub fn composite(&self) -> EquirectangularImage {
        debug!(
            "[DayNightMap::composite] subsolar ({:.3}, {:.3}), {}x{}",
            self.subsolar.latitude, self.subsolar.longitude, self.day.width, self.day.height
        );
        let sza = self.zenith_angles();
        let weights = Self::twilight_weights(&sza);
        blend(self.day, self.night, &weights)
    }
}

fn latitude_for_row(row: usize, height: usize) -> f64 {
    90.0 - row as f64 * 180.0 / (height - 1).max(1) as f64
}

fn longitude_for_column(col: usize, width: usize) -> f64 {
    -180.0 + col as f64 * 360.0 / (width - 1).max(1) as f64
}
