//! Great-circle paths on the WGS-84 ellipsoid.
//!
//! Vincenty's inverse and direct formulae, used to sample a flight route at
//! equal arc-length steps between two airports.

use crate::geo::{wrap_longitude, GeoPoint};

const EARTH_RADIUS_KM: f64 = 6378.137; // WGS-84 equatorial
const EARTH_FLATTENING: f64 = 1.0 / 298.257_223_563; // WGS-84

const CONVERGENCE_RAD: f64 = 1e-12;
const MAX_ITERATIONS: usize = 200;

/// Geodesic distance in km and initial azimuth in radians from `from` to
/// `to`. Coincident points yield (0, 0). Near-antipodal pairs may not
/// converge; the last iterate is used, which keeps a whole-route
/// interpolation total.
pub fn inverse(from: GeoPoint, to: GeoPoint) -> (f64, f64) {
    let a = EARTH_RADIUS_KM;
    let f = EARTH_FLATTENING;
    let b = a * (1.0 - f);

    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let l = (to.longitude - from.longitude).to_radians();

    let u1 = ((1.0 - f) * phi1.tan()).atan();
    let u2 = ((1.0 - f) * phi2.tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut sin_sigma = 0.0;
    let mut cos_sigma = 1.0;
    let mut sigma = 0.0;
    let mut sin_alpha = 0.0;
    let mut cos_sq_alpha = 1.0;
    let mut cos_2sigma_m = 0.0;

    for _ in 0..MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            return (0.0, 0.0); // coincident points
        }
        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);
        sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0 // equatorial geodesic
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let lambda_next = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m
                            + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));
        let done = (lambda_next - lambda).abs() < CONVERGENCE_RAD;
        lambda = lambda_next;
        if done {
            break;
        }
    }

    let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
    let big_a =
        1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let delta_sigma = big_b
        * sin_sigma
        * (cos_2sigma_m
            + big_b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                    - big_b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));
    let distance = b * big_a * (sigma - delta_sigma);
    let azimuth = (cos_u2 * lambda.sin()).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * lambda.cos());
    (distance, azimuth)
}

/// Destination after travelling `distance_km` along the geodesic that
/// leaves `from` with the given initial azimuth (radians).
pub fn direct(from: GeoPoint, azimuth_rad: f64, distance_km: f64) -> GeoPoint {
    let a = EARTH_RADIUS_KM;
    let f = EARTH_FLATTENING;
    let b = a * (1.0 - f);

    let phi1 = from.latitude.to_radians();
    let (sin_alpha1, cos_alpha1) = azimuth_rad.sin_cos();

    let tan_u1 = (1.0 - f) * phi1.tan();
    let u1 = tan_u1.atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let sigma1 = tan_u1.atan2(cos_alpha1);
    let sin_alpha = cos_u1 * sin_alpha1;
    let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
    let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
    let big_a =
        1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

    let sigma_base = distance_km / (b * big_a);
    let mut sigma = sigma_base;
    for _ in 0..MAX_ITERATIONS {
        let cos_2sigma_m = (2.0 * sigma1 + sigma).cos();
        let (sin_sigma, cos_sigma) = sigma.sin_cos();
        let delta_sigma = big_b
            * sin_sigma
            * (cos_2sigma_m
                + big_b / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                        - big_b / 6.0
                            * cos_2sigma_m
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));
        let sigma_next = sigma_base + delta_sigma;
        let done = (sigma_next - sigma).abs() < CONVERGENCE_RAD;
        sigma = sigma_next;
        if done {
            break;
        }
    }

    let cos_2sigma_m = (2.0 * sigma1 + sigma).cos();
    let (sin_sigma, cos_sigma) = sigma.sin_cos();
    let phi2 = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1).atan2(
        (1.0 - f)
            * (sin_alpha * sin_alpha
                + (sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1).powi(2))
            .sqrt(),
    );
    let lambda = (sin_sigma * sin_alpha1).atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1);
    let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
    let l = lambda
        - (1.0 - c)
            * f
            * sin_alpha
            * (sigma
                + c * sin_sigma
                    * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

    GeoPoint {
        latitude: phi2.to_degrees(),
        longitude: wrap_longitude(from.longitude + l.to_degrees()),
    }
}

/// `n` points from `from` to `to`, equally spaced by arc length along the
/// geodesic, both endpoints included. A zero-length geodesic yields `n`
/// copies of the point.
pub fn sample_points(from: GeoPoint, to: GeoPoint, n: usize) -> Vec<GeoPoint> {
    match n {
        0 => return Vec::new(),
        1 => return vec![from],
        _ => {}
    }
    let (distance, azimuth) = inverse(from, to);
    if distance == 0.0 {
        return vec![from; n];
    }
    (0..n)
        .map(|i| {
            if i == 0 {
                from
            } else if i == n - 1 {
                to
            } else {
                let fraction = i as f64 / (n - 1) as f64;
                direct(from, azimuth, distance * fraction)
            }
        })
        .collect()
}
