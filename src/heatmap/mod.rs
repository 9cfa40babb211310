//! Heatmap points derived from a base reading.
//!
//! Each seed region of a city gets the base AQI plus integer jitter, and its
//! coordinates get a small offset so the rendered map looks organic. Nothing
//! here is stored; points are rebuilt on every request.

pub mod cities;

use rand::Rng;
use serde::Serialize;

pub use cities::{city_or_default, City, Region, CITIES, DEFAULT_CITY};

/// Maximum intensity jitter applied to the base value, either way.
pub const INTENSITY_JITTER: i64 = 15;
/// Maximum coordinate offset in degrees, either way.
pub const COORD_JITTER: f64 = 0.005;

/// A region with jittered coordinates and intensity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionPoint {
    /// Region name.
    pub name: &'static str,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
    /// Derived AQI intensity. May dip below zero for very low bases.
    pub intensity: i64,
}

impl RegionPoint {
    /// `[lat, lon, intensity]` triple as consumed by the map layer.
    pub fn as_triple(&self) -> (f64, f64, i64) {
        (self.lat, self.lon, self.intensity)
    }
}

/// Map center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Center {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

/// Heatmap payload for one city.
#[derive(Debug, Clone, Serialize)]
pub struct Heatmap {
    /// Points as `[lat, lon, intensity]`.
    pub points: Vec<(f64, f64, i64)>,
    /// City center.
    pub center: Center,
}

/// Derive one point per region from `base`.
pub fn derive_points<R: Rng>(base: u32, regions: &[Region], rng: &mut R) -> Vec<RegionPoint> {
    regions
        .iter()
        .map(|region| RegionPoint {
            name: region.name,
            lat: region.lat + rng.random_range(-COORD_JITTER..=COORD_JITTER),
            lon: region.lon + rng.random_range(-COORD_JITTER..=COORD_JITTER),
            intensity: i64::from(base) + rng.random_range(-INTENSITY_JITTER..=INTENSITY_JITTER),
        })
        .collect()
}

/// Build the heatmap for `city` (unknown names use the default city).
pub fn build_heatmap<R: Rng>(base: u32, city: &str, rng: &mut R) -> Heatmap {
    let city = city_or_default(city);
    let points = derive_points(base, city.regions, rng)
        .iter()
        .map(RegionPoint::as_triple)
        .collect();

    Heatmap {
        points,
        center: Center {
            lat: city.lat,
            lon: city.lon,
        },
    }
}
