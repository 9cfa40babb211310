//! Seed coordinates for the supported cities.

/// A named sub-location with fixed coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Region name.
    pub name: &'static str,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

/// A city with its center and seed regions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    /// City name as used in requests.
    pub name: &'static str,
    /// Center latitude.
    pub lat: f64,
    /// Center longitude.
    pub lon: f64,
    /// Seed regions.
    pub regions: &'static [Region],
}

/// City used for names missing from the table.
pub const DEFAULT_CITY: &str = "Mumbai";

const fn region(name: &'static str, lat: f64, lon: f64) -> Region {
    Region { name, lat, lon }
}

/// Supported cities.
pub const CITIES: &[City] = &[
    City {
        name: "Mumbai",
        lat: 19.0760,
        lon: 72.8777,
        regions: &[
            region("Colaba", 18.9200, 72.8300),
            region("Andheri", 19.1197, 72.8464),
            region("Bandra", 19.0544, 72.8403),
            region("Chembur", 19.0630, 72.9010),
            region("Borivali", 19.2294, 72.8553),
        ],
    },
    City {
        name: "Delhi",
        lat: 28.7041,
        lon: 77.1025,
        regions: &[
            region("Connaught Place", 28.6330, 77.2193),
            region("Karol Bagh", 28.6508, 77.1906),
            region("Nehru Place", 28.5483, 77.2529),
            region("Dwarka", 28.5921, 77.0460),
            region("Rohini", 28.7253, 77.1194),
        ],
    },
    City {
        name: "Bangalore",
        lat: 12.9716,
        lon: 77.5946,
        regions: &[
            region("Koramangala", 12.9352, 77.6245),
            region("Indiranagar", 12.9784, 77.6408),
            region("Jayanagar", 12.9308, 77.5838),
            region("Whitefield", 12.9698, 77.7499),
            region("Malleshwaram", 13.0068, 77.5713),
        ],
    },
];

/// Look up a city by exact name, falling back to [`DEFAULT_CITY`].
pub fn city_or_default(name: &str) -> &'static City {
    CITIES
        .iter()
        .find(|c| c.name == name)
        .or_else(|| CITIES.iter().find(|c| c.name == DEFAULT_CITY))
        .unwrap_or(&CITIES[0])
}
