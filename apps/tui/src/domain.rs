use serde::{Deserialize, Serialize};

/// Spatial resolution of a job-growth request.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum GeoType {
    #[default]
    Tract,
    Zip,
    County,
}

impl GeoType {
    pub const ALL: [Self; 3] = [Self::Tract, Self::Zip, Self::County];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tract => "tract",
            Self::Zip => "zip",
            Self::County => "county",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Tract),
            1 => Some(Self::Zip),
            2 => Some(Self::County),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Tract => 0,
            Self::Zip => 1,
            Self::County => 2,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "tract" => Some(Self::Tract),
            "zip" => Some(Self::Zip),
            "county" => Some(Self::County),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tract => "Census Tract",
            Self::Zip => "ZIP Code",
            Self::County => "County",
        }
    }

    /// Radius of the map preview circle around the geocoded point.
    pub const fn map_radius_miles(self) -> f64 {
        match self {
            Self::Tract => 1.0,
            Self::Zip => 2.0,
            Self::County => 5.0,
        }
    }
}

impl std::fmt::Display for GeoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One submitted lookup. Built from the search form, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AddressQuery {
    pub address: String,
    pub geo_type: GeoType,
    pub flush_cache: bool,
}

impl AddressQuery {
    pub fn new(address: impl Into<String>, geo_type: GeoType, flush_cache: bool) -> Self {
        Self {
            address: address.into(),
            geo_type,
            flush_cache,
        }
    }

    pub fn key(&self) -> QueryKey {
        QueryKey {
            address: self.address.clone(),
            geo_type: self.geo_type,
            flush_cache: self.flush_cache,
        }
    }
}

/// Cache key for a job-growth query: the full (address, granularity, flush) tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub address: String,
    pub geo_type: GeoType,
    pub flush_cache: bool,
}

impl QueryKey {
    pub fn new(address: impl Into<String>, geo_type: GeoType, flush_cache: bool) -> Self {
        Self {
            address: address.into(),
            geo_type,
            flush_cache,
        }
    }

    /// The non-forced key a successful forced refresh is back-filled into.
    pub fn without_flush(&self) -> Self {
        Self {
            flush_cache: false,
            ..self.clone()
        }
    }

    pub fn to_query(&self) -> AddressQuery {
        AddressQuery {
            address: self.address.clone(),
            geo_type: self.geo_type,
            flush_cache: self.flush_cache,
        }
    }
}
