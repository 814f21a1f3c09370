//! Geography reference table.
//!
//! Regions carry a centroid coordinate; a subset of regions additionally
//! carries an ordered list of named localities. The table is read-only once
//! built. A region without localities is a valid state and callers fall back
//! to the centroid.

use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors raised while building a custom geography table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeographyError {
    /// The table has no regions to draw from
    #[error("Geography table must contain at least one region")]
    EmptyRegions,

    /// The same region name appears twice
    #[error("Duplicate region: {0}")]
    DuplicateRegion(String),

    /// A locality list or high-incidence entry names an unknown region
    #[error("Unknown region: {0}")]
    UnknownRegion(String),
}

/// Top-level geographic subdivision (state or union territory).
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Canonical name
    pub name: String,
    /// Centroid latitude
    pub latitude: f64,
    /// Centroid longitude
    pub longitude: f64,
}

impl Region {
    /// Create a region.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// Named sub-location inside a region.
#[derive(Debug, Clone, PartialEq)]
pub struct Locality {
    /// Locality (city) name
    pub name: String,
    /// Latitude
    pub latitude: f64,
    /// Longitude
    pub longitude: f64,
}

impl Locality {
    /// Create a locality.
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// Read-only geography table.
///
/// # Examples
///
/// ```
/// use fraud_core::geography::Geography;
///
/// let india = Geography::india();
/// assert_eq!(india.regions().len(), 36);
/// assert_eq!(india.localities("Karnataka")[0].name, "Bengaluru");
/// assert!(india.localities("Goa").is_empty());
/// assert_eq!(india.suggest("pradesh").len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Geography {
    regions: Vec<Region>,
    by_name: HashMap<String, usize>,
    localities: HashMap<String, Vec<Locality>>,
    high_incidence: Vec<usize>,
}

impl Geography {
    /// Build a validated table.
    ///
    /// `high_incidence` names the regions favoured by the biased draw; it may
    /// be empty, in which case every draw is uniform over all regions.
    pub fn new(
        regions: Vec<Region>,
        localities: HashMap<String, Vec<Locality>>,
        high_incidence: &[&str],
    ) -> Result<Self, GeographyError> {
        if regions.is_empty() {
            return Err(GeographyError::EmptyRegions);
        }

        let mut by_name = HashMap::with_capacity(regions.len());
        for (idx, region) in regions.iter().enumerate() {
            if by_name.insert(region.name.clone(), idx).is_some() {
                return Err(GeographyError::DuplicateRegion(region.name.clone()));
            }
        }

        if let Some(unknown) = localities.keys().find(|name| !by_name.contains_key(*name)) {
            return Err(GeographyError::UnknownRegion(unknown.clone()));
        }

        let mut seen = HashSet::new();
        let mut favoured = Vec::with_capacity(high_incidence.len());
        for name in high_incidence {
            let idx = *by_name
                .get(*name)
                .ok_or_else(|| GeographyError::UnknownRegion((*name).to_string()))?;
            if seen.insert(idx) {
                favoured.push(idx);
            }
        }

        Ok(Self {
            regions,
            by_name,
            localities,
            high_incidence: favoured,
        })
    }

    /// Built-in table of Indian states and union territories.
    pub fn india() -> Self {
        let regions = INDIA_REGIONS
            .iter()
            .map(|&(name, lat, lng)| Region::new(name, lat, lng))
            .collect();

        let localities = INDIA_LOCALITIES
            .iter()
            .map(|&(region, cities)| {
                let cities = cities
                    .iter()
                    .map(|&(name, lat, lng)| Locality::new(name, lat, lng))
                    .collect();
                (region.to_string(), cities)
            })
            .collect();

        Self::from_static(regions, localities)
    }

    fn from_static(regions: Vec<Region>, localities: HashMap<String, Vec<Locality>>) -> Self {
        let by_name: HashMap<String, usize> = regions
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.name.clone(), idx))
            .collect();
        let high_incidence = INDIA_HIGH_INCIDENCE
            .iter()
            .filter_map(|name| by_name.get(*name).copied())
            .collect();

        Self {
            regions,
            by_name,
            localities,
            high_incidence,
        }
    }

    /// All regions in table order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Look up a region by name.
    pub fn region(&self, name: &str) -> Option<&Region> {
        self.by_name.get(name).map(|&idx| &self.regions[idx])
    }

    /// Localities of a region; empty when none are known.
    pub fn localities(&self, region: &str) -> &[Locality] {
        self.localities
            .get(region)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Regions favoured by the biased draw.
    pub fn high_incidence(&self) -> impl Iterator<Item = &Region> {
        self.high_incidence.iter().map(|&idx| &self.regions[idx])
    }

    pub(crate) fn high_incidence_len(&self) -> usize {
        self.high_incidence.len()
    }

    pub(crate) fn high_incidence_at(&self, n: usize) -> &Region {
        &self.regions[self.high_incidence[n]]
    }

    /// Region names containing `query`, case-insensitively, in table order.
    ///
    /// The query is used as typed, surrounding whitespace included; only an
    /// empty query yields no suggestions.
    pub fn suggest(&self, query: &str) -> Vec<&str> {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.regions
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .map(|r| r.name.as_str())
            .collect()
    }
}

impl Default for Geography {
    fn default() -> Self {
        Self::india()
    }
}

const INDIA_HIGH_INCIDENCE: [&str; 5] = [
    "Maharashtra",
    "Delhi",
    "Karnataka",
    "Telangana",
    "Tamil Nadu",
];

const INDIA_REGIONS: [(&str, f64, f64); 36] = [
    ("Andhra Pradesh", 15.9129, 79.74),
    ("Arunachal Pradesh", 28.218, 94.7278),
    ("Assam", 26.2006, 92.9376),
    ("Bihar", 25.0961, 85.3131),
    ("Chhattisgarh", 21.2787, 81.8661),
    ("Goa", 15.2993, 74.124),
    ("Gujarat", 22.2587, 71.1924),
    ("Haryana", 29.0588, 76.0856),
    ("Himachal Pradesh", 31.1048, 77.1734),
    ("Jharkhand", 23.6102, 85.2799),
    ("Karnataka", 15.3173, 75.7139),
    ("Kerala", 10.8505, 76.2711),
    ("Madhya Pradesh", 22.9734, 78.6569),
    ("Maharashtra", 19.7515, 75.7139),
    ("Manipur", 24.6637, 93.9063),
    ("Meghalaya", 25.467, 91.3662),
    ("Mizoram", 23.1645, 92.9376),
    ("Nagaland", 26.1584, 94.5624),
    ("Odisha", 20.9517, 85.0985),
    ("Punjab", 31.1471, 75.3412),
    ("Rajasthan", 27.0238, 74.2179),
    ("Sikkim", 27.533, 88.5122),
    ("Tamil Nadu", 11.1271, 78.6569),
    ("Telangana", 18.1124, 79.0193),
    ("Tripura", 23.9408, 91.9882),
    ("Uttar Pradesh", 26.8467, 80.9462),
    ("Uttarakhand", 30.0668, 79.0193),
    ("West Bengal", 22.9868, 87.855),
    ("Delhi", 28.7041, 77.1025),
    ("Jammu and Kashmir", 33.7782, 76.5762),
    ("Ladakh", 34.2996, 78.2932),
    ("Andaman and Nicobar Islands", 11.7401, 92.6586),
    ("Chandigarh", 30.7333, 76.7794),
    ("Dadra and Nagar Haveli and Daman and Diu", 20.1809, 73.0169),
    ("Lakshadweep", 10.57, 72.64),
    ("Puducherry", 11.9416, 79.8083),
];

type CityRow = (&'static str, f64, f64);

const INDIA_LOCALITIES: [(&str, &[CityRow]); 10] = [
    (
        "Maharashtra",
        &[
            ("Mumbai", 19.076, 72.8777),
            ("Pune", 18.5204, 73.8567),
            ("Nagpur", 21.1458, 79.0882),
        ],
    ),
    (
        "Karnataka",
        &[("Bengaluru", 12.9716, 77.5946), ("Mysuru", 12.2958, 76.6394)],
    ),
    (
        "Tamil Nadu",
        &[("Chennai", 13.0827, 80.2707), ("Coimbatore", 11.0168, 76.9558)],
    ),
    ("Delhi", &[("New Delhi", 28.6139, 77.209)]),
    ("Telangana", &[("Hyderabad", 17.385, 78.4867)]),
    ("Gujarat", &[("Ahmedabad", 23.0225, 72.5714)]),
    ("West Bengal", &[("Kolkata", 22.5726, 88.3639)]),
    (
        "Uttar Pradesh",
        &[("Lucknow", 26.8467, 80.9462), ("Kanpur", 26.4499, 80.3319)],
    ),
    ("Rajasthan", &[("Jaipur", 26.9124, 75.7873)]),
    ("Punjab", &[("Chandigarh", 30.7333, 76.7794)]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_india_table_is_consistent() {
        let india = Geography::india();
        assert_eq!(india.regions().len(), 36);
        assert_eq!(india.high_incidence().count(), 5);

        for (region, _) in INDIA_LOCALITIES.iter() {
            assert!(india.region(region).is_some(), "{} missing", region);
        }
    }

    #[test]
    fn test_lookup_and_fallback() {
        let india = Geography::india();
        let delhi = india.region("Delhi").unwrap();
        assert_eq!(delhi.latitude, 28.7041);

        assert_eq!(india.localities("Maharashtra").len(), 3);
        assert!(india.localities("Ladakh").is_empty());
        assert!(india.localities("Atlantis").is_empty());
        assert!(india.region("Atlantis").is_none());
    }

    #[test]
    fn test_suggest_is_case_insensitive() {
        let india = Geography::india();
        assert_eq!(india.suggest("TAMIL"), vec!["Tamil Nadu"]);
        assert_eq!(
            india.suggest("pradesh"),
            vec![
                "Andhra Pradesh",
                "Arunachal Pradesh",
                "Himachal Pradesh",
                "Madhya Pradesh",
                "Uttar Pradesh"
            ]
        );
        assert!(india.suggest("").is_empty());
        assert!(india.suggest("zzz").is_empty());
    }

    #[test]
    fn test_suggest_keeps_whitespace() {
        let india = Geography::india();
        let spaced = india.suggest(" ");
        assert!(spaced.contains(&"Tamil Nadu"));
        assert!(spaced.iter().all(|name| name.contains(' ')));
        assert!(!spaced.contains(&"Kerala"));

        assert_eq!(india.suggest(" nadu"), vec!["Tamil Nadu"]);
        assert!(india.suggest("   ").is_empty());
    }

    #[test]
    fn test_new_rejects_empty() {
        let err = Geography::new(Vec::new(), HashMap::new(), &[]).unwrap_err();
        assert_eq!(err, GeographyError::EmptyRegions);
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let regions = vec![Region::new("X", 0.0, 0.0), Region::new("X", 1.0, 1.0)];
        let err = Geography::new(regions, HashMap::new(), &[]).unwrap_err();
        assert_eq!(err, GeographyError::DuplicateRegion("X".to_string()));
    }

    #[test]
    fn test_new_rejects_unknown_references() {
        let regions = vec![Region::new("X", 0.0, 0.0)];
        let err = Geography::new(regions.clone(), HashMap::new(), &["Y"]).unwrap_err();
        assert_eq!(err, GeographyError::UnknownRegion("Y".to_string()));

        let mut localities = HashMap::new();
        localities.insert("Z".to_string(), vec![Locality::new("Zed", 1.0, 1.0)]);
        let err = Geography::new(regions, localities, &[]).unwrap_err();
        assert_eq!(err, GeographyError::UnknownRegion("Z".to_string()));
    }

    #[test]
    fn test_new_deduplicates_high_incidence() {
        let regions = vec![Region::new("X", 0.0, 0.0), Region::new("Y", 1.0, 1.0)];
        let geo = Geography::new(regions, HashMap::new(), &["Y", "Y"]).unwrap();
        let favoured: Vec<_> = geo.high_incidence().map(|r| r.name.as_str()).collect();
        assert_eq!(favoured, vec!["Y"]);
    }
}
