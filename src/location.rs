//! Location provider seam for solar data acquisition.
//!
//! The pipeline only needs a pair of coordinates per refresh; where they come
//! from (static config, a platform location service, a city picker) is behind
//! this trait. The shell polls the provider between scheduler wakeups and
//! treats a coordinate change as a refresh trigger.

use anyhow::Result;

/// Supplies the display's current geographic coordinates, if known.
pub trait LocationProvider {
    fn current_location(&self) -> Option<(f64, f64)>;
}

/// Fixed coordinates from the configuration file.
#[derive(Debug, Clone, Copy)]
pub struct ConfigLocationProvider {
    latitude: f64,
    longitude: f64,
}

impl ConfigLocationProvider {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            anyhow::bail!(
                "Invalid latitude: {}. Must be between -90 and 90 degrees",
                latitude
            );
        }
        if !(-180.0..=180.0).contains(&longitude) {
            anyhow::bail!(
                "Invalid longitude: {}. Must be between -180 and 180 degrees",
                longitude
            );
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl LocationProvider for ConfigLocationProvider {
    fn current_location(&self) -> Option<(f64, f64)> {
        Some((self.latitude, self.longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates_accepted() {
        let provider = ConfigLocationProvider::new(40.7128, -74.0060).unwrap();
        assert_eq!(provider.current_location(), Some((40.7128, -74.0060)));
    }

    #[test]
    fn test_invalid_coordinates_rejected() {
        assert!(ConfigLocationProvider::new(91.0, 0.0).is_err());
        assert!(ConfigLocationProvider::new(0.0, 181.0).is_err());
        assert!(ConfigLocationProvider::new(-90.5, 0.0).is_err());
    }

    #[test]
    fn test_boundary_coordinates_accepted() {
        assert!(ConfigLocationProvider::new(90.0, 180.0).is_ok());
        assert!(ConfigLocationProvider::new(-90.0, -180.0).is_ok());
    }
}
