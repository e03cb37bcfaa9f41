use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub(crate) use settings::ConfigFile;

mod settings;

/// How single-particle states are labelled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoordinateType {
    Cartesian,
    Polar,
}

/// Which spatial integrator computes the two-body integrals.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntegratorKind {
    MonteCarlo,
    GaussLaguerre,
    GaussHermite,
    InteractionIntegrator,
}

/// Parameters of the spatial integrators. Only the ones belonging to the
/// selected integrator are used.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegrationSettings {
    pub integrator: IntegratorKind,
    /// quadrature points per Cartesian coordinate
    pub gauss_hermite_points: usize,
    /// radial quadrature points per particle
    pub gauss_laguerre_points: usize,
    /// midpoint-rule points for the relative angle of the polar integrator
    pub angular_points: usize,
    pub monte_carlo_samples: usize,
    pub seed: u64,
}

impl IntegrationSettings {
    pub fn new(integrator: IntegratorKind) -> Self {
        Self {
            integrator,
            gauss_hermite_points: 20,
            gauss_laguerre_points: 20,
            angular_points: 64,
            monte_carlo_samples: 1_000_000,
            seed: 0x5eed,
        }
    }
}

/// The two-body potential `strength / sqrt(r^2 + shielding^2)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PotentialSettings {
    pub strength: f64,
    pub shielding: f64,
}

impl Default for PotentialSettings {
    fn default() -> Self {
        Self {
            strength: 1.0,
            shielding: 0.0,
        }
    }
}

/// Validated run configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// oscillator frequency, always positive
    pub w: f64,
    /// spatial dimension, 1 or 2
    pub dim: usize,
    pub coordinate_type: CoordinateType,
    pub shells: usize,
    /// read for compatibility with existing configuration files, not used by the basis
    pub basis_type: i64,
    pub integration: IntegrationSettings,
    pub potential: PotentialSettings,
}

impl Config {
    /// A configuration with default integration and potential settings.
    pub fn new(
        w: f64,
        dim: usize,
        coordinate_type: CoordinateType,
        shells: usize,
        integrator: IntegratorKind,
    ) -> Self {
        Self {
            w,
            dim,
            coordinate_type,
            shells,
            basis_type: 0,
            integration: IntegrationSettings::new(integrator),
            potential: PotentialSettings::default(),
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(json)?;
        file.try_into()
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let reader = BufReader::new(File::open(path)?);
        let file: ConfigFile = serde_json::from_reader(reader)?;
        file.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "systemSettings": {
            "w": 0.5,
            "dim": 2,
            "coordinateType": "POLAR",
            "shells": 3,
            "basisType": 1
        },
        "spatialIntegration": {
            "integrator": "INTERACTION_INTEGRATOR",
            "gaussLaguerrePoints": 12
        },
        "potential": { "shielding": 0.1 }
    }"#;

    #[test]
    fn parses_full_configuration() {
        let config = Config::from_json(FULL).unwrap();

        assert_eq!(config.w, 0.5);
        assert_eq!(config.dim, 2);
        assert_eq!(config.coordinate_type, CoordinateType::Polar);
        assert_eq!(config.shells, 3);
        assert_eq!(config.basis_type, 1);
        assert_eq!(
            config.integration.integrator,
            IntegratorKind::InteractionIntegrator
        );
        assert_eq!(config.integration.gauss_laguerre_points, 12);
        assert_eq!(config.integration.gauss_hermite_points, 20);
        assert_eq!(config.potential.strength, 1.0);
        assert_eq!(config.potential.shielding, 0.1);
    }

    #[test]
    fn missing_frequency_is_reported_by_key() {
        let json = r#"{
            "systemSettings": { "dim": 1, "coordinateType": "CARTESIAN", "shells": 1, "basisType": 0 },
            "spatialIntegration": { "integrator": "GAUSS_HERMITE" }
        }"#;

        match Config::from_json(json) {
            Err(ConfigError::MissingKey { key }) => assert_eq!(key, "systemSettings.w"),
            other => panic!("expected a missing key error, got {other:?}"),
        }
    }

    #[test]
    fn missing_section_is_reported_by_key() {
        let json = r#"{
            "systemSettings": { "w": 1.0, "dim": 1, "coordinateType": "CARTESIAN", "shells": 1, "basisType": 0 }
        }"#;

        match Config::from_json(json) {
            Err(ConfigError::MissingKey { key }) => {
                assert_eq!(key, "spatialIntegration.integrator")
            }
            other => panic!("expected a missing key error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_values() {
        for (json, expected_key) in [
            (
                r#"{"systemSettings": {"w": -1.0, "dim": 1, "coordinateType": "CARTESIAN", "shells": 1, "basisType": 0},
                    "spatialIntegration": {"integrator": "GAUSS_HERMITE"}}"#,
                "systemSettings.w",
            ),
            (
                r#"{"systemSettings": {"w": 1.0, "dim": 3, "coordinateType": "CARTESIAN", "shells": 1, "basisType": 0},
                    "spatialIntegration": {"integrator": "GAUSS_HERMITE"}}"#,
                "systemSettings.dim",
            ),
            (
                r#"{"systemSettings": {"w": 1.0, "dim": 1, "coordinateType": "CARTESIAN", "shells": -2, "basisType": 0},
                    "spatialIntegration": {"integrator": "GAUSS_HERMITE"}}"#,
                "systemSettings.shells",
            ),
            (
                r#"{"systemSettings": {"w": 1.0, "dim": 1, "coordinateType": "CARTESIAN", "shells": 1, "basisType": 0},
                    "spatialIntegration": {"integrator": "GAUSS_HERMITE", "gaussHermitePoints": 0}}"#,
                "spatialIntegration.gaussHermitePoints",
            ),
            (
                r#"{"systemSettings": {"w": 1.0, "dim": 1, "coordinateType": "CARTESIAN", "shells": 1, "basisType": 0},
                    "spatialIntegration": {"integrator": "GAUSS_HERMITE"}, "potential": {"shielding": -0.5}}"#,
                "potential.shielding",
            ),
        ] {
            match Config::from_json(json) {
                Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, expected_key),
                other => panic!("expected an invalid value for {expected_key}, got {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_enum_spelling_is_a_parse_error() {
        let json = r#"{
            "systemSettings": { "w": 1.0, "dim": 1, "coordinateType": "SPHERICAL", "shells": 1, "basisType": 0 },
            "spatialIntegration": { "integrator": "GAUSS_HERMITE" }
        }"#;
        assert!(matches!(Config::from_json(json), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn bundled_configurations_load() {
        let data = concat!(env!("CARGO_MANIFEST_DIR"), "/../data");

        let dot = Config::load(format!("{data}/quantum_dot.json")).unwrap();
        assert_eq!(dot.coordinate_type, CoordinateType::Polar);
        assert_eq!(dot.potential, PotentialSettings::default());

        let shielded = Config::load(format!("{data}/shielded_1d.json")).unwrap();
        assert_eq!(shielded.dim, 1);
        assert_eq!(shielded.integration.gauss_hermite_points, 24);
        assert_eq!(shielded.potential.shielding, 0.25);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            Config::load("/nonexistent/hobasis/config.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
