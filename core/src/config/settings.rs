use serde::Deserialize;

use crate::error::ConfigError;

use super::{Config, CoordinateType, IntegrationSettings, IntegratorKind, PotentialSettings};

/// A configuration file as it appears on disk. Every field is optional here so
/// that a missing key can be reported by its full path instead of as a generic
/// parse failure.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConfigFile {
    system_settings: Option<ConfigSystemSettings>,
    spatial_integration: Option<ConfigSpatialIntegration>,
    potential: Option<ConfigPotential>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigSystemSettings {
    w: Option<f64>,
    dim: Option<i64>,
    coordinate_type: Option<CoordinateType>,
    shells: Option<i64>,
    basis_type: Option<i64>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigSpatialIntegration {
    integrator: Option<IntegratorKind>,
    gauss_hermite_points: Option<usize>,
    gauss_laguerre_points: Option<usize>,
    angular_points: Option<usize>,
    monte_carlo_samples: Option<usize>,
    seed: Option<u64>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigPotential {
    strength: Option<f64>,
    shielding: Option<f64>,
}

fn required<T>(value: Option<T>, key: &'static str) -> Result<T, ConfigError> {
    value.ok_or(ConfigError::MissingKey { key })
}

fn positive(value: usize, key: &'static str) -> Result<usize, ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            key,
            reason: "must be at least 1".to_owned(),
        });
    }
    Ok(value)
}

impl TryFrom<ConfigFile> for Config {
    type Error = ConfigError;

    fn try_from(value: ConfigFile) -> Result<Self, Self::Error> {
        let system = value.system_settings.unwrap_or_default();
        let integration = value.spatial_integration.unwrap_or_default();
        let potential = value.potential.unwrap_or_default();

        let w = required(system.w, "systemSettings.w")?;
        let dim = required(system.dim, "systemSettings.dim")?;
        let coordinate_type = required(system.coordinate_type, "systemSettings.coordinateType")?;
        let shells = required(system.shells, "systemSettings.shells")?;
        let basis_type = required(system.basis_type, "systemSettings.basisType")?;
        let integrator = required(integration.integrator, "spatialIntegration.integrator")?;

        if !(w.is_finite() && w > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "systemSettings.w",
                reason: format!("the oscillator frequency must be positive, got {w}"),
            });
        }

        let dim = match dim {
            1 => 1,
            2 => 2,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "systemSettings.dim",
                    reason: format!("only 1 and 2 dimensions are supported, got {other}"),
                })
            }
        };

        let shells = usize::try_from(shells).map_err(|_| ConfigError::InvalidValue {
            key: "systemSettings.shells",
            reason: format!("must be non-negative, got {shells}"),
        })?;

        let defaults = IntegrationSettings::new(integrator);
        let integration = IntegrationSettings {
            integrator,
            gauss_hermite_points: positive(
                integration
                    .gauss_hermite_points
                    .unwrap_or(defaults.gauss_hermite_points),
                "spatialIntegration.gaussHermitePoints",
            )?,
            gauss_laguerre_points: positive(
                integration
                    .gauss_laguerre_points
                    .unwrap_or(defaults.gauss_laguerre_points),
                "spatialIntegration.gaussLaguerrePoints",
            )?,
            angular_points: positive(
                integration.angular_points.unwrap_or(defaults.angular_points),
                "spatialIntegration.angularPoints",
            )?,
            monte_carlo_samples: positive(
                integration
                    .monte_carlo_samples
                    .unwrap_or(defaults.monte_carlo_samples),
                "spatialIntegration.monteCarloSamples",
            )?,
            seed: integration.seed.unwrap_or(defaults.seed),
        };

        let defaults = PotentialSettings::default();
        let potential = PotentialSettings {
            strength: potential.strength.unwrap_or(defaults.strength),
            shielding: potential.shielding.unwrap_or(defaults.shielding),
        };

        if !potential.strength.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "potential.strength",
                reason: format!("must be finite, got {}", potential.strength),
            });
        }

        if !(potential.shielding.is_finite() && potential.shielding >= 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "potential.shielding",
                reason: format!("must be non-negative, got {}", potential.shielding),
            });
        }

        Ok(Config {
            w,
            dim,
            coordinate_type,
            shells,
            basis_type,
            integration,
            potential,
        })
    }
}
