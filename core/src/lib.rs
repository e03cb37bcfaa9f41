pub mod basis;
pub mod config;
pub mod error;
pub mod integrals;
pub mod special;
pub mod state;
pub mod testing;
pub mod wavefunction;

pub use basis::{Basis, BasisOutput, InteractionElement, InteractionElements};
pub use config::Config;
pub use error::{BasisError, ConfigError, IntegrationError, OutputError};
pub use state::{SingleParticleState, Spin};
