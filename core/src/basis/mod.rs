//! The oscillator basis: orbitals, their energies, and the antisymmetrized
//! two-body elements between them.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};

use nalgebra::DVector;
use serde::Serialize;

use crate::{
    config::{Config, CoordinateType},
    error::{BasisError, IntegrationError, OutputError},
    integrals::{self, SpatialIntegrator},
    state::{SingleParticleState, Spin},
    wavefunction::{self, WaveFunction},
};

pub use elements::{InteractionElement, InteractionElements, TOLERANCE};

mod elements;

/// Builds the single-particle basis described by a [`Config`].
///
/// The three computations run in order: [`create_basis`](Basis::create_basis),
/// [`compute_sps_energies`](Basis::compute_sps_energies) and
/// [`compute_interaction_elements`](Basis::compute_interaction_elements). Each one
/// replaces whatever the previous call of the same step produced.
pub struct Basis {
    config: Config,
    sqrt_w: f64,
    wave_function: Arc<dyn WaveFunction>,
    states: Vec<SingleParticleState>,
    sps_energies: DVector<f64>,
    interaction_elements: InteractionElements,
}

impl Basis {
    pub fn new(config: Config) -> Self {
        let wave_function = wavefunction::create(&config);
        Self::with_wave_function(config, wave_function)
    }

    /// Use a custom wavefunction model instead of the oscillator matching `config.dim`.
    pub fn with_wave_function(config: Config, wave_function: Arc<dyn WaveFunction>) -> Self {
        Self {
            sqrt_w: config.w.sqrt(),
            config,
            wave_function,
            states: Vec::new(),
            sps_energies: DVector::zeros(0),
            interaction_elements: InteractionElements::default(),
        }
    }

    /// Read the configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BasisError> {
        Ok(Self::new(Config::load(path)?))
    }

    /// Enumerate the orbitals of every shell up to `config.shells`, each once
    /// with spin up and once with spin down.
    ///
    /// Energies and interaction elements from an earlier basis are discarded.
    pub fn create_basis(&mut self) -> Result<(), BasisError> {
        self.states.clear();
        self.sps_energies = DVector::zeros(0);
        self.interaction_elements = InteractionElements::default();

        let shells = self.config.shells as i32;
        let orbitals = match (self.config.coordinate_type, self.config.dim) {
            (CoordinateType::Cartesian, 1) => cartesian_1d(shells),
            (CoordinateType::Cartesian, 2) => cartesian_2d(shells),
            (CoordinateType::Polar, 2) => polar_2d(shells),
            (CoordinateType::Polar, 1) => return Err(BasisError::PolarBasisIn1d),
            (coordinates, dim) => {
                return Err(BasisError::UnsupportedDimension { coordinates, dim })
            }
        };

        self.states = orbitals
            .into_iter()
            .flat_map(|(first, second)| Spin::ORDER.map(|spin| (first, second, spin)))
            .enumerate()
            .map(|(index, (first, second, spin))| {
                SingleParticleState::new(index, first, second, spin)
            })
            .collect();

        log::info!(
            "{:?} basis in {}D with {} shells: {} states",
            self.config.coordinate_type,
            self.config.dim,
            self.config.shells,
            self.states.len()
        );
        for state in &self.states {
            log::debug!("state {state}");
        }

        Ok(())
    }

    pub fn compute_sps_energies(&mut self) {
        self.sps_energies = DVector::from_iterator(
            self.states.len(),
            self.states
                .iter()
                .map(|state| self.wave_function.energy(state)),
        );

        log::info!("computed {} single-particle energies", self.sps_energies.len());
        log::debug!("single-particle energies: {:0.6}", self.sps_energies);
    }

    /// Compute the elements with the integrator selected in the configuration.
    ///
    /// Returns the number of elements kept.
    pub fn compute_interaction_elements(&mut self) -> Result<usize, BasisError> {
        let config = self.config.clone();
        let wave_function = Arc::clone(&self.wave_function);

        self.compute_interaction_elements_with(
            |stream| integrals::create(&config, Arc::clone(&wave_function), stream),
            None,
        )
    }

    /// Compute <pq||rs> = <pq|V|rs> - <pq|V|sr> for every p < q and r < s, keeping
    /// the elements with a magnitude above [`TOLERANCE`].
    ///
    /// The work is split into rows of fixed p. `factory` is called once per row
    /// with the row index, so every row owns its integrator; with the `rayon`
    /// feature rows run in parallel. The result does not depend on the number of
    /// threads. `cancel` is checked before each row starts.
    ///
    /// On error nothing is stored.
    pub fn compute_interaction_elements_with<F, I>(
        &mut self,
        factory: F,
        cancel: Option<&AtomicBool>,
    ) -> Result<usize, BasisError>
    where
        F: Fn(u64) -> Result<I, IntegrationError> + Sync,
        I: SpatialIntegrator,
    {
        self.interaction_elements = InteractionElements::default();

        let states = &self.states;
        if states.is_empty() {
            log::warn!("no states to compute interaction elements for");
        }

        log::info!(
            "computing interaction elements between {} states",
            states.len()
        );
        let start = Instant::now();

        let row = |p: usize| -> Result<Vec<InteractionElement>, BasisError> {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return Err(BasisError::Cancelled);
            }

            let mut integrator = factory(p as u64).map_err(BasisError::IntegratorSetup)?;
            let elements = interaction_row(states, p, &mut integrator)?;

            log::debug!("row {p}: {} elements", elements.len());
            Ok(elements)
        };

        #[cfg(feature = "rayon")]
        let rows = {
            use rayon::iter::{IntoParallelIterator, ParallelIterator};

            (0..states.len())
                .into_par_iter()
                .map(row)
                .collect::<Result<Vec<_>, _>>()?
        };

        #[cfg(not(feature = "rayon"))]
        let rows = (0..states.len())
            .map(row)
            .collect::<Result<Vec<_>, _>>()?;

        self.interaction_elements = rows.into_iter().flatten().collect::<Vec<_>>().into();

        let count = self.interaction_elements.len();
        log::info!(
            "computed {count} interaction elements in {:0.2?}",
            start.elapsed()
        );
        Ok(count)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sqrt_w(&self) -> f64 {
        self.sqrt_w
    }

    pub fn states(&self) -> &[SingleParticleState] {
        &self.states
    }

    /// Energies aligned with [`states`](Basis::states).
    pub fn sps_energies(&self) -> &DVector<f64> {
        &self.sps_energies
    }

    pub fn interaction_elements(&self) -> &InteractionElements {
        &self.interaction_elements
    }

    pub fn output(&self) -> BasisOutput<'_> {
        BasisOutput {
            states: &self.states,
            sps_energies: self.sps_energies.as_slice(),
            interaction_elements: &self.interaction_elements,
        }
    }
}

/// Everything the Hamiltonian stage needs from a computed basis.
#[derive(Debug, Serialize)]
pub struct BasisOutput<'a> {
    pub states: &'a [SingleParticleState],
    pub sps_energies: &'a [f64],
    pub interaction_elements: &'a InteractionElements,
}

impl BasisOutput<'_> {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

fn cartesian_1d(shells: i32) -> Vec<(i32, i32)> {
    (0..=shells).map(|n| (n, 0)).collect()
}

fn cartesian_2d(shells: i32) -> Vec<(i32, i32)> {
    (0..=shells)
        .flat_map(|shell| (0..=shell).map(move |nx| (nx, shell - nx)))
        .collect()
}

/// Orbitals `(n, m)` with 2n + |m| + 1 = k for every k up to `shells`. The ground
/// orbital sits at k = 1, so zero shells give an empty basis.
fn polar_2d(shells: i32) -> Vec<(i32, i32)> {
    let mut orbitals = Vec::new();
    for k in 0..=shells {
        for n in 0..=k / 2 {
            for m in -k..=k {
                if 2 * n + m.abs() + 1 == k {
                    orbitals.push((n, m));
                }
            }
        }
    }
    orbitals
}

/// All elements <pq||rs> of one row p.
fn interaction_row<I: SpatialIntegrator>(
    states: &[SingleParticleState],
    p: usize,
    integrator: &mut I,
) -> Result<Vec<InteractionElement>, BasisError> {
    let n_states = states.len();
    let state_p = &states[p];
    let mut row = Vec::new();

    for q in p + 1..n_states {
        let state_q = &states[q];
        for r in 0..n_states {
            let state_r = &states[r];
            for s in r + 1..n_states {
                let state_s = &states[s];
                let failed = |source| BasisError::Integration { p, q, r, s, source };

                let mut value = 0.0;
                if state_p.spin == state_r.spin && state_q.spin == state_s.spin {
                    value += integrator
                        .integrate((state_p, state_q, state_r, state_s))
                        .map_err(failed)?;
                }
                if state_p.spin == state_s.spin && state_q.spin == state_r.spin {
                    value -= integrator
                        .integrate((state_p, state_q, state_s, state_r))
                        .map_err(failed)?;
                }

                if value.abs() > TOLERANCE {
                    let element = InteractionElement { p, q, r, s, value };
                    log::trace!("{element}");
                    row.push(element);
                }
            }
        }
    }

    Ok(row)
}
