use crate::{
    entity::Entity,
    error::SimulationError,
    gravity::{self, accumulate, apply_force, attraction, force_components},
    real::{PRECISION, Real},
    report::{self, ReportSchedule},
    utils,
};

use rayon::prelude::*;

use std::io::Write;
use std::time::Instant;

/// Parameters fixed for the lifetime of a simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Gravitational constant.
    pub gravitational_constant: Real,
    /// Time step.
    pub dt: Real,
    /// Number of steps `run` performs.
    pub total_steps: usize,
    /// Number of interior reports spread over the run.
    pub reports: usize,
    /// Significant digits of every number in a report.
    pub report_digits: usize,
    /// Whether to compute pair forces on the rayon pool.
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: gravity::gravitational_constant(),
            dt: Real::from_parts(1, -2),
            total_steps: Self::DEFAULT_STEPS,
            reports: Self::DEFAULT_REPORTS,
            report_digits: report::DEFAULT_DIGITS,
            parallel: false,
        }
    }
}

impl SimulationConfig {
    /// Default constants.
    pub const DEFAULT_STEPS: usize = 1_000_000;
    pub const DEFAULT_REPORTS: usize = 100;

    /// Checks every value is in range.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.dt.is_positive() {
            return Err(SimulationError::InvalidConfig(format!("time step must be positive, got {}", self.dt)));
        }
        if self.gravitational_constant.is_negative() {
            return Err(SimulationError::InvalidConfig(format!(
                "gravitational constant must not be negative, got {}",
                self.gravitational_constant
            )));
        }
        if self.reports == 0 {
            return Err(SimulationError::InvalidConfig("at least one report is required".to_string()));
        }
        if !(1..=PRECISION).contains(&self.report_digits) {
            return Err(SimulationError::InvalidConfig(format!(
                "report digits must be between 1 and {PRECISION}, got {}",
                self.report_digits
            )));
        }
        Ok(())
    }

    pub fn schedule(&self) -> ReportSchedule {
        ReportSchedule::new(self.total_steps, self.reports)
    }
}

/// Outcome of a completed [`Simulation::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps performed.
    pub steps: usize,
    /// Report lines written.
    pub reports: usize,
}

/// Manages the N-body simulation state and logic.
#[derive(Debug)]
pub struct Simulation {
    /// Immutable run parameters.
    pub config: SimulationConfig,
    /// Number of steps taken so far.
    pub step_index: usize,
    /// Collection of all entities, in report order.
    pub entities: Vec<Entity>,
    /// Every unordered pair `(inner, outer)` with `inner < outer`, in accumulation order.
    pairs: Vec<(usize, usize)>,
}

impl Simulation {
    /// Initializes the reference three-body simulation with default parameters.
    pub fn new() -> Result<Self, SimulationError> {
        Self::with_config(SimulationConfig::default())
    }

    /// Initializes the reference three-body simulation with custom parameters.
    pub fn with_config(config: SimulationConfig) -> Result<Self, SimulationError> {
        Self::with_entities(utils::reference_entities()?, config)
    }

    /// Initializes a simulation over the given entities.
    pub fn with_entities(entities: Vec<Entity>, config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let pairs = (0..entities.len())
            .flat_map(|outer| (0..outer).map(move |inner| (inner, outer)))
            .collect::<Vec<_>>();
        ftlog::debug!("Created simulation with {} entities and {} pairs", entities.len(), pairs.len());

        Ok(Self {
            config,
            step_index: 0,
            entities,
            pairs,
        })
    }

    /// Advances the simulation by one step: accumulates the pairwise
    /// attraction, then integrates every entity.
    pub fn step(&mut self) -> Result<(), SimulationError> {
        self.attract()?;
        self.iterate();
        self.step_index += 1;
        Ok(())
    }

    /// Accumulates the gravitational acceleration of every pair into its two entities.
    ///
    /// The parallel path computes the per-pair components on the rayon pool and
    /// merges them in pair order, so both paths give identical results.
    pub fn attract(&mut self) -> Result<(), SimulationError> {
        let step = self.step_index;
        let g = &self.config.gravitational_constant;

        if self.config.parallel {
            let entities = &self.entities;
            let components = self
                .pairs
                .par_iter()
                .map(|&(inner, outer)| {
                    let (entity_1, entity_2) = (&entities[inner], &entities[outer]);
                    attraction(g, entity_2, entity_1)
                        .and_then(|force| force_components(entity_1, entity_2, &force))
                        .map_err(|_| SimulationError::Collision {
                            step,
                            first: inner,
                            second: outer,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            for (&(inner, outer), pair) in self.pairs.iter().zip(&components) {
                let (entity_1, entity_2) = pair_mut(&mut self.entities, inner, outer);
                accumulate(entity_1, entity_2, pair);
            }
        } else {
            for &(inner, outer) in &self.pairs {
                let (entity_1, entity_2) = pair_mut(&mut self.entities, inner, outer);
                attraction(g, entity_2, entity_1)
                    .and_then(|force| apply_force(entity_1, entity_2, &force))
                    .map_err(|_| SimulationError::Collision {
                        step,
                        first: inner,
                        second: outer,
                    })?;
            }
        }

        Ok(())
    }

    /// Updates the position and velocity of all entities from their accumulated acceleration.
    pub fn iterate(&mut self) {
        let dt = &self.config.dt;
        self.entities.iter_mut().for_each(|entity| entity.update(dt));
    }

    /// The current snapshot line.
    pub fn report(&self) -> String {
        report::format_report(&self.entities, self.config.report_digits)
    }

    /// Sum of `m * v` over all entities.
    pub fn total_momentum(&self) -> (Real, Real) {
        self.entities
            .iter()
            .map(Entity::momentum)
            .fold((Real::zero(), Real::zero()), |(p_x, p_y), (m_x, m_y)| (p_x + m_x, p_y + m_y))
    }

    /// Performs `total_steps` steps, writing one report line before the first
    /// step, after every scheduled step and after the last one.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<RunSummary, SimulationError> {
        let schedule = self.config.schedule();
        ftlog::info!(
            "Running {} steps over {} entities, reporting every {} steps",
            schedule.total_steps,
            self.entities.len(),
            schedule.interval
        );
        let start = Instant::now();

        let mut reports = 0;
        self.emit(out)?;
        reports += 1;

        for step in 0..schedule.total_steps {
            self.step()?;
            if schedule.is_due(step) {
                self.emit(out)?;
                reports += 1;
            }
        }

        self.emit(out)?;
        reports += 1;
        out.flush()?;

        ftlog::info!(
            "Finished {} steps in {:.2?}, wrote {} reports",
            schedule.total_steps,
            start.elapsed(),
            reports
        );

        Ok(RunSummary {
            steps: schedule.total_steps,
            reports,
        })
    }

    fn emit<W: Write>(&self, out: &mut W) -> Result<(), SimulationError> {
        writeln!(out, "{}", self.report())?;

        let (p_x, p_y) = self.total_momentum();
        ftlog::debug!(
            "Step {}: total momentum ({:e}, {:e})",
            self.step_index,
            p_x.to_f64(),
            p_y.to_f64()
        );
        Ok(())
    }
}

/// Mutable references to two distinct entities, `first < second`.
fn pair_mut(entities: &mut [Entity], first: usize, second: usize) -> (&mut Entity, &mut Entity) {
    let (head, tail) = entities.split_at_mut(second);
    (&mut head[first], &mut tail[0])
}
