//! Configuration system for shiftqubo.
//!
//! Loads problem dimensions, the shift cost table, penalty weights, solver
//! gateway tuning and decoder conventions from TOML or YAML, and validates
//! them into core types before any solve attempt.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use shiftqubo_config::ScheduleConfig;
//!
//! let config = ScheduleConfig::from_toml_str(r#"
//!     shift_costs = [5.0, 1.0, 3.0]
//!
//!     [dimensions]
//!     num_staff = 1
//!     num_days = 1
//!     num_shifts = 3
//!
//!     [solver]
//!     environment = "testnet"
//!     num_reads = 100
//! "#).unwrap();
//!
//! let validated = config.validate().unwrap();
//! assert_eq!(validated.dims.variable_count(), 3);
//! assert_eq!(validated.gateway.num_reads, 100);
//! ```
//!
//! Use the default weekly instance when the file is missing:
//!
//! ```
//! use shiftqubo_config::ScheduleConfig;
//!
//! let config = ScheduleConfig::load("schedule.toml").unwrap_or_default();
//! assert_eq!(config.dimensions.num_staff, 7);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shiftqubo_core::{
    CostModel, Dimensions, Flattening, GatewayConfig, ModelError, PenaltyWeights, Schedule,
    SolverEnvironment, VariableIndexer, DEFAULT_PENALTY_WEIGHT,
};
use thiserror::Error;

/// Shift costs of the weekly instance, Sunday to Saturday, three shifts a day.
pub const WEEKLY_SHIFT_COSTS: [f64; 21] = [
    4.2, 3.5, 2.9, // Sunday
    3.1, 2.0, 1.8, // Monday
    2.8, 3.3, 1.5, // Tuesday
    3.6, 2.7, 2.9, // Wednesday
    2.2, 1.9, 3.0, // Thursday
    3.4, 2.3, 2.6, // Friday
    2.5, 3.2, 1.6, // Saturday
];

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ModelError> for ConfigError {
    fn from(err: ModelError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

/// Main scheduling configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ScheduleConfig {
    /// Cost per `(day, shift)`, indexed by `day * num_shifts + shift`.
    pub shift_costs: Vec<f64>,

    /// Schedule to substitute when decoding fails, one list of
    /// `[day, shift]` pairs per staff member.
    pub reference_schedule: Option<Vec<Vec<[usize; 2]>>>,

    /// Size of the staff × day × shift cube.
    pub dimensions: DimensionsConfig,

    /// Penalty weights for the two one-hot constraint families.
    pub penalties: PenaltyConfig,

    /// Solver gateway tuning.
    pub solver: SolverSettings,

    /// Decoder conventions.
    pub decoder: DecoderConfig,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            shift_costs: WEEKLY_SHIFT_COSTS.to_vec(),
            reference_schedule: None,
            dimensions: DimensionsConfig::default(),
            penalties: PenaltyConfig::default(),
            solver: SolverSettings::default(),
            decoder: DecoderConfig::default(),
        }
    }
}

impl ScheduleConfig {
    /// Creates the default weekly configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the cube dimensions.
    pub fn with_dimensions(mut self, num_staff: usize, num_days: usize, num_shifts: usize) -> Self {
        self.dimensions = DimensionsConfig {
            num_staff,
            num_days,
            num_shifts,
        };
        self
    }

    /// Sets the shift cost table.
    pub fn with_shift_costs(mut self, costs: impl Into<Vec<f64>>) -> Self {
        self.shift_costs = costs.into();
        self
    }

    /// Sets both penalty weights.
    pub fn with_penalties(mut self, lambda_slot: f64, lambda_staff: f64) -> Self {
        self.penalties = PenaltyConfig {
            lambda_slot,
            lambda_staff,
        };
        self
    }

    /// Sets the solver environment.
    pub fn with_environment(mut self, environment: SolverEnvironment) -> Self {
        self.solver.environment = environment;
        self
    }

    /// Sets the number of reads requested from the sampler.
    pub fn with_num_reads(mut self, num_reads: u32) -> Self {
        self.solver.num_reads = num_reads;
        self
    }

    /// Sets the gateway deadline.
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.solver.timeout_seconds = Some(seconds);
        self
    }

    /// Sets the reference schedule used when decoding fails.
    pub fn with_reference_schedule(mut self, schedule: Vec<Vec<[usize; 2]>>) -> Self {
        self.reference_schedule = Some(schedule);
        self
    }

    /// Checks every field and converts the configuration into core types.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for zero dimensions, a cost table of
    /// the wrong length or with non-finite entries, non-positive penalty
    /// weights, zero reads or annealing time, and reference schedules that do
    /// not fit the dimensions.
    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        let dims = Dimensions::new(
            self.dimensions.num_staff,
            self.dimensions.num_days,
            self.dimensions.num_shifts,
        )?;
        let costs = CostModel::new(dims, self.shift_costs.clone())?;
        let weights = PenaltyWeights::new(self.penalties.lambda_slot, self.penalties.lambda_staff)?;
        let gateway = self.solver.gateway_config()?;

        let reference = match &self.reference_schedule {
            Some(lists) => Some(reference_schedule(dims, lists)?),
            None => None,
        };

        Ok(ValidatedConfig {
            dims,
            costs,
            weights,
            gateway,
            timeout: self.solver.timeout(),
            secondary_convention: self.decoder.secondary_convention.flattening(),
            reference,
        })
    }
}

fn reference_schedule(
    dims: Dimensions,
    lists: &[Vec<[usize; 2]>],
) -> Result<Schedule, ConfigError> {
    if lists.len() != dims.num_staff() {
        return Err(ConfigError::Invalid(format!(
            "reference schedule lists {} staff, expected {}",
            lists.len(),
            dims.num_staff()
        )));
    }
    let schedule = Schedule::from_lists(
        lists
            .iter()
            .map(|l| l.iter().map(|&[day, shift]| (day, shift)).collect::<Vec<_>>()),
    );
    // Encoding checks every entry against the cube.
    schedule
        .to_sample(&VariableIndexer::canonical(dims))
        .map_err(|e| ConfigError::Invalid(format!("reference schedule: {e}")))?;
    Ok(schedule)
}

/// Cube dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DimensionsConfig {
    pub num_staff: usize,
    pub num_days: usize,
    pub num_shifts: usize,
}

impl Default for DimensionsConfig {
    fn default() -> Self {
        Self {
            num_staff: 7,
            num_days: 7,
            num_shifts: 3,
        }
    }
}

/// Penalty weights.
///
/// Each weight should exceed the largest value in `shift_costs`; otherwise a
/// constraint violation can be cheaper than a feasible assignment.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PenaltyConfig {
    /// Weight of "exactly one staff member per slot".
    pub lambda_slot: f64,

    /// Weight of "exactly one shift per staff member per day".
    pub lambda_staff: f64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            lambda_slot: DEFAULT_PENALTY_WEIGHT,
            lambda_staff: DEFAULT_PENALTY_WEIGHT,
        }
    }
}

/// Solver gateway settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverSettings {
    /// Target environment.
    pub environment: SolverEnvironment,

    /// Job description shown by the service.
    pub description: String,

    /// Number of reads.
    pub num_reads: u32,

    /// Annealing time per read.
    pub annealing_time: u32,

    /// Deadline for the gateway call. No deadline when absent.
    pub timeout_seconds: Option<u64>,
}

impl Default for SolverSettings {
    fn default() -> Self {
        let gateway = GatewayConfig::default();
        Self {
            environment: gateway.environment,
            description: gateway.description,
            num_reads: gateway.num_reads,
            annealing_time: gateway.annealing_time,
            timeout_seconds: None,
        }
    }
}

impl SolverSettings {
    /// Returns the gateway deadline, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|&s| s > 0)
            .map(Duration::from_secs)
    }

    fn gateway_config(&self) -> Result<GatewayConfig, ConfigError> {
        if self.num_reads == 0 {
            return Err(ConfigError::Invalid("num_reads must be positive".into()));
        }
        if self.annealing_time == 0 {
            return Err(ConfigError::Invalid("annealing_time must be positive".into()));
        }
        Ok(GatewayConfig {
            environment: self.environment,
            description: self.description.clone(),
            num_reads: self.num_reads,
            annealing_time: self.annealing_time,
        })
    }
}

/// Decoder settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DecoderConfig {
    /// Flattening tried when the canonical one recovers nothing.
    pub secondary_convention: SecondaryConvention,
}

/// Secondary decode convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryConvention {
    /// Fail as soon as the canonical convention recovers nothing.
    None,

    /// Day, then staff, then shift.
    DayMajor,

    /// Shift, then day, then staff.
    #[default]
    ShiftMajor,
}

impl SecondaryConvention {
    pub fn flattening(&self) -> Option<Flattening> {
        match self {
            SecondaryConvention::None => None,
            SecondaryConvention::DayMajor => Some(Flattening::DayMajor),
            SecondaryConvention::ShiftMajor => Some(Flattening::ShiftMajor),
        }
    }
}

/// Configuration checked and converted into core types.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    pub dims: Dimensions,
    pub costs: CostModel,
    pub weights: PenaltyWeights,
    pub gateway: GatewayConfig,
    pub timeout: Option<Duration>,
    pub secondary_convention: Option<Flattening>,
    pub reference: Option<Schedule>,
}
