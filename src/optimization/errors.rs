use argmin::core::{ArgminError, Error};

/// Crate-wide result alias for fitting and target-search operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Curve data ----
    /// Targets and values must have the same length.
    SeriesLengthMismatch {
        targets: usize,
        values: usize,
    },

    /// Fewer points than the fit requires.
    InsufficientData {
        points: usize,
        required: usize,
    },

    /// A target or value is NaN/±inf.
    NonFiniteData {
        index: usize,
        value: f64,
    },

    /// The power-log family is only defined for strictly positive targets.
    NonPositiveTarget {
        target: f64,
    },

    // ---- Curve parameters ----
    /// Parameter vector has the wrong length.
    ParamLengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// Parameters must be finite.
    InvalidParam {
        index: usize,
        value: f64,
    },

    // ---- Model evaluation ----
    /// Curve evaluation overflowed or produced NaN.
    NonFinitePrediction {
        target: f64,
        value: f64,
    },

    /// Derivative evaluation overflowed or produced NaN.
    NonFiniteGradient {
        target: f64,
        value: f64,
    },

    // ---- FitOptions ----
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },

    /// Tolerance needs to be positive and finite.
    InvalidTolerance {
        tol: f64,
        reason: &'static str,
    },

    /// Simplex perturbation needs to be positive and finite.
    InvalidPerturbation {
        value: f64,
        reason: &'static str,
    },

    /// Acceptance threshold for R² must lie in [0, 1).
    InvalidRSquaredThreshold {
        value: f64,
    },

    /// A fit needs at least three points for three parameters.
    InvalidMinPoints {
        min_points: usize,
    },

    // ---- OptimizationConfig ----
    /// Target bounds must be finite with 0 < min < max.
    InvalidTargetBounds {
        min: f64,
        max: f64,
        reason: &'static str,
    },

    /// Initial target must lie inside the bounds.
    InitialTargetOutOfBounds {
        initial: f64,
        min: f64,
        max: f64,
    },

    /// Learning rate needs to be positive and finite.
    InvalidLearningRate {
        value: f64,
    },

    // ---- Optimizer outcome ----
    /// Best parameter vector missing from the solver state.
    MissingThetaHat,

    /// Estimated parameters must be finite.
    InvalidThetaHat {
        index: usize,
        value: f64,
    },

    /// Target missing from the solver state.
    MissingTarget,

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Curve data ----
            OptError::SeriesLengthMismatch { targets, values } => {
                write!(f, "Series length mismatch: {targets} targets, {values} values")
            }
            OptError::InsufficientData { points, required } => {
                write!(f, "Insufficient data: {points} points, at least {required} required")
            }
            OptError::NonFiniteData { index, value } => {
                write!(f, "Non-finite data at index {index}: {value}")
            }
            OptError::NonPositiveTarget { target } => {
                write!(f, "Target {target} outside the power-log domain, must be > 0")
            }

            // ---- Curve parameters ----
            OptError::ParamLengthMismatch { expected, actual } => {
                write!(f, "Parameter length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidParam { index, value } => {
                write!(f, "Invalid parameter at index {index}: {value}, must be finite")
            }

            // ---- Model evaluation ----
            OptError::NonFinitePrediction { target, value } => {
                write!(f, "Non-finite prediction at target {target}: {value}")
            }
            OptError::NonFiniteGradient { target, value } => {
                write!(f, "Non-finite gradient at target {target}: {value}")
            }

            // ---- FitOptions ----
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::InvalidTolerance { tol, reason } => {
                write!(f, "Invalid tolerance {tol}: {reason}")
            }
            OptError::InvalidPerturbation { value, reason } => {
                write!(f, "Invalid simplex perturbation {value}: {reason}")
            }
            OptError::InvalidRSquaredThreshold { value } => {
                write!(f, "Invalid R² threshold {value}, must lie in [0, 1)")
            }
            OptError::InvalidMinPoints { min_points } => {
                write!(f, "Invalid minimum point count {min_points}, must be at least 3")
            }

            // ---- OptimizationConfig ----
            OptError::InvalidTargetBounds { min, max, reason } => {
                write!(f, "Invalid target bounds [{min}, {max}]: {reason}")
            }
            OptError::InitialTargetOutOfBounds { initial, min, max } => {
                write!(f, "Initial target {initial} outside bounds [{min}, {max}]")
            }
            OptError::InvalidLearningRate { value } => {
                write!(f, "Invalid learning rate {value}, must be finite and > 0")
            }

            // ---- Optimizer outcome ----
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }
            OptError::InvalidThetaHat { index, value } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}")
            }
            OptError::MissingTarget => {
                write!(f, "Missing target in solver state")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}
