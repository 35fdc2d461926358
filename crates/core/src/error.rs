//! Error type shared by the geometry provider and the solver entry points
//!
//! None of these errors are retried internally; every one propagates
//! synchronously to the caller of the solve entry point.

/// Errors that can occur while building a lattice or solving for circulation
#[derive(Debug, Clone, PartialEq)]
pub enum VlmError {
    /// A solver or flow parameter is out of range; no solve was attempted
    InvalidConfiguration(String),
    /// The influence matrix could not be factorised or produced non-finite
    /// circulation; no circulation values were published
    SingularSystem {
        /// Dimension of the square system that failed
        size: usize,
    },
    /// The geometry provider produced a lattice that cannot be meshed
    DegenerateGeometry(String),
}

impl VlmError {
    /// Create error for an invalid configuration parameter.
    ///
    /// # Arguments
    /// * `param_name` - The name of the invalid parameter (e.g., `"wake_iterations"`)
    /// * `message` - A description of the constraint that was violated
    pub fn invalid_parameter(param_name: &str, message: &str) -> Self {
        VlmError::InvalidConfiguration(format!("{param_name}: {message}"))
    }

    /// Create error for a degenerate geometry definition.
    pub fn degenerate(message: impl Into<String>) -> Self {
        VlmError::DegenerateGeometry(message.into())
    }
}

impl std::fmt::Display for VlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VlmError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {msg}"),
            VlmError::SingularSystem { size } => write!(
                f,
                "Singular influence system ({size}x{size}): check for duplicate or zero-area panels"
            ),
            VlmError::DegenerateGeometry(msg) => write!(f, "Degenerate geometry: {msg}"),
        }
    }
}

impl std::error::Error for VlmError {}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, VlmError>;
