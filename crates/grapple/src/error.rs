/// Errors raised while configuring trackers and gesture timings.
///
/// All of these are reported at construction time. Gesture events never fail;
/// inconsistent events are logged and ignored instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No classifier was registered.
    MissingClassifier,

    /// No resolver was registered.
    MissingResolver,

    /// More than one classifier was registered on the same builder.
    AmbiguousClassifier,

    /// More than one resolver was registered on the same builder.
    AmbiguousResolver,

    /// A payload-based callback was registered but the tracker carries no payload.
    MissingPayload { callback: &'static str },

    /// A timing knob was zero.
    InvalidTiming { name: &'static str },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingClassifier => write!(f, "No drag classifier registered"),
            ConfigError::MissingResolver => write!(f, "No drop resolver registered"),
            ConfigError::AmbiguousClassifier => {
                write!(f, "More than one drag classifier registered")
            }
            ConfigError::AmbiguousResolver => write!(f, "More than one drop resolver registered"),
            ConfigError::MissingPayload { callback } => write!(
                f,
                "The {} callback takes a payload but no payload was attached",
                callback
            ),
            ConfigError::InvalidTiming { name } => {
                write!(f, "Gesture timing `{}` must be a positive duration", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result type for tracker and config construction.
pub type ConfigResult<T> = Result<T, ConfigError>;
