use std::error::Error;
use std::fmt;

pub type QuatResult<T> = Result<T, QuatError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuatError {
    DivisionByZero,
}
impl fmt::Display for QuatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuatError::DivisionByZero => {
                write!(f, "Quaternion division by zero")
            }
        }
    }
}
impl Error for QuatError {}

/// Errors raised while reading the command line.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    MissingValue(String),
    InvalidAngle(String),
    InvalidAxis(String),
    InvalidMethod(String),
    InvalidFormat(String),
    UnknownFlag(String),
    Quat(QuatError),
}
impl From<QuatError> for ConfigError {
    fn from(err: QuatError) -> Self {
        Self::Quat(err)
    }
}
impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingValue(flag) => {
                write!(f, "
                    \rMissing value for {flag}",
                )
            }
            ConfigError::InvalidAngle(arg) => {
                write!(f, "
                    \rInvalid angle: {arg}",
                )
            }
            ConfigError::InvalidAxis(arg) => {
                write!(f, "
                    \rInvalid axis: {arg}
                    \rExpected x, y, z or three comma separated numbers",
                )
            }
            ConfigError::InvalidMethod(arg) => {
                write!(f, "
                    \rInvalid method: {arg}
                    \rExpected quat or rodrigues",
                )
            }
            ConfigError::InvalidFormat(arg) => {
                write!(f, "
                    \rInvalid format: {arg}
                    \rExpected rows, flat or cols",
                )
            }
            ConfigError::UnknownFlag(arg) => {
                write!(f, "
                    \rUnknown argument: {arg}",
                )
            }
            ConfigError::Quat(err) => {
                write!(f, "
                    \r{err}",
                )
            }
        }
    }
}
impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Quat(err) => Some(err),
            _ => None,
        }
    }
}

#[test]
fn quat_error_converts_into_config_error() {
    let err: ConfigError = QuatError::DivisionByZero.into();
    assert_eq!(err, ConfigError::Quat(QuatError::DivisionByZero));
    assert!(err.source().is_some());
    assert_eq!(QuatError::DivisionByZero.to_string(), "Quaternion division by zero");
}
