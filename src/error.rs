use std::env;
use std::fmt::{self, Debug, Display};

pub const ENV_VAR_ERROR: i32 = 1;
pub const DATABASE_ERROR: i32 = 2;
pub const INVALID_CONFIGURATION_ERROR: i32 = 100;
pub const MISSING_CONFIGURATION_ERROR: i32 = 101;

/// Codes `1..=99` are internal failures, `100..` are problems the caller can fix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn is_internal(&self) -> bool {
        matches!(self.code, 1..=99)
    }

    pub fn is_invalid_configuration_error(&self) -> bool {
        self.code == INVALID_CONFIGURATION_ERROR
    }

    pub fn is_missing_configuration_error(&self) -> bool {
        self.code == MISSING_CONFIGURATION_ERROR
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        database_error(err)
    }
}

pub fn invalid_configuration_error(detail: impl Into<String>) -> Error {
    Error {
        code: INVALID_CONFIGURATION_ERROR,
        message: format!("invalid configuration: {}", detail.into()),
    }
}

pub fn missing_configuration_error() -> Error {
    Error {
        code: MISSING_CONFIGURATION_ERROR,
        message: "missing pricing configuration".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: ENV_VAR_ERROR,
        message: "environment variable error".into(),
    }
}

pub fn database_error<T: Debug>(err: T) -> Error {
    tracing::error!("database error: {:?}", err);

    Error {
        code: DATABASE_ERROR,
        message: "database error".into(),
    }
}
