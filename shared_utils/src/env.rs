use thiserror::Error;

/// An environment variable required by the application is not set.
///
/// A variable that is present but blank counts as missing.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// This is a thin wrapper around `std::env::var` that provides a more
/// ergonomic and specific error type for missing variables.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    required(name, std::env::var(name).ok())
}

/// Reads an environment variable, falling back to `default` when it is unset or blank.
pub fn get_env_var_or(name: &str, default: &str) -> String {
    or_default(std::env::var(name).ok(), default)
}

/// Turns an already looked-up value into a required one.
///
/// Shared by [`get_env_var`] and by callers that resolve variables through
/// their own lookup function (e.g. a map in tests).
pub fn required(name: &str, value: Option<String>) -> Result<String, MissingEnvVarError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(MissingEnvVarError(name.to_string())),
    }
}

/// Returns `value` unless it is unset or blank, in which case `default` is used.
pub fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}
