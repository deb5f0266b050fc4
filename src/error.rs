use std::fmt;

/// Errors surfaced by route registration and configuration loading.
///
/// Dispatch itself never fails: per-entry problems (missing controller files,
/// unknown controller methods, panicking handlers) are logged and isolated so
/// that the remaining candidates still run.
#[derive(Debug)]
pub enum RouterError {
    /// A route pattern is not a valid regular expression.
    Pattern {
        /// The pattern as registered (leading separator already stripped)
        pattern: String,
        /// The regex compiler's diagnosis
        source: regex::Error,
    },
    /// A segment of a `|`-delimited method list is not a valid HTTP method.
    Method {
        /// The complete method list as passed to registration
        methods: String,
        /// The offending segment
        segment: String,
    },
    /// A `controller@method` action string could not be parsed.
    ControllerRef {
        /// The raw action string
        reference: String,
        /// Why it was rejected
        reason: &'static str,
    },
    /// The configuration file could not be read or parsed.
    Config {
        /// Path of the configuration file
        path: String,
        /// Human-readable cause
        message: String,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::Pattern { pattern, source } => {
                write!(f, "invalid route pattern '{pattern}': {source}")
            }
            RouterError::Method { methods, segment } => {
                write!(
                    f,
                    "invalid HTTP method '{segment}' in method list '{methods}'"
                )
            }
            RouterError::ControllerRef { reference, reason } => {
                write!(f, "invalid controller reference '{reference}': {reason}")
            }
            RouterError::Config { path, message } => {
                write!(f, "invalid configuration in '{path}': {message}")
            }
        }
    }
}

impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouterError::Pattern { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_pattern_error_exposes_regex_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = RouterError::Pattern {
            pattern: "(".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("invalid route pattern '('"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_method_error_message() {
        let err = RouterError::Method {
            methods: "GET|".to_string(),
            segment: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "invalid HTTP method '' in method list 'GET|'"
        );
        assert!(err.source().is_none());
    }
}
