use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish between a missing query target,
/// bad arguments and genuine failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// The requested benchmark or rule does not exist
    NotFound = 1,
    /// Invalid command-line arguments (clap parsing errors or conflicting selectors)
    InvalidArguments = 2,
    /// Application error (parse error, store missing, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::NotFound => write!(f, "Not Found (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised while ingesting benchmark sources or querying the catalog.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// keeping the user-facing hints next to the variants they belong to.
#[derive(Debug, Error)]
pub enum StigError {
    #[error("Failed to parse benchmark data: {details}\n\n💡 Hint: The source file does not match the expected XCCDF benchmark layout")]
    Parse { details: String },

    #[error("Duplicate benchmark title: {title}\n\n💡 Hint: Two source files normalize to the same title, version and release. Remove the duplicate file and run `stig init` again")]
    DuplicateTitle { title: String },

    #[error("Duplicate rule ID: {rule_id} (benchmark: {title})\n\n💡 Hint: Rule IDs must be unique across all benchmarks. Remove the duplicate file and run `stig init` again")]
    DuplicateRuleId { rule_id: String, title: String },

    #[error("Catalog not found at {path}\n\n💡 Hint: Run `stig init` before querying")]
    StoreNotInitialized { path: PathBuf },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("I/O error on {path}\nDetails: {details}\n\n💡 Hint: Please verify that the path exists and you have the required permissions")]
    Io { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    Security {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl StigError {
    pub fn parse(details: impl Into<String>) -> Self {
        StigError::Parse {
            details: details.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        StigError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        StigError::NotFound { what: what.into() }
    }

    pub fn io(path: impl Into<PathBuf>, err: impl fmt::Display) -> Self {
        StigError::Io {
            path: path.into(),
            details: err.to_string(),
        }
    }

    /// Prefixes a parse failure with the name of the source it came from.
    /// Other variants pass through unchanged.
    pub fn in_source(self, source_name: &str) -> Self {
        match self {
            StigError::Parse { details } => StigError::Parse {
                details: format!("{}: {}", source_name, details),
            },
            other => other,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            StigError::NotFound { .. } => ExitCode::NotFound,
            StigError::InvalidArgument { .. } => ExitCode::InvalidArguments,
            _ => ExitCode::ApplicationError,
        }
    }
}
