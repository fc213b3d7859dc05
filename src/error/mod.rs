use std::collections::TryReserveError;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;

pub use codes::ErrorCode;

/// The unified error type for primesum
///
/// Every variant is fatal to the run. There is no local recovery and no
/// partial result once one of these has been produced.
#[derive(Error, Debug)]
pub enum PrimesumError {
    #[error("[E{code:04}] Invalid argument: {message}")]
    InvalidArgument {
        code: u16,
        message: String,
        argument: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Resource exhaustion: {message}")]
    ResourceExhaustion {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Overflow: {message}")]
    Overflow {
        code: u16,
        message: String,
        worker_id: Option<usize>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Worker failure: {message}")]
    WorkerPanicked {
        code: u16,
        message: String,
        worker_id: Option<usize>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Cancelled: {message}")]
    Cancelled {
        code: u16,
        message: String,
        /// Signal that tripped cancellation, when one did
        signal: Option<i32>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PrimesumError {
    /// Create an invalid argument error with specific code and argument name
    pub fn invalid_argument_with_code(
        code: u16,
        message: impl Into<String>,
        argument: Option<String>,
    ) -> Self {
        Self::InvalidArgument {
            code,
            message: message.into(),
            argument,
            source: None,
        }
    }

    /// Create a resource exhaustion error with specific code
    pub fn resource_exhaustion(code: u16, message: impl Into<String>) -> Self {
        Self::ResourceExhaustion {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create an overflow error, optionally attributed to a worker
    pub fn overflow(code: u16, message: impl Into<String>, worker_id: Option<usize>) -> Self {
        Self::Overflow {
            code,
            message: message.into(),
            worker_id,
            source: None,
        }
    }

    pub fn worker_panicked(worker_id: usize, message: impl Into<String>) -> Self {
        Self::WorkerPanicked {
            code: ErrorCode::WORKER_PANICKED,
            message: message.into(),
            worker_id: Some(worker_id),
            source: None,
        }
    }

    /// Create a cancellation error with specific code
    pub fn cancelled(code: u16, message: impl Into<String>) -> Self {
        Self::Cancelled {
            code,
            message: message.into(),
            signal: None,
            source: None,
        }
    }

    /// Create a configuration error with specific code and path
    pub fn config_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::InvalidArgument { source: src, .. }
            | Self::ResourceExhaustion { source: src, .. }
            | Self::Overflow { source: src, .. }
            | Self::WorkerPanicked { source: src, .. }
            | Self::Cancelled { source: src, .. }
            | Self::Config { source: src, .. } => {
                *src = Some(source.into());
            }
        }
        self
    }

    /// Attach a path to a configuration error
    pub fn with_path(mut self, new_path: impl Into<PathBuf>) -> Self {
        if let Self::Config { path, .. } = &mut self {
            *path = Some(new_path.into());
        }
        self
    }

    /// Attribute an overflow or worker failure to a worker id
    pub fn with_worker(mut self, id: usize) -> Self {
        match &mut self {
            Self::Overflow { worker_id, .. } | Self::WorkerPanicked { worker_id, .. } => {
                *worker_id = Some(id);
            }
            _ => {}
        }
        self
    }

    /// Record the signal behind a cancellation
    pub fn with_signal(mut self, new_signal: Option<i32>) -> Self {
        if let Self::Cancelled { signal, .. } = &mut self {
            *signal = new_signal;
        }
        self
    }

    /// Get the process exit code for this error
    ///
    /// Cancellation exits with 128 plus the signal number, or 130 when no
    /// signal was recorded.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Cancelled {
                signal: Some(signal),
                ..
            } => 128 + signal,
            Self::Cancelled { .. } => 130,
            Self::InvalidArgument { .. }
            | Self::ResourceExhaustion { .. }
            | Self::Overflow { .. }
            | Self::WorkerPanicked { .. }
            | Self::Config { .. } => 1,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::InvalidArgument { code, .. }
            | Self::ResourceExhaustion { code, .. }
            | Self::Overflow { code, .. }
            | Self::WorkerPanicked { code, .. }
            | Self::Cancelled { code, .. }
            | Self::Config { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidArgument {
                message, argument, ..
            } => {
                if let Some(arg) = argument {
                    format!("Invalid value for <{}>: {}", arg, message)
                } else {
                    format!("Invalid argument: {}", message)
                }
            }
            Self::ResourceExhaustion { message, .. } => format!("Out of resources: {}", message),
            Self::Overflow {
                message, worker_id, ..
            } => {
                if let Some(id) = worker_id {
                    format!("Overflow in worker {}: {}", id, message)
                } else {
                    format!("Overflow: {}", message)
                }
            }
            Self::WorkerPanicked {
                message, worker_id, ..
            } => {
                if let Some(id) = worker_id {
                    format!("Worker {} failed: {}", id, message)
                } else {
                    format!("Worker failed: {}", message)
                }
            }
            Self::Cancelled {
                message, signal, ..
            } => match signal {
                Some(signal) => format!("Run cancelled by signal {}: {}", signal, message),
                None => format!("Run cancelled: {}", message),
            },
            Self::Config { message, path, .. } => {
                if let Some(p) = path {
                    format!("Configuration problem in {}: {}", p.display(), message)
                } else {
                    format!("Configuration problem: {}", message)
                }
            }
        }
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let mut msg = format!("{}", self);
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            msg.push_str(&format!("\n  caused by: {}", cause));
            source = cause.source();
        }
        msg
    }

    /// Whether this error stems from bad user input
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// Type alias for Results using PrimesumError
pub type Result<T> = std::result::Result<T, PrimesumError>;

/// Type alias for application Results (using anyhow for flexibility)
pub type AppResult<T> = anyhow::Result<T>;

impl From<std::io::Error> for PrimesumError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let (code, message) = match err.kind() {
            ErrorKind::NotFound => (ErrorCode::CONFIG_NOT_FOUND, "Configuration file not found"),
            _ => (ErrorCode::CONFIG_IO_ERROR, "Failed to read configuration"),
        };

        PrimesumError::config_with_code(code, message, None).with_source(err)
    }
}

impl From<toml::de::Error> for PrimesumError {
    fn from(err: toml::de::Error) -> Self {
        PrimesumError::config_with_code(ErrorCode::CONFIG_INVALID_TOML, "Invalid TOML syntax", None)
            .with_source(err)
    }
}

impl From<TryReserveError> for PrimesumError {
    fn from(err: TryReserveError) -> Self {
        PrimesumError::resource_exhaustion(
            ErrorCode::RESOURCE_ALLOCATION_FAILED,
            "Failed to allocate the work-assignment table",
        )
        .with_source(err)
    }
}
