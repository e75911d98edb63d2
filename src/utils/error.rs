use thiserror::Error;

#[derive(Error, Debug)]
pub enum PeerFinderError {
    #[error("Got {count} records for AS{asn}, expected exactly one (does the ASN exist in PeeringDB?)")]
    UnexpectedRecordCount { asn: u32, count: usize },

    #[error("No peers given, nothing to compare")]
    EmptyPeerList,

    #[error("No entry named '{name}' found")]
    NotFound { name: String },

    #[error("Malformed record for AS{asn} at '{path}': {message}")]
    MalformedRecord {
        asn: u32,
        path: String,
        message: String,
    },

    #[error("Unexpected status {status} fetching AS{asn}: {body}")]
    HttpStatus { asn: u32, status: u16, body: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Didn't find any {kind}")]
    NoResults { kind: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PeerFinderError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PeerFinderError::NotFound { .. } => ErrorSeverity::Low,
            PeerFinderError::ApiError(_) | PeerFinderError::HttpStatus { .. } => {
                ErrorSeverity::Medium
            }
            PeerFinderError::UnexpectedRecordCount { .. }
            | PeerFinderError::MalformedRecord { .. }
            | PeerFinderError::SerializationError(_)
            | PeerFinderError::CsvError(_)
            | PeerFinderError::ConfigError { .. }
            | PeerFinderError::InvalidConfigValueError { .. }
            | PeerFinderError::NoResults { .. } => ErrorSeverity::High,
            PeerFinderError::EmptyPeerList | PeerFinderError::IoError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PeerFinderError::UnexpectedRecordCount { .. } => {
                "Check the ASN is correct and has a network record in PeeringDB"
            }
            PeerFinderError::EmptyPeerList => "Pass at least one ASN with --asn",
            PeerFinderError::NotFound { .. } => "The entry is absent for this peer",
            PeerFinderError::MalformedRecord { .. } | PeerFinderError::SerializationError(_) => {
                "The API returned data in an unexpected shape; check --api-endpoint"
            }
            PeerFinderError::HttpStatus { status, .. } if *status == 429 => {
                "Rate limited by PeeringDB; retry later or set PEERINGDB_API_KEY"
            }
            PeerFinderError::HttpStatus { .. } | PeerFinderError::ApiError(_) => {
                "Check network connectivity and the API endpoint, then retry"
            }
            PeerFinderError::CsvError(_) | PeerFinderError::IoError(_) => {
                "Check that stdout is writable"
            }
            PeerFinderError::ConfigError { .. }
            | PeerFinderError::InvalidConfigValueError { .. } => {
                "Fix the command line flags or config file; see --help"
            }
            PeerFinderError::NoResults { .. } => "Try --missing to see where the peers differ",
        }
    }

    /// Every error ends the run unsuccessfully, so no severity maps to 0.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, PeerFinderError>;
