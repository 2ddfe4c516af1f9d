use std::fmt;

#[derive(Debug, Clone)]
pub enum LinkletError {
    InvalidUrl(String),
    InvalidCode(String),
    InvalidValidity(String),
    CodeTaken(String),
    NotFound(String),
    Expired(String),
    Unauthorized(String),
    Forbidden(String),
    InvalidLogEntry(String),
    Serialization(String),
    FileOperation(String),
}

impl LinkletError {
    /// Stable error code, used in logs and diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            LinkletError::InvalidUrl(_) => "E001",
            LinkletError::InvalidCode(_) => "E002",
            LinkletError::InvalidValidity(_) => "E003",
            LinkletError::CodeTaken(_) => "E004",
            LinkletError::NotFound(_) => "E005",
            LinkletError::Expired(_) => "E006",
            LinkletError::Unauthorized(_) => "E007",
            LinkletError::Forbidden(_) => "E008",
            LinkletError::InvalidLogEntry(_) => "E009",
            LinkletError::Serialization(_) => "E010",
            LinkletError::FileOperation(_) => "E011",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            LinkletError::InvalidUrl(_) => "Invalid URL",
            LinkletError::InvalidCode(_) => "Invalid Short Code",
            LinkletError::InvalidValidity(_) => "Invalid Validity Window",
            LinkletError::CodeTaken(_) => "Short Code Taken",
            LinkletError::NotFound(_) => "Resource Not Found",
            LinkletError::Expired(_) => "Link Expired",
            LinkletError::Unauthorized(_) => "Unauthorized",
            LinkletError::Forbidden(_) => "Access Denied",
            LinkletError::InvalidLogEntry(_) => "Invalid Log Entry",
            LinkletError::Serialization(_) => "Serialization Error",
            LinkletError::FileOperation(_) => "File Operation Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            LinkletError::InvalidUrl(msg) => msg,
            LinkletError::InvalidCode(msg) => msg,
            LinkletError::InvalidValidity(msg) => msg,
            LinkletError::CodeTaken(msg) => msg,
            LinkletError::NotFound(msg) => msg,
            LinkletError::Expired(msg) => msg,
            LinkletError::Unauthorized(msg) => msg,
            LinkletError::Forbidden(msg) => msg,
            LinkletError::InvalidLogEntry(msg) => msg,
            LinkletError::Serialization(msg) => msg,
            LinkletError::FileOperation(msg) => msg,
        }
    }
}

impl fmt::Display for LinkletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for LinkletError {}

impl LinkletError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        LinkletError::InvalidUrl(msg.into())
    }

    pub fn invalid_code<T: Into<String>>(msg: T) -> Self {
        LinkletError::InvalidCode(msg.into())
    }

    pub fn invalid_validity<T: Into<String>>(msg: T) -> Self {
        LinkletError::InvalidValidity(msg.into())
    }

    pub fn code_taken<T: Into<String>>(msg: T) -> Self {
        LinkletError::CodeTaken(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkletError::NotFound(msg.into())
    }

    pub fn expired<T: Into<String>>(msg: T) -> Self {
        LinkletError::Expired(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        LinkletError::Unauthorized(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        LinkletError::Forbidden(msg.into())
    }

    pub fn invalid_log_entry<T: Into<String>>(msg: T) -> Self {
        LinkletError::InvalidLogEntry(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkletError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LinkletError::FileOperation(msg.into())
    }
}

impl From<std::io::Error> for LinkletError {
    fn from(err: std::io::Error) -> Self {
        LinkletError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinkletError {
    fn from(err: serde_json::Error) -> Self {
        LinkletError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkletError>;
