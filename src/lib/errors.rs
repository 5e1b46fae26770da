use std::fmt;

#[derive(Clone, Debug)]
pub enum AppError {
    /// Client-side precondition failure; never reaches the network.
    Validation(String),
    /// The server rejected the credentials or the bearer token.
    Unauthorized(String),
    Network(String),
    Timeout(String),
    /// Non-2xx response carrying the server's message.
    Server { status: u16, message: String },
    Parse(String),
    Serialization(String),
}

impl AppError {
    /// HTTP status behind this error, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Unauthorized(_) => Some(401),
            AppError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(message)
            | AppError::Unauthorized(message)
            | AppError::Network(message)
            | AppError::Timeout(message) => write!(formatter, "{message}"),
            AppError::Server { message, .. } => write!(formatter, "{message}"),
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}
