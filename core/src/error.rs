use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Authentication failed")]
    Unauthorized,
    #[error("{0}")]
    Rejected(String),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Subscription already released")]
    SubscriptionReleased,
}
