#[derive(Debug, thiserror::Error)]
pub enum WhitelistError {
    #[error("invalid origin pattern: {0}")]
    InvalidPattern(String),

    #[error("unparseable url: {0}")]
    UnparseableUrl(String),
}

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("message payload is not valid JSON: {0}")]
    InvalidPayload(String),

    #[error("data validator rejected message: {0}")]
    DataRejected(String),

    #[error("metadata validator rejected message: {0}")]
    MetaRejected(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("native command failed: {0}")]
    CommandFailed(String),

    #[error("external opener failed: {0}")]
    OpenerFailed(String),

    #[error("bridge detached")]
    Detached,
}

#[derive(Debug, thiserror::Error)]
pub enum WebpaneError {
    #[error(transparent)]
    Whitelist(#[from] WhitelistError),

    #[error(transparent)]
    Message(#[from] MessageError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error("{0}")]
    Other(String),
}
