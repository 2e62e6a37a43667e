use std::time::Duration;

/// Error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Parse url error.
    #[error("parse url: {0}")]
    ParseUrl(#[from] url::ParseError),
    /// Parse cluster error.
    #[error("parse cluster: {0}")]
    ParseCluster(&'static str),
    /// Compile message error.
    #[error("compile message: {0}")]
    CompileMessage(#[from] solana_sdk::message::CompileError),
    /// Client error.
    #[cfg(client)]
    #[error("client: {0}")]
    Client(#[from] Box<solana_client::client_error::ClientError>),
    /// Signer error.
    #[error("signer: {0}")]
    Signer(#[from] solana_sdk::signer::SignerError),
    /// The transaction was not confirmed in time.
    #[error("transaction was not confirmed within {0:?}")]
    ConfirmationTimeout(Duration),
    /// The blockhash of the transaction expired before it was confirmed.
    #[error("blockhash expired before the transaction was confirmed")]
    BlockhashExpired,
}
