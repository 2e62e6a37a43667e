use std::{convert::Infallible, time::Duration};

use ordermgr_programs::OrderManagerError;
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    rpc_request::{RpcError, RpcResponseErrorData},
};
use solana_sdk::{instruction::InstructionError, transaction::TransactionError};

pub(crate) use ordermgr_programs::anchor_lang::prelude::Error as AnchorLangError;

/// SDK Error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or missing configuration, e.g. an unreadable keypair file.
    #[error("configuration: {0}")]
    Configuration(String),
    /// Caller input rejected before any request was made.
    #[error("validation: {0}")]
    Validation(String),
    /// The RPC endpoint could not be reached or answered with a transport error.
    #[error("network: {0}")]
    Network(String),
    /// The transaction was sent but not confirmed in time.
    #[error("confirmation timed out after {0:?}")]
    Timeout(Duration),
    /// The program or the runtime declined the transaction.
    #[error("program rejection: {reason}")]
    ProgramRejection {
        /// Custom program error code, if any.
        code: Option<u32>,
        /// Description of the failure.
        reason: String,
        /// Program logs of the failed execution.
        logs: Vec<String>,
    },
    /// Account data could not be decoded.
    #[error("decode: {0}")]
    Decode(String),
    /// Anchor Error.
    #[error("anchor: {0}")]
    Anchor(Box<AnchorLangError>),
    /// Error from [`ordermgr_solana_utils`].
    #[error("utils: {0}")]
    SolanaUtils(ordermgr_solana_utils::Error),
}

impl Error {
    /// Create a validation error.
    pub fn validation(msg: impl ToString) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create a configuration error.
    pub fn configuration(msg: impl ToString) -> Self {
        Self::Configuration(msg.to_string())
    }

    /// Create a network error.
    pub fn network(msg: impl ToString) -> Self {
        Self::Network(msg.to_string())
    }

    /// Create a program rejection from a transaction error and the program logs.
    pub fn program_rejection(err: &TransactionError, logs: Vec<String>) -> Self {
        let code = match err {
            TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(*code),
            _ => None,
        };
        let reason = match code.and_then(OrderManagerError::from_code) {
            Some(known) => format!("{known}: {}", known.message()),
            None => err.to_string(),
        };
        Self::ProgramRejection { code, reason, logs }
    }

    /// Classify a Solana client error.
    ///
    /// Transaction errors, including the ones reported by preflight simulation,
    /// become [`Error::ProgramRejection`]; everything else is a [`Error::Network`] error.
    pub fn from_client_error(err: ClientError) -> Self {
        match &err.kind {
            ClientErrorKind::TransactionError(tx_err) => Self::program_rejection(tx_err, vec![]),
            ClientErrorKind::RpcError(RpcError::RpcResponseError {
                data: RpcResponseErrorData::SendTransactionPreflightFailure(result),
                ..
            }) => match &result.err {
                Some(tx_err) => {
                    Self::program_rejection(tx_err, result.logs.clone().unwrap_or_default())
                }
                None => Self::Network(err.to_string()),
            },
            _ => Self::Network(err.to_string()),
        }
    }

    /// Get the custom program error code if this is a program rejection.
    pub fn anchor_error_code(&self) -> Option<u32> {
        match self {
            Self::ProgramRejection { code, .. } => *code,
            _ => None,
        }
    }

    /// Get the program logs attached to a program rejection.
    pub fn program_logs(&self) -> &[String] {
        match self {
            Self::ProgramRejection { logs, .. } => logs,
            _ => &[],
        }
    }

    /// Returns whether the error was raised before contacting the ledger.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<AnchorLangError> for Error {
    fn from(value: AnchorLangError) -> Self {
        Self::Anchor(Box::new(value))
    }
}

impl From<ordermgr_solana_utils::Error> for Error {
    fn from(value: ordermgr_solana_utils::Error) -> Self {
        use ordermgr_solana_utils::Error as UtilsError;

        match value {
            UtilsError::Client(err) => Self::from_client_error(*err),
            UtilsError::ConfirmationTimeout(timeout) => Self::Timeout(timeout),
            UtilsError::BlockhashExpired => {
                Self::Network("blockhash expired before confirmation".to_string())
            }
            other => Self::SolanaUtils(other),
        }
    }
}

impl From<strum::ParseError> for Error {
    fn from(_: strum::ParseError) -> Self {
        Self::validation("unrecognized order status")
    }
}

impl From<Infallible> for Error {
    fn from(value: Infallible) -> Self {
        match value {}
    }
}
