//! Domain error types.

use std::fmt;

/// Which side of a transfer an account query was meant to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    Source,
    Destination,
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountRole::Source => write!(f, "Source"),
            AccountRole::Destination => write!(f, "Destination"),
        }
    }
}

/// Top-level error type for pocketledger.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Bill '{bill_id}' not found")]
    BillNotFound { bill_id: String },

    #[error("{role} account '{query}' not found")]
    AccountNotFound { role: AccountRole, query: String },

    #[error("Insufficient funds in {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account: String,
        balance: f64,
        requested: f64,
    },

    #[error("storage error: {reason}")]
    Storage { reason: String },

    #[error("malformed snapshot {source_name}: {reason}")]
    SnapshotParse { source_name: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("link provider error: {reason}")]
    Link { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    /// True for the lookup failures a client can correct by asking for
    /// something that exists.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::BillNotFound { .. } | LedgerError::AccountNotFound { .. }
        )
    }
}

impl From<&LedgerError> for std::process::ExitCode {
    fn from(err: &LedgerError) -> Self {
        let code: u8 = match err {
            LedgerError::Io(_)
            | LedgerError::Storage { .. }
            | LedgerError::SnapshotParse { .. } => 1,
            LedgerError::ConfigParse { .. } | LedgerError::ConfigInvalid { .. } => 2,
            LedgerError::BillNotFound { .. }
            | LedgerError::AccountNotFound { .. }
            | LedgerError::InsufficientFunds { .. }
            | LedgerError::Link { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}
