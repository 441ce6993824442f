//! Payment-link provider port trait.

use crate::domain::error::LedgerError;

/// Credentials handed back after a public token exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCredentials {
    pub access_token: String,
    pub item_id: String,
}

pub trait LinkProviderPort {
    fn create_link_token(&self) -> Result<String, LedgerError>;

    fn exchange_public_token(&self, public_token: &str) -> Result<LinkCredentials, LedgerError>;
}
