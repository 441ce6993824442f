//! Placeholder payment-link provider. Talks to nothing; fabricates tokens
//! so the link flow can be exercised end to end.

use crate::domain::error::LedgerError;
use crate::ports::link_port::{LinkCredentials, LinkProviderPort};
use uuid::Uuid;

pub const PLACEHOLDER_LINK_TOKEN: &str = "link-sandbox-placeholder";

#[derive(Debug, Default, Clone)]
pub struct StubLinkAdapter;

impl LinkProviderPort for StubLinkAdapter {
    fn create_link_token(&self) -> Result<String, LedgerError> {
        Ok(PLACEHOLDER_LINK_TOKEN.to_string())
    }

    fn exchange_public_token(&self, public_token: &str) -> Result<LinkCredentials, LedgerError> {
        if public_token.trim().is_empty() {
            return Err(LedgerError::Link {
                reason: "public token is empty".to_string(),
            });
        }
        Ok(LinkCredentials {
            access_token: format!("access-sandbox-{}", Uuid::new_v4()),
            item_id: format!("item-sandbox-{}", Uuid::new_v4()),
        })
    }
}
