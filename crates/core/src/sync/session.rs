//! ERP session bootstrap
//!
//! Every job starts by trading credentials for a session token. A missing
//! cookie and a transport failure are both fatal for the run and surface as
//! `BridgeError::Auth`.

use std::fmt;

use erpbridge_domain::{BridgeError, ErpConfig, Result, SessionToken};
use tracing::{debug, error};

use crate::erp_ports::ErpGateway;

/// ERP login credentials
#[derive(Clone)]
pub struct ErpCredentials {
    pub username: String,
    pub password: String,
}

impl ErpCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl From<&ErpConfig> for ErpCredentials {
    fn from(config: &ErpConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}

impl fmt::Debug for ErpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErpCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Authenticate against the ERP or fail the run.
pub async fn open_session(
    erp: &dyn ErpGateway,
    credentials: &ErpCredentials,
) -> Result<SessionToken> {
    match erp.authenticate(&credentials.username, &credentials.password).await {
        Ok(Some(token)) => {
            debug!(username = %credentials.username, "ERP session established");
            Ok(token)
        }
        Ok(None) => {
            error!(username = %credentials.username, "Authentication with ERP failed: no session cookie");
            Err(BridgeError::Auth("ERP did not issue a session cookie".into()))
        }
        Err(err) => {
            error!(username = %credentials.username, error = %err, "Authentication with ERP failed");
            Err(BridgeError::Auth(format!("ERP authentication request failed: {err}")))
        }
    }
}
