//! Blocking HTTP transport towards the device.

use std::time::Duration;

use tracing::debug;

use crate::cli::ConnectionArgs;
use crate::error::CheckError;
use crate::model::PduStatus;

pub struct PduClient {
    http: reqwest::blocking::Client,
    url: String,
    user: Option<String>,
    password: String,
}

impl PduClient {
    pub fn new(conn: &ConnectionArgs) -> Result<Self, CheckError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(conn.timeout))
            .build()?;

        let path = if conn.path.starts_with('/') {
            conn.path.clone()
        } else {
            format!("/{}", conn.path)
        };

        Ok(PduClient {
            http,
            url: format!("http://{}:{}{}", conn.address, conn.port, path),
            user: conn.user.clone(),
            password: conn.password.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Performs the single GET of this invocation and decodes the payload.
    pub fn fetch_status(&self) -> Result<PduStatus, CheckError> {
        debug!(url = %self.url, "querying device");

        let mut request = self.http.get(&self.url);
        if let Some(ref user) = self.user {
            request = request.basic_auth(user, Some(&self.password));
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(CheckError::HttpStatus(status));
        }

        let body = response.text()?;
        debug!(%body, "device response");

        Ok(serde_json::from_str(&body)?)
    }
}
