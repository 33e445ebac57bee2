use std::time::Duration;

use crate::{error::Result, fix::PvtFix};

/// One periodically fetchable position/status resource.
///
/// The trait exists so the poll loops can be driven by scripted sources in
/// tests; production uses [HttpFixSource].
#[allow(async_fn_in_trait)]
pub trait FixSource {
    async fn fetch(&self) -> Result<PvtFix>;
}

/// HTTP GET source for the receiver bridge's JSON document.
pub struct HttpFixSource {
    url: String,
    client: reqwest::Client,
}

impl HttpFixSource {
    /// Builds a source with a client-level request timeout. A timed-out or
    /// failed request surfaces as a soft [crate::error::Error::Fetch].
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FixSource for HttpFixSource {
    async fn fetch(&self) -> Result<PvtFix> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}
