use crate::core::{BrowserConfig, BrowserTrait};
use crate::errors::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// A launched driver with an explicit close.
///
/// `close` consumes the session; dropping an open session only logs, since
/// shutting a driver down is async.
pub struct BrowserSession<B: BrowserTrait> {
    browser: B,
    session_id: String,
    opened_at: DateTime<Utc>,
    closed: bool,
}

impl<B: BrowserTrait> BrowserSession<B> {
    pub async fn open(mut browser: B, config: &BrowserConfig) -> Result<Self> {
        browser.launch(config).await?;
        let session_id = uuid::Uuid::new_v4().to_string();
        debug!("Browser session {} opened", session_id);

        Ok(Self {
            browser,
            session_id,
            opened_at: Utc::now(),
            closed: false,
        })
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub async fn close(mut self) -> Result<()> {
        self.closed = true;
        let result = self.browser.close().await;
        debug!(
            "Browser session {} closed after {}s",
            self.session_id,
            (Utc::now() - self.opened_at).num_seconds()
        );
        result
    }
}

impl<B: BrowserTrait> Drop for BrowserSession<B> {
    fn drop(&mut self) {
        if !self.closed {
            warn!("Browser session {} dropped without close", self.session_id);
        }
    }
}
