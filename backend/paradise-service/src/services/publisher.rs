//! External publish sink.
//!
//! On a successful create the new content is forwarded to an external feed.
//! The call happens after the post is committed: a sink failure is reported
//! to the caller as a partial success and never rolls the post back.

use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait PublishSink: Send + Sync {
    async fn publish(&self, content: &str) -> anyhow::Result<()>;
}

/// Forwards post content to a configured webhook.
pub struct WebhookPublisher {
    client: reqwest::Client,
    url: String,
    footer: Option<String>,
}

impl WebhookPublisher {
    pub fn new(url: String, footer: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            footer,
        })
    }

    fn render(&self, content: &str) -> String {
        match &self.footer {
            Some(footer) => format!("{content}\n\n{footer}"),
            None => content.to_string(),
        }
    }
}

#[async_trait]
impl PublishSink for WebhookPublisher {
    async fn publish(&self, content: &str) -> anyhow::Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "text": self.render(content) }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("publish sink returned {status}");
        }

        Ok(())
    }
}

/// Sink used when no webhook is configured; every publish succeeds.
pub struct NoopPublisher;

#[async_trait]
impl PublishSink for NoopPublisher {
    async fn publish(&self, _content: &str) -> anyhow::Result<()> {
        Ok(())
    }
}
