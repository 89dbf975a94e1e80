//! HTTP plumbing shared by every bot API operation.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, warn};

use courier_core::config::BotConfig;
use courier_core::error::CourierError;
use courier_core::logger::{LogFile, Logger};
use courier_core::types::Envelope;

use crate::form::Form;

/// How a request carries its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verb {
    /// Query string. Used by the read-only chat lookups.
    Get,
    /// Form-encoded body.
    Post,
}

/// Client for the bot API.
///
/// Cheap to clone; clones share the connection pool and logger.
#[derive(Clone)]
pub struct BotClient {
    http: reqwest::Client,
    base_url: String,
    channel_name: String,
    logger: Arc<dyn Logger>,
}

impl BotClient {
    /// Build a client from config. Requests go to
    /// `{api_access_point}{access_token}/{method}`.
    pub fn new(config: &BotConfig, logger: Arc<dyn Logger>) -> Result<Self, CourierError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        if config.access_token.is_empty() {
            warn!("bot access token is empty; API calls will be rejected");
        }
        Ok(Self {
            http: builder.build()?,
            base_url: format!("{}{}", config.api_access_point, config.access_token),
            channel_name: config.channel_name.clone(),
            logger,
        })
    }

    /// Channel targeted by [`BotClient::post_to_channel`].
    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// Issue one request and decode its envelope.
    ///
    /// Logs the start and outcome of the call. A remote rejection (`ok:
    /// false`) is returned as a decoded envelope, not as an error.
    pub(crate) async fn call<T>(
        &self,
        verb: Verb,
        method: &str,
        action: &str,
        form: Form,
    ) -> Result<Envelope<T>, CourierError>
    where
        T: DeserializeOwned + Serialize + Debug,
    {
        self.logger
            .log(&format!("Started {action} {form}"), LogFile::Bot);

        let url = format!("{}/{method}", self.base_url);
        let request = match verb {
            Verb::Get => self.http.get(&url).query(form.fields()),
            Verb::Post => self.http.post(&url).form(form.fields()),
        };

        let body = match request.send().await {
            Ok(resp) => resp.text().await,
            Err(e) => Err(e),
        };
        let body = match body {
            Ok(b) => b,
            Err(e) => {
                self.logger
                    .log(&format!("Error: For {action} {form}, {e}"), LogFile::Error);
                return Err(e.into());
            }
        };

        let envelope: Envelope<T> = match serde_json::from_str(&body) {
            Ok(env) => env,
            Err(e) => {
                self.logger.log(
                    &format!("Error: For {action}, unable to parse response {form}, {e}"),
                    LogFile::Error,
                );
                return Err(e.into());
            }
        };

        debug!(method, ok = envelope.ok, "bot api call finished");
        self.logger.log(
            &format!(
                "Finished {action}, Bot Response => {}",
                envelope.to_log_string()
            ),
            LogFile::Bot,
        );
        Ok(envelope)
    }
}
