//! Transport seam between the client and the remote rules service.

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{BoardResponse, BoardState, ClientConfig, ClientError, MoveCommand, ResetAck};

/// The three round trips the client makes to the rules service.
///
/// Every call is fire-once: implementations must not retry.
#[async_trait::async_trait]
pub trait GameService: Send + Sync {
    /// Fetches the current authoritative state.
    async fn fetch_board(&self) -> Result<BoardState, ClientError>;

    /// Submits a move and returns the state the service answers with.
    async fn submit_move(&self, cmd: &MoveCommand) -> Result<BoardState, ClientError>;

    /// Starts a new game. The new board must be fetched separately.
    async fn reset(&self) -> Result<(), ClientError>;
}

#[derive(Debug, Serialize)]
struct MoveRequest {
    #[serde(rename = "move")]
    token: String,
}

/// [`GameService`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpGameService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGameService {
    /// Creates a service for the configured origin.
    #[instrument(skip_all, fields(base_url = %config.server_url()))]
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            base_url: config.server_url().clone(),
            client,
        })
    }

    /// Origin requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl GameService for HttpGameService {
    #[instrument(skip(self))]
    async fn fetch_board(&self) -> Result<BoardState, ClientError> {
        debug!("Getting board via REST");

        let response: BoardResponse = self
            .client
            .get(self.url("/api/board"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        BoardState::try_from(response)
    }

    #[instrument(skip(self), fields(token = %cmd))]
    async fn submit_move(&self, cmd: &MoveCommand) -> Result<BoardState, ClientError> {
        info!("Submitting move");

        let request = MoveRequest {
            token: cmd.token(),
        };
        let response: BoardResponse = self
            .client
            .post(self.url("/api/move"))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.success == Some(false) {
            debug!(message = ?response.message, "Service declined the move");
        }
        BoardState::try_from(response)
    }

    #[instrument(skip(self))]
    async fn reset(&self) -> Result<(), ClientError> {
        info!("Requesting new game");

        let body = self
            .client
            .post(self.url("/api/reset"))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        // Any 2xx is the acknowledgement; the body is informational only.
        match serde_json::from_str::<ResetAck>(&body) {
            Ok(ack) => debug!(message = ?ack.message, "Reset acknowledged"),
            Err(_) => debug!(body = %body.trim(), "Reset acknowledged without a JSON body"),
        }
        Ok(())
    }
}
