/// Remote recommendation/catalog API provider
///
/// Talks JSON over HTTP to the recommendation backend. Recommendation endpoints map onto
/// `SourceError` so the resolver can classify failures, and catalog/account endpoints
/// map onto `AppError` so handlers can surface them.
use crate::{
    error::{AppError, AppResult, SourceError, SourceResult},
    models::{
        game::{ApiCatalogGame, ApiGameDetails},
        user::{ApiInteractionBody, ApiLoginBody, ApiRegistrationBody, ApiUserEnvelope},
        GameDetails, GameSummary, InteractionRequest, InteractionStatus, RecommendationItem,
        RegistrationRequest, Session, UserId,
    },
    services::providers::{
        endpoints::{interaction_check_path, Endpoint},
        CatalogProvider, RecommendationSource,
    },
};
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Clone)]
pub struct RemoteApiProvider {
    http_client: HttpClient,
    api_url: String,
}

impl RemoteApiProvider {
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// GET a path and decode the JSON body, classifying failures for the resolver
    async fn get_json_source(&self, path: &str) -> SourceResult<Value> {
        let response = self.http_client.get(self.url(path)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                SourceError::Parse(e.to_string())
            } else {
                SourceError::Transport(e)
            }
        })
    }

    /// Decodes a successful response, or turns a failed one into an `AppError`
    async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_upstream_error(status, &body));
        }

        Ok(response.json::<T>().await?)
    }
}

/// Extracts the human-readable message the remote API puts in error bodies
pub fn upstream_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn map_upstream_error(status: StatusCode, body: &str) -> AppError {
    let message = upstream_message(body);

    match status {
        StatusCode::NOT_FOUND => {
            AppError::NotFound(message.unwrap_or_else(|| "Resource not found".to_string()))
        }
        StatusCode::BAD_REQUEST => {
            AppError::InvalidInput(message.unwrap_or_else(|| "Invalid request".to_string()))
        }
        StatusCode::CONFLICT => {
            AppError::Conflict(message.unwrap_or_else(|| "Already exists".to_string()))
        }
        _ => AppError::ExternalApi(format!(
            "Remote API returned status {}: {}",
            status,
            message.unwrap_or_else(|| body.to_string())
        )),
    }
}

#[async_trait::async_trait]
impl RecommendationSource for RemoteApiProvider {
    async fn fetch_items(&self, endpoint: &Endpoint) -> SourceResult<Vec<RecommendationItem>> {
        let body = self.get_json_source(&endpoint.path()).await?;
        let items = endpoint.extract_items(&body)?;

        tracing::debug!(
            endpoint = %endpoint,
            results = items.len(),
            provider = "remote_api",
            "Recommendations fetched"
        );

        Ok(items)
    }

    async fn check_interactions(&self, user_id: &UserId) -> SourceResult<InteractionStatus> {
        let body = self.get_json_source(&interaction_check_path(*user_id)).await?;
        let status: InteractionStatus =
            serde_json::from_value(body).map_err(|e| SourceError::Parse(e.to_string()))?;

        tracing::debug!(
            user_id = %user_id,
            exists = status.exists,
            interactions = status.interactions_count,
            provider = "remote_api",
            "Interaction check completed"
        );

        Ok(status)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for RemoteApiProvider {
    async fn list_games(&self) -> AppResult<Vec<GameSummary>> {
        let response = self.http_client.get(self.url("/juegos")).send().await?;
        let raw: Vec<ApiCatalogGame> = Self::read_json(response).await?;
        let games: Vec<GameSummary> = raw.into_iter().map(GameSummary::from).collect();

        tracing::info!(
            results = games.len(),
            provider = "remote_api",
            "Catalog fetched"
        );

        Ok(games)
    }

    async fn game_details(&self, game_id: u64) -> AppResult<GameDetails> {
        let url = self.url(&format!("/games/{}", game_id));
        let response = self.http_client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("Game {} not found", game_id)));
        }

        let raw: ApiGameDetails = Self::read_json(response).await?;

        tracing::info!(game_id = game_id, provider = "remote_api", "Game details fetched");

        Ok(GameDetails::from(raw))
    }

    async fn login(&self, name: &str) -> AppResult<Session> {
        let response = self
            .http_client
            .post(self.url("/login"))
            .json(&ApiLoginBody { nombre: name })
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let envelope: ApiUserEnvelope = Self::read_json(response).await?;
        Ok(Session::from(envelope.usuario))
    }

    async fn register(&self, request: &RegistrationRequest) -> AppResult<Session> {
        let response = self
            .http_client
            .post(self.url("/usuarios"))
            .json(&ApiRegistrationBody::from(request))
            .send()
            .await?;

        let envelope: ApiUserEnvelope = Self::read_json(response).await?;
        Ok(Session::from(envelope.usuario))
    }

    async fn record_interaction(&self, interaction: &InteractionRequest) -> AppResult<()> {
        let response = self
            .http_client
            .post(self.url("/responder_juego"))
            .json(&ApiInteractionBody::from(interaction))
            .send()
            .await?;

        let _: Value = Self::read_json(response).await?;
        Ok(())
    }
}
