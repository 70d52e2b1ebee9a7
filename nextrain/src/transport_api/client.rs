//! Transport API HTTP client.
//!
//! Builds authenticated request URLs and fetches live departure boards.
//! Each fetch is a single GET with a bounded timeout; nothing is retried.

use chrono::{Local, NaiveDate};
use reqwest::Url;
use tracing::debug;

use crate::credentials::Credential;
use crate::domain::{DepartureBoard, StationCode};

use super::convert::convert_station_update;
use super::error::ApiError;
use super::types::LiveStationUpdate;

/// Default origin of the Transport API.
const DEFAULT_BASE_URL: &str = "http://transportapi.com";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// How much of an unexpected response body to keep in errors.
const BODY_EXCERPT_CHARS: usize = 500;

const APP_ID_PARAM: &str = "app_id";
const APP_KEY_PARAM: &str = "app_key";

/// Configuration for the Transport API client.
#[derive(Debug, Clone)]
pub struct TransportApiConfig {
    /// Origin every endpoint is resolved against
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TransportApiConfig {
    /// Create a config pointing at the production service.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TransportApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Transport API client.
///
/// Owns the HTTP transport, the base origin and the credential used to sign
/// every request. Instances are independent; nothing is shared globally.
#[derive(Debug, Clone)]
pub struct TransportApiClient {
    http: reqwest::Client,
    base_url: Url,
    credential: Credential,
}

impl TransportApiClient {
    /// Create a new client with the given configuration and credential.
    pub fn new(config: TransportApiConfig, credential: Credential) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ApiError::InvalidUrl {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            credential,
        })
    }

    /// Replace the credential used for subsequent requests.
    pub fn authenticate(&mut self, credential: Credential) {
        self.credential = credential;
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Resolve `endpoint` (path plus optional query) against the base origin
    /// and sign it.
    ///
    /// Query parameters already on the endpoint are kept, except `app_id`
    /// and `app_key`, which are always replaced by the client's credential.
    pub fn build_url(&self, endpoint: &str) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(endpoint).map_err(|e| ApiError::InvalidUrl {
            url: endpoint.to_string(),
            message: e.to_string(),
        })?;

        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| k != APP_ID_PARAM && k != APP_KEY_PARAM)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair(APP_ID_PARAM, &self.credential.app_id)
            .append_pair(APP_KEY_PARAM, &self.credential.key);

        Ok(url)
    }

    /// Get live departures from `station` that also call at `calling_at`.
    ///
    /// Times on the board are anchored to today's local date.
    pub async fn fetch_live_departures(
        &self,
        station: &StationCode,
        calling_at: &StationCode,
    ) -> Result<DepartureBoard, ApiError> {
        let board_date = Local::now().date_naive();
        self.fetch_live_departures_on(station, calling_at, board_date)
            .await
    }

    /// Get live departures, anchoring times to `board_date`.
    pub async fn fetch_live_departures_on(
        &self,
        station: &StationCode,
        calling_at: &StationCode,
        board_date: NaiveDate,
    ) -> Result<DepartureBoard, ApiError> {
        let endpoint = format!(
            "/v3/uk/train/station/{}/live.json?calling_at={}",
            station.as_str(),
            calling_at.as_str()
        );
        let url = self.build_url(&endpoint)?;

        let body = self.get(url).await?;

        let update: LiveStationUpdate =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode {
                message: e.to_string(),
                body: Some(excerpt(&body)),
            })?;

        Ok(convert_station_update(&update, board_date)?)
    }

    /// Issue a GET and return the body of a successful response.
    async fn get(&self, url: Url) -> Result<String, ApiError> {
        debug!(url = %redacted(&url), "GET");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Unauthorized {
                status: status.as_u16(),
                message: excerpt(&body),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: excerpt(&body),
            });
        }

        debug!(status = status.as_u16(), "response received");

        Ok(response.text().await?)
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

/// The URL with the app key masked, for logging.
fn redacted(url: &Url) -> Url {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == APP_KEY_PARAM {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked
}


#[cfg(test)]
mod fetch_tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use axum::Router;
    use axum::extract::{Path, Query, State};
    use axum::http::StatusCode;
    use axum::routing::get;

    use super::*;
    use crate::transport_api::ConversionError;

    const KGX_LIVE: &str = include_str!("../../data/fixtures/kgx_live.json");

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    /// Serve `router` on an ephemeral local port and return its origin.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client_for(base_url: &str) -> TransportApiClient {
        let config = TransportApiConfig::new().with_base_url(base_url);
        TransportApiClient::new(config, Credential::new("my-app", "s3cret")).unwrap()
    }

    fn stations() -> (StationCode, StationCode) {
        (StationCode::normalize("kgx"), StationCode::normalize("edb"))
    }

    /// Fake live endpoint that checks the request the way the service does.
    async fn live(
        State(body): State<&'static str>,
        Path(code): Path<String>,
        Query(query): Query<HashMap<String, String>>,
    ) -> (StatusCode, String) {
        let param = |name: &str| query.get(name).map(String::as_str);

        if param("app_id") != Some("my-app") || param("app_key") != Some("s3cret") {
            return (
                StatusCode::FORBIDDEN,
                r#"{"error":"Authorisation failed"}"#.to_string(),
            );
        }
        if code != "KGX" || param("calling_at") != Some("EDB") {
            return (StatusCode::NOT_FOUND, "unknown station".to_string());
        }
        (StatusCode::OK, body.to_string())
    }

    fn live_service(body: &'static str) -> Router {
        Router::new()
            .route("/v3/uk/train/station/:code/live.json", get(live))
            .with_state(body)
    }

    #[tokio::test]
    async fn fetch_board() {
        let base = serve(live_service(KGX_LIVE)).await;
        let (from, to) = stations();

        let board = client_for(&base)
            .fetch_live_departures_on(&from, &to, date())
            .await
            .unwrap();

        assert_eq!(board.station_name, "London Kings Cross");
        assert_eq!(board.station_code.as_str(), "KGX");
        assert_eq!(board.len(), 2);

        let first = &board.departures[0];
        assert_eq!(first.mode, "train");
        assert_eq!(first.platform.as_deref(), Some("4"));
        assert_eq!(first.destination_name, "Edinburgh");
        assert_eq!(first.aimed_departure.unwrap().to_string(), "09:15");
        assert_eq!(first.expected_departure.unwrap().to_string(), "09:17");
        assert_eq!(first.aimed_departure.unwrap().date(), date());
        assert_eq!(first.best_departure_estimate_mins, 12);

        let second = &board.departures[1];
        assert!(second.platform.is_none());
        assert!(second.expected_departure.is_none());
    }

    #[tokio::test]
    async fn fetch_uses_today_by_default() {
        let base = serve(live_service(KGX_LIVE)).await;
        let (from, to) = stations();

        let board = client_for(&base)
            .fetch_live_departures(&from, &to)
            .await
            .unwrap();

        let aimed = board.departures[0].aimed_departure.unwrap();
        let today = Local::now().date_naive();
        assert!(aimed.date() == today || aimed.date() == today.pred_opt().unwrap());
    }

    #[tokio::test]
    async fn lowercase_arguments_render_a_board() {
        let body = r#"{
            "station_name": "London Kings Cross",
            "station_code": "KGX",
            "departures": { "all": [
                {
                    "mode": "train",
                    "platform": "",
                    "destination_name": "Edinburgh",
                    "aimed_departure_time": "09:15",
                    "expected_departure_time": "09:17",
                    "best_departure_estimate_mins": 12
                }
            ] }
        }"#;
        let base = serve(live_service(body)).await;

        let from = StationCode::normalize("kgx");
        let to = StationCode::normalize("edb");
        assert_eq!(from.as_str(), "KGX");
        assert_eq!(to.as_str(), "EDB");

        let board = client_for(&base)
            .fetch_live_departures_on(&from, &to, date())
            .await
            .unwrap();

        assert_eq!(
            crate::format::format_board(&board),
            vec![
                "Train from London Kings Cross to Edinburgh at 09:15 (expected at 09:17). \
                 Leaving in 12 minutes."
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn wrong_credentials_are_unauthorized() {
        let base = serve(live_service(KGX_LIVE)).await;
        let (from, to) = stations();

        let mut client = client_for(&base);
        client.authenticate(Credential::new("my-app", "wrong"));

        let err = client
            .fetch_live_departures_on(&from, &to, date())
            .await
            .unwrap_err();

        match err {
            ApiError::Unauthorized { status, message } => {
                assert_eq!(status, 403);
                assert!(message.contains("Authorisation failed"));
            }
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn server_error_is_rejected_before_decode() {
        let router = Router::new().route(
            "/v3/uk/train/station/:code/live.json",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, KGX_LIVE) }),
        );
        let base = serve(router).await;
        let (from, to) = stations();

        let err = client_for(&base)
            .fetch_live_departures_on(&from, &to, date())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Rejected { status: 500, .. }));
    }

    #[tokio::test]
    async fn invalid_json_is_decode_error() {
        let base = serve(live_service("<html>maintenance</html>")).await;
        let (from, to) = stations();

        let err = client_for(&base)
            .fetch_live_departures_on(&from, &to, date())
            .await
            .unwrap_err();

        match err {
            ApiError::Decode { body, .. } => {
                assert_eq!(body.as_deref(), Some("<html>maintenance</html>"));
            }
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn bad_time_is_decode_error() {
        let body = r#"{
            "station_name": "London Kings Cross",
            "station_code": "KGX",
            "departures": { "all": [
                { "mode": "train", "aimed_departure_time": "24:00" }
            ] }
        }"#;
        let base = serve(live_service(body)).await;
        let (from, to) = stations();

        let err = client_for(&base)
            .fetch_live_departures_on(&from, &to, date())
            .await
            .unwrap_err();

        assert!(err.is_decode());
        match err {
            ApiError::Conversion(ConversionError::InvalidTime {
                index,
                field,
                source,
            }) => {
                assert_eq!(index, 0);
                assert_eq!(field, "aimed_departure_time");
                assert_eq!(source.input(), "24:00");
            }
            other => panic!("expected Conversion, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_service_times_out() {
        let router = Router::new().route(
            "/v3/uk/train/station/:code/live.json",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                KGX_LIVE
            }),
        );
        let base = serve(router).await;
        let (from, to) = stations();

        let config = TransportApiConfig::new()
            .with_base_url(&base)
            .with_timeout(1);
        let client = TransportApiClient::new(config, Credential::new("my-app", "s3cret")).unwrap();

        let err = client
            .fetch_live_departures_on(&from, &to, date())
            .await
            .unwrap_err();

        assert!(err.is_timeout(), "expected timeout, got {err:?}");
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let (from, to) = stations();

        let err = client_for(&format!("http://{addr}"))
            .fetch_live_departures_on(&from, &to, date())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)));
    }
}
