//! Signed HTTP requests against the iContact API.

use std::collections::BTreeMap;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::auth::{Credentials, Session};
use crate::config::ClientConfig;
use crate::error::{ApiError, Error, ParseError};
use crate::types::ApiUrl;

use super::endpoints::{FailureEnvelope, STATUS_SUCCESS};
use super::signing::{BODY_PARAM, SIGNATURE_PARAM, sign};

/// One call: a path below the base URL, its parameters and an optional body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Short operation name used in logs; the path may embed secrets.
    pub operation: &'static str,
    pub call_path: String,
    pub params: BTreeMap<String, String>,
    /// JSON body; its presence makes the request a PUT.
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get(operation: &'static str, call_path: impl Into<String>) -> Self {
        Self {
            operation,
            call_path: call_path.into(),
            params: BTreeMap::new(),
            body: None,
        }
    }

    pub fn put<B>(
        operation: &'static str,
        call_path: impl Into<String>,
        body: &B,
    ) -> Result<Self, Error>
    where
        B: Serialize,
    {
        let body = serde_json::to_string(body).map_err(|e| ParseError::Body {
            operation: operation.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            operation,
            call_path: call_path.into(),
            params: BTreeMap::new(),
            body: Some(body),
        })
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// HTTP client for signed API requests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: ApiUrl,
}

impl ApiClient {
    /// Create a new API client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Returns the base URL this client is configured for.
    pub fn base_url(&self) -> &ApiUrl {
        &self.base_url
    }

    /// Sign and send a request, then decode the success payload.
    ///
    /// `session` is `None` only for the login call.
    #[instrument(skip_all, fields(operation = request.operation, base = %self.base_url))]
    pub async fn send<R>(
        &self,
        credentials: &Credentials,
        session: Option<&Session>,
        request: ApiRequest,
    ) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let ApiRequest {
            operation,
            call_path,
            mut params,
            body,
        } = request;

        params.insert("api_key".to_string(), credentials.api_key().to_string());
        if let Some(session) = session {
            params.insert("api_tok".to_string(), session.token().as_str().to_string());
            params.insert("api_seq".to_string(), session.sequence().to_string());
        }

        let signature = {
            let mut signed = params.clone();
            if let Some(ref body) = body {
                signed.insert(BODY_PARAM.to_string(), body.clone());
            }
            sign(credentials.shared_secret(), &call_path, &signed)
        };
        params.insert(SIGNATURE_PARAM.to_string(), signature);

        let url = self.base_url.endpoint(&call_path);
        trace!(params = ?params.keys().collect::<Vec<_>>(), "request parameters");

        let response = match body {
            Some(body) => {
                debug!(operation, "API PUT");
                self.client
                    .put(&url)
                    .query(&params)
                    .headers(Self::headers(true))
                    .body(body)
                    .send()
                    .await?
            }
            None => {
                debug!(operation, "API GET");
                self.client
                    .get(&url)
                    .query(&params)
                    .headers(Self::headers(false))
                    .send()
                    .await?
            }
        };

        self.handle_response(operation, response).await
    }

    fn headers(with_body: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if with_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        headers
    }

    /// Handle a response: HTTP status first, then the envelope, then the payload.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        operation: &str,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "API response");
        let text = response.text().await?;

        if !status.is_success() {
            let envelope = serde_json::from_str::<FailureEnvelope>(&text).ok();
            let (code, message) = envelope
                .map(|e| (e.error_code, e.error_message))
                .unwrap_or((None, None));
            return Err(ApiError::new(status.as_u16(), code, message).into());
        }

        decode_envelope(operation, &text)
    }
}

/// Decode a 2xx body: check the envelope status, then the payload shape.
pub(crate) fn decode_envelope<R: DeserializeOwned>(
    operation: &str,
    text: &str,
) -> Result<R, Error> {
    let value: Value = serde_json::from_str(text).map_err(|e| ParseError::Body {
        operation: operation.to_string(),
        message: e.to_string(),
    })?;

    let status = value
        .get("status")
        .and_then(Value::as_str)
        .map(str::to_owned);

    match status.as_deref() {
        Some(STATUS_SUCCESS) => {}
        Some(_) => {
            let envelope: FailureEnvelope =
                serde_json::from_value(value).map_err(|e| ParseError::Body {
                    operation: operation.to_string(),
                    message: e.to_string(),
                })?;
            let code = envelope.error_code;
            return Err(ApiError::new(
                code.unwrap_or(reqwest::StatusCode::OK.as_u16()),
                code,
                envelope.error_message,
            )
            .into());
        }
        None => {
            return Err(ParseError::MissingField {
                operation: operation.to_string(),
                field: "status".to_string(),
            }
            .into());
        }
    }

    serde_json::from_value(value).map_err(|e| {
        ParseError::Body {
            operation: operation.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints::ListsResponse;

    #[test]
    fn client_creation() {
        let config = ClientConfig::default();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), &config.base_url);
    }

    #[test]
    fn success_envelope_decodes_payload() {
        let lists: ListsResponse = decode_envelope(
            "lists",
            r#"{"status":"success","lists":[{"id":1,"href":"/list/1"}]}"#,
        )
        .unwrap();
        assert_eq!(lists.lists.len(), 1);
        assert_eq!(lists.lists[0].href.as_deref(), Some("/list/1"));
    }

    #[test]
    fn failure_envelope_is_api_error_with_code() {
        let err = decode_envelope::<ListsResponse>(
            "lists",
            r#"{"status":"failure","error_code":402,"error_message":"Bad request"}"#,
        )
        .unwrap_err();
        match err {
            Error::Api(api) => {
                assert_eq!(api.status, 402);
                assert_eq!(api.code, Some(402));
                assert_eq!(api.message.as_deref(), Some("Bad request"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn failure_envelope_with_unreadable_code_is_api_error() {
        let err = decode_envelope::<ListsResponse>(
            "lists",
            r#"{"status":"failure","error_code":"E_BAD","error_message":"Bad request"}"#,
        )
        .unwrap_err();
        match err {
            Error::Api(api) => {
                assert_eq!(api.status, 200);
                assert_eq!(api.code, None);
                assert_eq!(api.message.as_deref(), Some("Bad request"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_status_is_parse_error() {
        let err = decode_envelope::<ListsResponse>("lists", r#"{"lists":[]}"#).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::MissingField { .. })));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = decode_envelope::<ListsResponse>("lists", "<xml/>").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Body { .. })));
    }

    #[test]
    fn wrong_shape_is_parse_error() {
        let err = decode_envelope::<ListsResponse>(
            "lists",
            r#"{"status":"success","lists":"nope"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Body { .. })));
    }
}
