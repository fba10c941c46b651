//! Conversions from external infrastructure errors into domain errors.

use bomwright_domain::BomwrightError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub BomwrightError);

impl From<InfraError> for BomwrightError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<BomwrightError> for InfraError {
    fn from(value: BomwrightError) -> Self {
        InfraError(value)
    }
}

trait IntoBomwrightError {
    fn into_bomwright(self) -> BomwrightError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → BomwrightError */
/* -------------------------------------------------------------------------- */

impl IntoBomwrightError for HttpError {
    fn into_bomwright(self) -> BomwrightError {
        if self.is_timeout() {
            return BomwrightError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return BomwrightError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() {
            return BomwrightError::Schema(format!("response body could not be decoded: {self}"));
        }

        if self.is_builder() {
            return BomwrightError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => BomwrightError::Auth(message),
                404 => BomwrightError::NotFound(message),
                400..=499 if code != 429 => BomwrightError::InvalidInput(message),
                _ => BomwrightError::Network(message),
            };
        }

        BomwrightError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_bomwright())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → BomwrightError */
/* -------------------------------------------------------------------------- */

impl IntoBomwrightError for JsonError {
    fn into_bomwright(self) -> BomwrightError {
        BomwrightError::Schema(format!(
            "JSON payload rejected at line {} column {}: {self}",
            self.line(),
            self.column()
        ))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_bomwright())
    }
}

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn status_error(status: StatusCode) -> HttpError {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err()
    }

    #[tokio::test]
    async fn http_401_maps_to_auth_error() {
        let mapped: BomwrightError = InfraError::from(status_error(StatusCode::UNAUTHORIZED).await).into();
        match mapped {
            BomwrightError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_404_and_429_classification() {
        let not_found: BomwrightError =
            InfraError::from(status_error(StatusCode::NOT_FOUND).await).into();
        assert!(matches!(not_found, BomwrightError::NotFound(_)));

        let throttled: BomwrightError =
            InfraError::from(status_error(StatusCode::TOO_MANY_REQUESTS).await).into();
        assert!(matches!(throttled, BomwrightError::Network(_)));
    }

    #[test]
    fn malformed_json_maps_to_schema_error() {
        let err = serde_json::from_str::<serde_json::Value>("{ \"bom\": ").unwrap_err();
        let mapped: BomwrightError = InfraError::from(err).into();
        assert!(matches!(mapped, BomwrightError::Schema(_)));
    }
}
