use countdown_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("timer not found: {0}")]
    TimerNotFound(String),

    #[error("{0}")]
    Core(#[from] CoreError),
}

#[cfg(feature = "http")]
mod http {
    use axum::{
        Json,
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    use countdown_core::CoreError;
    use tracing::warn;

    use super::ApiError;

    impl ApiError {
        pub fn status_code(&self) -> StatusCode {
            match self {
                ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                ApiError::TimerNotFound(_) => StatusCode::NOT_FOUND,
                ApiError::Core(e) => match e {
                    CoreError::NotFound(_) => StatusCode::NOT_FOUND,
                    CoreError::NotStartable { .. } => StatusCode::CONFLICT,
                    CoreError::ShutDown => StatusCode::SERVICE_UNAVAILABLE,
                    CoreError::Runtime(_) => StatusCode::INTERNAL_SERVER_ERROR,
                },
            }
        }
    }

    impl IntoResponse for ApiError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            if status.is_server_error() {
                warn!(error = %self, "request failed");
            }
            let body = serde_json::json!({ "error": self.to_string() });
            (status, Json(body)).into_response()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use countdown_model::{TimerId, TimerStatus};

        #[test]
        fn core_errors_map_by_variant() {
            let not_found = ApiError::from(CoreError::NotFound(TimerId::from("x")));
            assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

            let conflict = ApiError::from(CoreError::NotStartable {
                id: TimerId::from("x"),
                status: TimerStatus::Running,
            });
            assert_eq!(conflict.status_code(), StatusCode::CONFLICT);

            assert_eq!(
                ApiError::from(CoreError::ShutDown).status_code(),
                StatusCode::SERVICE_UNAVAILABLE
            );
        }

        #[test]
        fn invalid_request_is_bad_request() {
            let err = ApiError::InvalidRequest("minutes must be > 0".into());
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }
}
