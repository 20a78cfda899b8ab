use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use workday_engine::{ErrorKind, WorkdayError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug)]
pub enum AppError {
    Engine(WorkdayError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Engine(err) = self;
        let (status, error, message) = match err.kind() {
            ErrorKind::InvalidParameters => (
                StatusCode::BAD_REQUEST,
                ErrorKind::InvalidParameters.as_str().to_string(),
                err.message().to_string(),
            ),
            kind => {
                tracing::error!(kind = %kind, "Internal server error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalServerError".to_string(),
                    "An internal server error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error, message })).into_response()
    }
}

impl From<WorkdayError> for AppError {
    fn from(err: WorkdayError) -> Self {
        AppError::Engine(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn invalid_parameters_map_to_bad_request() {
        let response =
            AppError::from(WorkdayError::InvalidParameters("bad days".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["error"], "InvalidParameters");
        assert_eq!(json["message"], "bad days");
    }

    #[tokio::test]
    async fn other_kinds_map_to_generic_internal_error() {
        for err in [
            WorkdayError::Uninitialized("not ready".to_string()),
            WorkdayError::Internal("loop".to_string()),
        ] {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let json = response_json(response).await;
            assert_eq!(json["error"], "InternalServerError");
            assert_eq!(json["message"], "An internal server error occurred");
        }
    }
}
