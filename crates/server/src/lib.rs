use api_types::error::ErrorBody;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

pub use server::{ServerState, router, run_with_listener, spawn_with_listener};

mod server;
mod summary;
mod transactions;

pub enum ServerError {
    Engine(EngineError),
    /// The request body is not the JSON the endpoint expects.
    MalformedBody(String),
    /// A path segment that cannot name any row, e.g. a non-UUID id.
    UnknownPath(String),
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidInput(..) => StatusCode::BAD_REQUEST,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn body_for_engine_error(err: EngineError) -> ErrorBody {
    match err {
        EngineError::InvalidInput(code, message) => ErrorBody {
            error: code.as_str().to_string(),
            message,
        },
        EngineError::KeyNotFound(_) => ErrorBody {
            error: "not_found".to_string(),
            message: err.to_string(),
        },
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            ErrorBody {
                error: "internal".to_string(),
                message: "internal server error".to_string(),
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), body_for_engine_error(err)),
            ServerError::MalformedBody(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "malformed_body".to_string(),
                    message,
                },
            ),
            ServerError::UnknownPath(message) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: "not_found".to_string(),
                    message,
                },
            ),
            ServerError::Generic(message) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "bad_request".to_string(),
                    message,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::MalformedBody(value.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(value: PathRejection) -> Self {
        Self::UnknownPath(value.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use engine::ErrorCode;
    use http_body_util::BodyExt;

    use super::*;

    async fn body_of(res: axum::response::Response) -> ErrorBody {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn engine_validation_maps_to_400_with_code() {
        let err = EngineError::InvalidInput(ErrorCode::InvalidAmount, "bad amount".to_string());
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body = body_of(res).await;
        assert_eq!(body.error, "invalid_amount");
        assert_eq!(body.message, "bad amount");
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn database_error_hides_details() {
        let err = EngineError::Database(sea_orm::DbErr::Custom("disk on fire".to_string()));
        let res = ServerError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(res).await.message, "internal server error");
    }

    #[tokio::test]
    async fn malformed_body_maps_to_400() {
        let res = ServerError::MalformedBody("bad json".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(res).await.error, "malformed_body");
    }

    #[tokio::test]
    async fn unknown_path_maps_to_404_json() {
        let res = ServerError::UnknownPath("not a uuid".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body = body_of(res).await;
        assert_eq!(body.error, "not_found");
        assert_eq!(body.message, "not a uuid");
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
