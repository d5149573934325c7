use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Uniform body of every API response.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    #[serde(skip)]
    status: StatusCode,
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorBody>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub kind: &'static str,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            data: Some(data),
            error: None,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl Envelope<()> {
    pub fn failure(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            success: false,
            data: None,
            error: Some(ErrorBody {
                status: status.as_u16(),
                kind,
            }),
            message: message.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_envelope_has_no_error() {
        let envelope = Envelope::ok(json!({"id": 1}), "done");
        assert_eq!(envelope.status(), StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"success": true, "data": {"id": 1}, "error": null, "message": "done"})
        );
    }

    #[test]
    fn failure_envelope_carries_status_and_kind() {
        let envelope = Envelope::failure(StatusCode::NOT_FOUND, "NotFoundError", "Car not found");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "success": false,
                "data": null,
                "error": {"status": 404, "kind": "NotFoundError"},
                "message": "Car not found"
            })
        );
    }
}
