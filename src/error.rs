//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Problems in a content model catalog (built-in or loaded from JSON).
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("duplicate path segment: {0}")]
    DuplicateSegment(String),
    #[error("model {model}: duplicate field '{field}'")]
    DuplicateField { model: String, field: String },
    #[error("model {model}: field '{field}' is managed by the backend and cannot be declared")]
    ReservedField { model: String, field: String },
    #[error("model {model}: unknown column '{column}' in {context}")]
    UnknownColumn {
        model: String,
        column: String,
        context: &'static str,
    },
    #[error("model {model}: select field '{field}' has no options")]
    EmptySelect { model: String, field: String },
    #[error("model {model}: invalid pattern for '{field}': {message}")]
    InvalidPattern {
        model: String,
        field: String,
        message: String,
    },
    #[error("model catalog load: {0}")]
    Load(String),
}

/// Why a single submitted field was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    Required,
    InvalidNumber,
    InvalidDate,
    InvalidBoolean,
    NotAnOption,
    TooLong,
    PatternMismatch,
    WrongType,
}

impl FieldErrorKind {
    pub fn message_fr(self) -> &'static str {
        match self {
            FieldErrorKind::Required => "Ce champ est obligatoire",
            FieldErrorKind::InvalidNumber => "Veuillez saisir un nombre valide",
            FieldErrorKind::InvalidDate => "Veuillez saisir une date valide (AAAA-MM-JJ)",
            FieldErrorKind::InvalidBoolean => "Valeur oui/non invalide",
            FieldErrorKind::NotAnOption => "Veuillez choisir une valeur de la liste",
            FieldErrorKind::TooLong => "Ce texte est trop long",
            FieldErrorKind::PatternMismatch => "Format invalide",
            FieldErrorKind::WrongType => "Type de valeur invalide",
        }
    }

    pub fn message_en(self) -> &'static str {
        match self {
            FieldErrorKind::Required => "This field is required",
            FieldErrorKind::InvalidNumber => "Please enter a valid number",
            FieldErrorKind::InvalidDate => "Please enter a valid date (YYYY-MM-DD)",
            FieldErrorKind::InvalidBoolean => "Invalid yes/no value",
            FieldErrorKind::NotAnOption => "Please choose a value from the list",
            FieldErrorKind::TooLong => "This text is too long",
            FieldErrorKind::PatternMismatch => "Invalid format",
            FieldErrorKind::WrongType => "Invalid value type",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
}

/// Every invalid field of one submission, in model order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: &str, kind: FieldErrorKind) {
        self.0.push(FieldError {
            field: field.to_string(),
            kind,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<FieldErrorKind> {
        self.0.iter().find(|e| e.field == field).map(|e| e.kind)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.field.as_str())
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", names.join(", "))
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(FieldErrors),
    #[error("database: {0}")]
    Db(sqlx::Error),
    /// Unique constraint violated; holds the constraint name.
    #[error("conflict: duplicate value for {0}")]
    Conflict(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return AppError::Conflict(db.constraint().unwrap_or("unique constraint").to_string());
            }
        }
        AppError::Db(e)
    }
}

impl AppError {
    /// Toast text shown by the back office.
    pub fn message_fr(&self) -> &'static str {
        match self {
            AppError::Model(_) => "Erreur de configuration du contenu",
            AppError::NotFound(_) => "Élément introuvable",
            AppError::Validation(_) => "Veuillez corriger les champs en erreur",
            AppError::Db(sqlx::Error::RowNotFound) => "Élément introuvable",
            AppError::Db(_) => "Une erreur technique est survenue, veuillez réessayer",
            AppError::Conflict(_) => "Cette valeur existe déjà (identifiant URL ou référence en double)",
            AppError::BadRequest(_) => "Requête invalide",
            AppError::Unauthorized(_) => "Veuillez vous connecter",
            AppError::Forbidden(_) => "Accès refusé",
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Model(_) => (StatusCode::INTERNAL_SERVER_ERROR, "model_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::Db(e) => {
                if let sqlx::Error::RowNotFound = e {
                    (StatusCode::NOT_FOUND, "not_found")
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
                }
            }
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub message_fr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        // Server-side details stay in the log.
        let message = if status.is_server_error() {
            tracing::error!(error = %self, code, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        let details = match &self {
            AppError::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                message_fr: self.message_fr().to_string(),
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(e: AppError) -> (StatusCode, serde_json::Value) {
        let response = e.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn conflict_is_409_with_french_toast() {
        let (status, json) = body_of(AppError::Conflict("projects_slug_key".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"]["code"], "conflict");
        assert_eq!(json["error"]["message"], "conflict: duplicate value for projects_slug_key");
        assert!(json["error"]["message_fr"].as_str().unwrap().starts_with("Cette valeur existe déjà"));
    }

    #[tokio::test]
    async fn server_errors_do_not_echo_backend_messages() {
        let (status, json) = body_of(AppError::from(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "database_error");
        assert_eq!(json["error"]["message"], "internal server error");
        assert_eq!(json["error"]["message_fr"], "Une erreur technique est survenue, veuillez réessayer");
    }

    #[tokio::test]
    async fn missing_row_is_404_and_client_errors_keep_their_message() {
        let (status, json) = body_of(AppError::from(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "not_found");

        let (status, json) = body_of(AppError::BadRequest("invalid uuid".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["message"], "bad request: invalid uuid");
    }
}
