//! Ошибки обращения к REST API

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Запрос не дошёл до сервера или ответ не получен
    #[error("Error de conexión: {0}")]
    Network(String),

    /// Сервер ответил не-2xx
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Успешный ответ с телом, которое не разобралось
    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),
}

impl ApiError {
    /// Ошибка по статусу и телу ответа. Текст берётся из полей
    /// `error`, `message` или `details`, иначе "HTTP <status>".
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| format!("HTTP {}", status));
        ApiError::Server { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message", "details"].iter().find_map(|key| match value.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Object(inner)) => inner
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_error_field() {
        let err = ApiError::from_response(400, r#"{"error": "Código duplicado"}"#);
        assert_eq!(err.to_string(), "Código duplicado");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_message_fallbacks() {
        let err = ApiError::from_response(422, r#"{"details": "priceMonth inválido"}"#);
        assert_eq!(err.to_string(), "priceMonth inválido");

        let err = ApiError::from_response(500, r#"{"error": {"message": "timeout"}}"#);
        assert_eq!(err.to_string(), "timeout");

        let err = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "HTTP 502");

        let err = ApiError::from_response(404, r#"{"error": ""}"#);
        assert_eq!(err.to_string(), "HTTP 404");
    }

    #[test]
    fn test_network_has_no_status() {
        assert_eq!(ApiError::Network("offline".into()).status(), None);
    }
}
