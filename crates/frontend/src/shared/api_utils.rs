//! Адрес REST API панели

use super::config::config;

/// Базовый URL API: хост текущей страницы и порт из настроек,
/// например "http://localhost:3000". Пустая строка вне браузера.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, config().api.port)
}

/// Полный URL по пути "/api/..."
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// URL с query-строкой; значения кодируются
pub fn with_query(url: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query_encodes_values() {
        let params = vec![
            ("page".to_string(), "1".to_string()),
            ("status".to_string(), "No disponible,A Consultar".to_string()),
        ];
        assert_eq!(
            with_query("/api/soportes", &params),
            "/api/soportes?page=1&status=No%20disponible%2CA%20Consultar"
        );
        assert_eq!(with_query("/api/x?a=1", &params[..1]), "/api/x?a=1&page=1");
        assert_eq!(with_query("/api/x", &[]), "/api/x");
    }
}
