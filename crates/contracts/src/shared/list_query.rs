//! Параметры запроса списков и постраничный ответ API

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Запрос списка. `page` здесь 1-based, как его ждёт API.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: usize,
    pub limit: usize,
    params: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit,
            params: Vec::new(),
        }
    }

    /// Добавляет параметр, если значение непустое и не «all»
    pub fn param(mut self, name: &str, value: impl AsRef<str>) -> Self {
        let value = value.as_ref().trim();
        if !crate::shared::filters::is_all(value) {
            self.params.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// Пары в порядке: page, limit, затем фильтры
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        pairs.extend(self.params.iter().cloned());
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub total: usize,
    #[serde(rename = "totalPages", default)]
    pub total_pages: usize,
    #[serde(rename = "hasNext", default)]
    pub has_next: bool,
    #[serde(rename = "hasPrev", default)]
    pub has_prev: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub struct PagedResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Одни эндпоинты отдают `{ data, pagination }`, другие голый массив
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged, bound = "T: DeserializeOwned")]
pub enum ListPayload<T> {
    Paged(PagedResponse<T>),
    Plain(Vec<T>),
}

impl<T> ListPayload<T> {
    pub fn into_parts(self) -> (Vec<T>, Pagination) {
        match self {
            ListPayload::Paged(paged) => {
                let pagination = paged.pagination.unwrap_or_else(|| Pagination {
                    page: 1,
                    limit: paged.data.len(),
                    total: paged.data.len(),
                    total_pages: 1,
                    has_next: false,
                    has_prev: false,
                });
                (paged.data, pagination)
            }
            ListPayload::Plain(items) => {
                let total = items.len();
                (
                    items,
                    Pagination {
                        page: 1,
                        limit: total,
                        total,
                        total_pages: 1,
                        has_next: false,
                        has_prev: false,
                    },
                )
            }
        }
    }
}

/// Количество страниц; пустой список это одна страница
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Срез страницы (0-based). Страница за пределами даёт пустой срез.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return items;
    }
    let start = page.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_skips_all_and_empty() {
        let query = ListQuery::new(0, 100)
            .param("q", "  lona ")
            .param("relation", "all")
            .param("kind", "");
        assert_eq!(
            query.pairs(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "100".to_string()),
                ("q".to_string(), "lona".to_string()),
            ]
        );
    }

    #[test]
    fn test_payload_paged() {
        let raw = json!({
            "data": [1, 2],
            "pagination": {"page": 2, "limit": 2, "total": 5, "totalPages": 3, "hasNext": true, "hasPrev": true}
        });
        let payload: ListPayload<i32> = serde_json::from_value(raw).unwrap();
        let (items, pagination) = payload.into_parts();
        assert_eq!(items, vec![1, 2]);
        assert_eq!(pagination.total_pages, 3);
        assert!(pagination.has_next);
    }

    #[test]
    fn test_payload_plain_array() {
        let payload: ListPayload<i32> = serde_json::from_value(json!([4, 5, 6])).unwrap();
        let (items, pagination) = payload.into_parts();
        assert_eq!(items.len(), 3);
        assert_eq!(pagination.total, 3);
    }

    #[test]
    fn test_paging() {
        let items: Vec<usize> = (0..250).collect();
        assert_eq!(total_pages(items.len(), 100), 3);
        assert_eq!(total_pages(0, 100), 1);
        assert_eq!(page_slice(&items, 2, 100).len(), 50);
        assert_eq!(page_slice(&items, 1, 100)[0], 100);
        assert!(page_slice(&items, 7, 100).is_empty());
    }
}
