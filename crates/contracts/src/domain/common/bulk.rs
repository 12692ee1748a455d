use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    Update,
    Delete,
}

/// Тело `POST <коллекция>/bulk`
#[derive(Debug, Clone, Serialize)]
pub struct BulkRequest<P: Serialize> {
    pub ids: Vec<String>,
    pub action: BulkAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<P>,
}

impl<P: Serialize> BulkRequest<P> {
    pub fn update(ids: Vec<String>, data: P) -> Self {
        Self {
            ids,
            action: BulkAction::Update,
            data: Some(data),
        }
    }
}

impl BulkRequest<()> {
    pub fn delete(ids: Vec<String>) -> Self {
        Self {
            ids,
            action: BulkAction::Delete,
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bulk_delete_has_no_data() {
        let body = serde_json::to_value(BulkRequest::delete(vec!["1".into(), "2".into()])).unwrap();
        assert_eq!(body, json!({"ids": ["1", "2"], "action": "delete"}));
    }

    #[test]
    fn test_bulk_update_body() {
        let body = serde_json::to_value(BulkRequest::update(vec!["7".into()], json!({"categoria": "Displays"}))).unwrap();
        assert_eq!(body, json!({"ids": ["7"], "action": "update", "data": {"categoria": "Displays"}}));
    }
}
