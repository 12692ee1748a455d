//! Итог параллельного сохранения: что записано, что упало и почему

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl SaveReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: impl Into<String>, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => self.succeeded.push(id.into()),
            Err(message) => self.failed.push((id.into(), message)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.succeeded.is_empty() && self.failed.is_empty()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Текст уведомления для пользователя
    pub fn summary(&self) -> String {
        if self.failed.is_empty() {
            return format!("{} item(s) actualizado(s) correctamente", self.succeeded.len());
        }
        let reasons = self
            .failed
            .iter()
            .map(|(id, message)| format!("{}: {}", id, message))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{} actualizado(s), {} fallido(s): {}",
            self.succeeded.len(),
            self.failed.len(),
            reasons
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_all_ok() {
        let mut report = SaveReport::new();
        report.record("a", Ok(()));
        report.record("b", Ok(()));
        assert!(report.all_succeeded());
        assert_eq!(report.summary(), "2 item(s) actualizado(s) correctamente");
    }

    #[test]
    fn test_summary_with_failures() {
        let mut report = SaveReport::new();
        report.record("a", Ok(()));
        report.record("b", Err("HTTP 500".to_string()));
        assert!(!report.all_succeeded());
        assert_eq!(report.summary(), "1 actualizado(s), 1 fallido(s): b: HTTP 500");
    }
}
