//! Параллельная запись изменённых записей.
//! Все запросы стартуют сразу и ожидаются вместе: без лимита, без повторов.

use super::api_error::ApiError;
use contracts::shared::save_report::SaveReport;
use futures::future::join_all;
use std::future::Future;

/// Выполняет все записи и собирает итог по id
pub async fn run_all<Fut>(jobs: Vec<(String, Fut)>) -> SaveReport
where
    Fut: Future<Output = Result<(), ApiError>>,
{
    let (ids, futures): (Vec<String>, Vec<Fut>) = jobs.into_iter().unzip();
    let results = join_all(futures).await;

    let mut report = SaveReport::new();
    for (id, result) in ids.into_iter().zip(results) {
        report.record(id, result.map_err(|e| e.to_string()));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::{ready, Ready};

    fn write(id: &str) -> Ready<Result<(), ApiError>> {
        if id.starts_with("bad") {
            ready(Err(ApiError::Server {
                status: 500,
                message: "Error interno".to_string(),
            }))
        } else {
            ready(Ok(()))
        }
    }

    #[test]
    fn test_partial_failure_is_reported_per_record() {
        let jobs = ["r1", "bad-7", "r2"]
            .iter()
            .map(|id| (id.to_string(), write(id)))
            .collect();
        let report = block_on(run_all(jobs));

        assert_eq!(report.succeeded, vec!["r1".to_string(), "r2".to_string()]);
        assert_eq!(
            report.failed,
            vec![("bad-7".to_string(), "Error interno".to_string())]
        );
        assert!(!report.all_succeeded());
    }

    #[test]
    fn test_empty_batch() {
        let jobs: Vec<(String, Ready<Result<(), ApiError>>)> = Vec::new();
        assert!(block_on(run_all(jobs)).is_empty());
    }

    #[test]
    fn test_async_writers_run_together() {
        use futures::channel::oneshot;

        // второй writer ждёт сигнала от первого: последовательный запуск бы завис
        let (tx, rx) = oneshot::channel::<()>();
        let first = async move {
            let _ = tx.send(());
            Ok(())
        };
        let second = async move {
            rx.await.map_err(|e| ApiError::Network(e.to_string()))
        };
        let jobs: Vec<(String, std::pin::Pin<Box<dyn Future<Output = Result<(), ApiError>>>>)> = vec![
            ("b".to_string(), Box::pin(second)),
            ("a".to_string(), Box::pin(first)),
        ];
        let report = block_on(run_all(jobs));
        assert_eq!(report.succeeded.len(), 2);
    }
}
