//! Общие операции страниц с буфером правок: сохранение, выделение, подтверждение

use super::bulk_save::run_all;
use super::http::{patch_json, put_json};
use super::toast::ToastService;
use contracts::shared::edit_buffer::{EditSession, Patch};
use contracts::shared::save_report::SaveReport;
use leptos::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Метод частичного обновления записи
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMethod {
    Put,
    Patch,
}

/// PUT на каждую запись с изменениями, все запросы параллельно
pub async fn save_patches<P, F>(changes: BTreeMap<String, P>, path_of: F) -> SaveReport
where
    P: Serialize,
    F: Fn(&str) -> String,
{
    save_patches_with(WriteMethod::Put, changes, path_of).await
}

pub async fn save_patches_with<P, F>(
    method: WriteMethod,
    changes: BTreeMap<String, P>,
    path_of: F,
) -> SaveReport
where
    P: Serialize,
    F: Fn(&str) -> String,
{
    let jobs = changes
        .into_iter()
        .map(|(id, patch)| {
            let path = path_of(&id);
            (id, async move {
                match method {
                    WriteMethod::Put => put_json(&path, &patch).await,
                    WriteMethod::Patch => patch_json(&path, &patch).await,
                }
            })
        })
        .collect();
    run_all(jobs).await
}

/// Снимает сохранённые строки из буфера и показывает итог.
/// Строки с ошибкой остаются в буфере.
pub fn apply_report<P>(report: &SaveReport, session: RwSignal<EditSession<P>>, toasts: ToastService)
where
    P: Patch + Send + Sync + 'static,
{
    let saved: BTreeSet<String> = report.succeeded.iter().cloned().collect();
    settle_saved(report, &saved, session, toasts);
}

/// То же, когда id в отчёте не совпадают с id строк буфера
pub fn settle_saved<P>(
    report: &SaveReport,
    saved_rows: &BTreeSet<String>,
    session: RwSignal<EditSession<P>>,
    toasts: ToastService,
) where
    P: Patch + Send + Sync + 'static,
{
    if report.is_empty() {
        toasts.info("No hay cambios pendientes para guardar");
        return;
    }
    session.update(|s| s.settle(saved_rows));
    if report.all_succeeded() {
        toasts.success(report.summary());
    } else {
        log::warn!("guardado parcial: {:?}", report.failed);
        toasts.error(report.summary());
    }
}

pub fn toggle_selected(selected: RwSignal<HashSet<String>>, id: String, checked: bool) {
    selected.update(|s| {
        if checked {
            s.insert(id);
        } else {
            s.remove(&id);
        }
    });
}

/// Непустые значения без повторов, по алфавиту
pub fn distinct_values<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Диалог подтверждения браузера; без окна считаем отказом
pub fn confirm_action(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_values() {
        let values = distinct_values(["Lonas", " ", "Displays", "Lonas ", ""]);
        assert_eq!(values, vec!["Displays".to_string(), "Lonas".to_string()]);
    }
}
