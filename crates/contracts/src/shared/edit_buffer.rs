//! Буфер построчного и массового редактирования списков.
//!
//! Две карты по id строки:
//! - `edited`: правки строки, которая сейчас в фокусе;
//! - `pending`: подтверждённые или массовые правки, ждущие сохранения.
//!
//! Третья карта держит сырой текст ячеек, чтобы ввод не форматировался
//! на каждом нажатии клавиши.

use std::collections::{BTreeMap, BTreeSet};

/// Частичное изменение записи. Заполненные поля `other` перекрывают свои.
pub trait Patch: Clone + Default + PartialEq {
    fn merge(&mut self, other: &Self);

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditSession<P: Patch> {
    edited: BTreeMap<String, P>,
    pending: BTreeMap<String, P>,
    inputs: BTreeMap<String, BTreeMap<String, String>>,
}

impl<P: Patch> Default for EditSession<P> {
    fn default() -> Self {
        Self {
            edited: BTreeMap::new(),
            pending: BTreeMap::new(),
            inputs: BTreeMap::new(),
        }
    }
}

impl<P: Patch> EditSession<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Правка строки в фокусе. При множественном выделении
    /// правка сразу попадает и в `pending`.
    pub fn edit(&mut self, id: &str, patch: P, selected_count: usize) {
        self.edited
            .entry(id.to_string())
            .or_default()
            .merge(&patch);
        if selected_count > 1 {
            self.pending
                .entry(id.to_string())
                .or_default()
                .merge(&patch);
        }
    }

    /// Подтверждение строки: `edited` сливается в `pending`.
    /// Возвращает false, если подтверждать нечего.
    pub fn confirm(&mut self, id: &str) -> bool {
        match self.edited.remove(id) {
            Some(patch) => {
                self.pending
                    .entry(id.to_string())
                    .or_default()
                    .merge(&patch);
                true
            }
            None => false,
        }
    }

    /// Отмена правки строки: `pending` не трогаем
    pub fn cancel(&mut self, id: &str) {
        self.edited.remove(id);
        self.inputs.remove(id);
    }

    /// Массовое изменение выделенных строк. Патч строится на каждую строку,
    /// чтобы учесть её собственную себестоимость.
    pub fn bulk_apply<'a, I, F>(&mut self, ids: I, mut make_patch: F) -> usize
    where
        I: IntoIterator<Item = &'a String>,
        F: FnMut(&str) -> Option<P>,
    {
        let mut applied = 0;
        for id in ids {
            if let Some(patch) = make_patch(id) {
                self.pending
                    .entry(id.clone())
                    .or_default()
                    .merge(&patch);
                applied += 1;
            }
        }
        applied
    }

    pub fn set_input(&mut self, id: &str, field: &str, text: String) {
        self.inputs
            .entry(id.to_string())
            .or_default()
            .insert(field.to_string(), text);
    }

    pub fn input(&self, id: &str, field: &str) -> Option<&str> {
        self.inputs
            .get(id)
            .and_then(|fields| fields.get(field))
            .map(String::as_str)
    }

    /// Итоговое изменение одной строки: `pending`, поверх него `edited`
    pub fn effective(&self, id: &str) -> Option<P> {
        let mut result = self.pending.get(id).cloned();
        if let Some(edited) = self.edited.get(id) {
            result.get_or_insert_with(P::default).merge(edited);
        }
        result
    }

    /// Все изменения к сохранению
    pub fn merged(&self) -> BTreeMap<String, P> {
        let mut all = self.pending.clone();
        for (id, patch) in &self.edited {
            all.entry(id.clone()).or_default().merge(patch);
        }
        all.retain(|_, patch| !patch.is_empty());
        all
    }

    pub fn is_edited(&self, id: &str) -> bool {
        self.edited.contains_key(id)
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    pub fn pending_count(&self) -> usize {
        self.merged().len()
    }

    pub fn has_changes(&self) -> bool {
        !self.pending.is_empty() || !self.edited.is_empty()
    }

    /// Снимает изменения строк, которые успешно сохранены.
    /// Строки с ошибкой остаются в буфере для повторной попытки.
    pub fn settle(&mut self, saved_ids: &BTreeSet<String>) {
        for id in saved_ids {
            self.pending.remove(id);
            self.edited.remove(id);
            self.inputs.remove(id);
        }
    }

    pub fn discard(&mut self) {
        self.edited.clear();
        self.pending.clear();
        self.inputs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct NamePatch {
        name: Option<String>,
        cost: Option<f64>,
    }

    impl Patch for NamePatch {
        fn merge(&mut self, other: &Self) {
            if other.name.is_some() {
                self.name = other.name.clone();
            }
            if other.cost.is_some() {
                self.cost = other.cost;
            }
        }
    }

    fn name(v: &str) -> NamePatch {
        NamePatch {
            name: Some(v.to_string()),
            cost: None,
        }
    }

    fn cost(v: f64) -> NamePatch {
        NamePatch {
            name: None,
            cost: Some(v),
        }
    }

    #[test]
    fn test_edit_then_confirm_moves_to_pending() {
        let mut session = EditSession::new();
        session.edit("r1", name("Tinta"), 1);
        assert!(session.is_edited("r1"));
        assert!(!session.is_pending("r1"));

        assert!(session.confirm("r1"));
        assert!(!session.is_edited("r1"));
        assert_eq!(session.effective("r1"), Some(name("Tinta")));
        assert!(!session.confirm("r1"));
    }

    #[test]
    fn test_edit_with_multi_selection_goes_to_pending() {
        let mut session = EditSession::new();
        session.edit("r1", cost(3.0), 2);
        assert!(session.is_edited("r1"));
        assert!(session.is_pending("r1"));
    }

    #[test]
    fn test_cancel_keeps_pending() {
        let mut session = EditSession::new();
        session.edit("r1", cost(3.0), 1);
        session.confirm("r1");
        session.edit("r1", name("Lona"), 1);
        session.set_input("r1", "cost", "3.".to_string());
        session.cancel("r1");

        assert_eq!(session.input("r1", "cost"), None);
        assert_eq!(session.effective("r1"), Some(cost(3.0)));
    }

    #[test]
    fn test_bulk_apply_merges_into_existing_pending() {
        let mut session = EditSession::new();
        session.edit("a", name("Vinilo"), 1);
        session.confirm("a");

        let ids = vec!["a".to_string(), "b".to_string()];
        let applied = session.bulk_apply(&ids, |_| Some(cost(9.5)));
        assert_eq!(applied, 2);

        let merged = session.merged();
        assert_eq!(
            merged.get("a"),
            Some(&NamePatch {
                name: Some("Vinilo".to_string()),
                cost: Some(9.5)
            })
        );
        assert_eq!(merged.get("b"), Some(&cost(9.5)));
    }

    #[test]
    fn test_merged_prefers_edited_over_pending() {
        let mut session = EditSession::new();
        session.bulk_apply(&["a".to_string()], |_| Some(cost(1.0)));
        session.edit("a", cost(2.0), 1);
        assert_eq!(session.merged().get("a"), Some(&cost(2.0)));
        assert_eq!(session.pending_count(), 1);
    }

    #[test]
    fn test_settle_clears_only_saved_rows() {
        let mut session = EditSession::new();
        session.bulk_apply(&["a".to_string(), "b".to_string()], |_| Some(cost(1.0)));

        let saved: BTreeSet<String> = ["a".to_string()].into_iter().collect();
        session.settle(&saved);

        assert!(!session.is_pending("a"));
        assert!(session.is_pending("b"));
        assert!(session.has_changes());
    }

    #[test]
    fn test_discard() {
        let mut session = EditSession::new();
        session.edit("a", cost(1.0), 3);
        session.set_input("a", "cost", "1".to_string());
        session.discard();
        assert!(!session.has_changes());
        assert_eq!(session.input("a", "cost"), None);
    }
}
