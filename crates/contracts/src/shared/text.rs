//! Нормализация текста для поиска и очистка строковых значений перед отправкой

/// Снимает диакритику испанского/латинского набора
fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

/// Приводит строку к виду для сравнения: нижний регистр, без диакритики,
/// пробелы по краям убраны, внутренние серии пробелов схлопнуты.
pub fn normalize_text(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .map(fold_char)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Поиск подстроки без учёта регистра и диакритики.
/// Пустой запрос совпадает со всем.
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    let needle = normalize_text(needle);
    if needle.is_empty() {
        return true;
    }
    normalize_text(haystack).contains(&needle)
}

/// Совпадение запроса хотя бы с одним из полей
pub fn any_field_matches<'a, I>(fields: I, query: &str) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = normalize_text(query);
    if needle.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .any(|field| normalize_text(field).contains(&needle))
}

/// Очистка строкового значения массового изменения:
/// все кавычки удаляются, пробелы схлопываются.
pub fn clean_text_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '"' | '\'' | '“' | '”' | '‘' | '’' | '«' | '»' | '`'))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Vinilo  ÁCIDO  "), "vinilo acido");
        assert_eq!(normalize_text("Compañía"), "compania");
        assert_eq!(normalize_text("pingüino"), "pinguino");
    }

    #[test]
    fn test_contains_normalized() {
        assert!(contains_normalized("Lona Frontlit Mate", "frontlit"));
        assert!(contains_normalized("Impresión", "impresion"));
        assert!(contains_normalized("cualquier cosa", "   "));
        assert!(!contains_normalized("Lona", "vinilo"));
    }

    #[test]
    fn test_any_field_matches() {
        assert!(any_field_matches(["INS-001", "Tinta", "Insumos"], "ins-001"));
        assert!(!any_field_matches(["INS-001", "Tinta"], "papel"));
    }

    #[test]
    fn test_clean_text_value() {
        assert_eq!(clean_text_value("  \"Metro  cuadrado\"  "), "Metro cuadrado");
        assert_eq!(clean_text_value("“Insumos”"), "Insumos");
        assert_eq!(clean_text_value("O'Brien"), "OBrien");
    }
}
