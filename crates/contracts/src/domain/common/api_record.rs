/// Трейт записи, получаемой из REST API.
///
/// Экземплярные методы отдают данные конкретной записи, статические
/// описывают коллекцию: индекс, путь REST и названия для UI.
pub trait ApiRecord {
    // ============================================================================
    // Данные записи
    // ============================================================================

    /// ID записи как строка (в API бывают и числовые, и UUID)
    fn id(&self) -> &str;

    /// Бизнес-код записи (например, "INS-0012")
    fn code(&self) -> &str;

    /// Название записи
    fn description(&self) -> &str;

    // ============================================================================
    // Метаданные коллекции
    // ============================================================================

    /// Индекс в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции в API (например, "inventario", "contabilidad/cuentas")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI (единственное число)
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число)
    fn list_name() -> &'static str;

    // ============================================================================
    // Методы с реализацией по умолчанию
    // ============================================================================

    /// Путь коллекции, например "/api/inventario"
    fn collection_path() -> String {
        format!("/api/{}", Self::collection_name())
    }

    /// Путь записи, например "/api/inventario/42"
    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::collection_path(), id)
    }

    /// Путь массовых операций
    fn bulk_path() -> String {
        format!("{}/bulk", Self::collection_path())
    }

    /// Ключ таба/страницы, например "a001_inventario"
    fn page_key() -> String {
        format!(
            "{}_{}",
            Self::aggregate_index(),
            Self::collection_name().replace('/', "_")
        )
    }
}
