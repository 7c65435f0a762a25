//! Key-based text lookup
//!
//! Lookup falls back from the requested locale to [`DEFAULT_LOCALE`] and then
//! to the key itself. Placeholders of the form `{{name}}` are substituted by
//! [`interpolate`].

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Locale used when the requested one lacks a key
pub const DEFAULT_LOCALE: &str = "en";

/// Text resources for one locale
#[derive(Debug, Clone, Copy)]
pub struct Bundle {
    pub locale: &'static str,
    pub entries: &'static [(&'static str, &'static str)],
}

impl Bundle {
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, text)| *text)
    }
}

/// Look up `key` for `requested`, falling back to the default locale, then the key.
pub fn translate(requested: &str, available: &[Bundle], key: &str) -> String {
    let lookup = |locale: &str| {
        available
            .iter()
            .find(|bundle| bundle.locale == locale)
            .and_then(|bundle| bundle.get(key))
    };
    lookup(requested)
        .or_else(|| lookup(DEFAULT_LOCALE))
        .map(str::to_string)
        .unwrap_or_else(|| key.to_string())
}

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid placeholder pattern"));

/// Replace `{{name}}` placeholders; unknown placeholders are left as-is
pub fn interpolate(text: &str, params: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Pick a supported locale from a language tag (`es-ES`) or POSIX locale
/// (`de_DE.UTF-8`). Unsupported or empty tags give the default locale.
pub fn detect_locale(tag: &str) -> &'static str {
    let primary = tag
        .split(['-', '_', '.', '@'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    BUNDLES
        .iter()
        .map(|bundle| bundle.locale)
        .find(|locale| *locale == primary)
        .unwrap_or(DEFAULT_LOCALE)
}

/// Text lookup bound to one locale
#[derive(Debug, Clone)]
pub struct Translator {
    locale: &'static str,
    bundles: &'static [Bundle],
}

impl Translator {
    /// Translator for the best supported match of `tag`
    pub fn new(tag: &str) -> Self {
        Self {
            locale: detect_locale(tag),
            bundles: &BUNDLES,
        }
    }

    pub fn locale(&self) -> &'static str {
        self.locale
    }

    pub fn t(&self, key: &str) -> String {
        translate(self.locale, self.bundles, key)
    }

    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        interpolate(&self.t(key), params)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

/// All bundled locales
pub static BUNDLES: [Bundle; 3] = [
    Bundle {
        locale: "en",
        entries: EN,
    },
    Bundle {
        locale: "es",
        entries: ES,
    },
    Bundle {
        locale: "de",
        entries: DE,
    },
];

const EN: &[(&str, &str)] = &[
    ("app.title", "SmartCart"),
    ("app.empty.title", "Your list is empty"),
    (
        "app.empty.subtitle",
        "Add items below, or let AI split and sort a whole list for you.",
    ),
    ("action.autoSort", "Auto-sort with AI"),
    ("action.stats", "Statistics"),
    ("action.clearCompleted", "Clear completed"),
    ("action.clearAll", "Clear list"),
    (
        "dialog.clearList",
        "Are you sure you want to clear the entire list?",
    ),
    ("dialog.clearCompleted", "Remove all completed items?"),
    ("input.placeholder", "Add an item..."),
    ("input.tooltip.aiSort", "Smart add with AI"),
    (
        "input.tip",
        "Tip: type several items separated by commas and use smart-add.",
    ),
    ("stats.title", "Shopping statistics"),
    ("stats.progress", "Progress"),
    (
        "stats.completedOf",
        "{{completed}} of {{total}} items completed",
    ),
    ("stats.byCategory", "Items by category"),
    ("stats.empty", "No items yet"),
    ("message.added", "Added {{name}} to {{category}}"),
    ("message.addedMany", "Added {{count}} items"),
    (
        "message.fallback",
        "AI unavailable ({{reason}}), added as entered",
    ),
    ("message.sorted", "Re-categorized {{count}} items"),
    ("message.unchanged", "No categories changed"),
    ("message.toggledDone", "Checked off {{name}}"),
    ("message.toggledOpen", "Unchecked {{name}}"),
    ("message.removed", "Removed {{name}}"),
    ("message.cleared", "List cleared"),
    ("message.clearedCompleted", "Removed {{count}} completed items"),
    ("message.nothingCompleted", "No completed items to clear"),
    ("message.aborted", "Aborted"),
    ("message.sortFallback", "AI unavailable ({{reason}}), categories left unchanged"),
    ("reason.missingCredential", "no API key configured"),
    ("reason.emptyInput", "nothing to categorize"),
    ("reason.emptyResponse", "empty response"),
    ("reason.service", "service error: {{detail}}"),
    ("reason.malformed", "malformed response: {{detail}}"),
    ("stats.remaining", "{{count}} still to get"),
    ("spinner.smartAdd", "Categorizing..."),
    ("spinner.autoSort", "Sorting items..."),
    ("category.Fruits & Vegetables", "Fruits & Vegetables"),
    ("category.Meat & Fish", "Meat & Fish"),
    ("category.Dairy & Eggs", "Dairy & Eggs"),
    ("category.Bakery", "Bakery"),
    ("category.Pantry", "Pantry"),
    ("category.Frozen", "Frozen"),
    ("category.Beverages", "Beverages"),
    ("category.Household", "Household"),
    ("category.Other", "Other"),
];

const ES: &[(&str, &str)] = &[
    ("app.title", "SmartCart"),
    ("app.empty.title", "Tu lista está vacía"),
    (
        "app.empty.subtitle",
        "Añade artículos abajo o deja que la IA divida y ordene una lista completa.",
    ),
    ("action.autoSort", "Ordenar con IA"),
    ("action.stats", "Estadísticas"),
    ("action.clearCompleted", "Borrar completados"),
    ("action.clearAll", "Vaciar lista"),
    (
        "dialog.clearList",
        "¿Seguro que quieres vaciar toda la lista?",
    ),
    (
        "dialog.clearCompleted",
        "¿Eliminar todos los artículos completados?",
    ),
    ("input.placeholder", "Añadir un artículo..."),
    ("input.tooltip.aiSort", "Añadir con IA"),
    (
        "input.tip",
        "Consejo: escribe varios artículos separados por comas y usa smart-add.",
    ),
    ("stats.title", "Estadísticas de compra"),
    ("stats.progress", "Progreso"),
    (
        "stats.completedOf",
        "{{completed}} de {{total}} artículos completados",
    ),
    ("stats.byCategory", "Artículos por categoría"),
    ("stats.empty", "Todavía no hay artículos"),
    ("message.added", "{{name}} añadido a {{category}}"),
    ("message.addedMany", "{{count}} artículos añadidos"),
    (
        "message.fallback",
        "IA no disponible ({{reason}}), añadido tal cual",
    ),
    ("message.sorted", "{{count}} artículos recategorizados"),
    ("message.unchanged", "Ninguna categoría cambió"),
    ("message.toggledDone", "{{name}} marcado"),
    ("message.toggledOpen", "{{name}} desmarcado"),
    ("message.removed", "{{name}} eliminado"),
    ("message.cleared", "Lista vaciada"),
    (
        "message.clearedCompleted",
        "{{count}} artículos completados eliminados",
    ),
    ("message.nothingCompleted", "No hay artículos completados"),
    ("message.aborted", "Cancelado"),
    ("message.sortFallback", "IA no disponible ({{reason}}), categorías sin cambios"),
    ("reason.missingCredential", "no hay clave de API configurada"),
    ("reason.emptyInput", "nada que categorizar"),
    ("reason.emptyResponse", "respuesta vacía"),
    ("reason.service", "error del servicio: {{detail}}"),
    ("reason.malformed", "respuesta no válida: {{detail}}"),
    ("stats.remaining", "faltan {{count}}"),
    ("spinner.smartAdd", "Categorizando..."),
    ("spinner.autoSort", "Ordenando artículos..."),
    ("category.Fruits & Vegetables", "Frutas y verduras"),
    ("category.Meat & Fish", "Carne y pescado"),
    ("category.Dairy & Eggs", "Lácteos y huevos"),
    ("category.Bakery", "Panadería"),
    ("category.Pantry", "Despensa"),
    ("category.Frozen", "Congelados"),
    ("category.Beverages", "Bebidas"),
    ("category.Household", "Hogar"),
    ("category.Other", "Otros"),
];

const DE: &[(&str, &str)] = &[
    ("app.title", "SmartCart"),
    ("app.empty.title", "Deine Liste ist leer"),
    (
        "app.empty.subtitle",
        "Füge unten Artikel hinzu oder lass die KI eine ganze Liste aufteilen und sortieren.",
    ),
    ("action.autoSort", "Mit KI sortieren"),
    ("action.stats", "Statistik"),
    ("action.clearCompleted", "Erledigte entfernen"),
    ("action.clearAll", "Liste leeren"),
    (
        "dialog.clearList",
        "Möchtest du wirklich die gesamte Liste leeren?",
    ),
    ("dialog.clearCompleted", "Alle erledigten Artikel entfernen?"),
    ("input.placeholder", "Artikel hinzufügen..."),
    ("input.tooltip.aiSort", "Mit KI hinzufügen"),
    ("stats.title", "Einkaufsstatistik"),
    ("stats.progress", "Fortschritt"),
    (
        "stats.completedOf",
        "{{completed}} von {{total}} Artikeln erledigt",
    ),
    ("stats.byCategory", "Artikel nach Kategorie"),
    ("stats.empty", "Noch keine Artikel"),
    ("message.added", "{{name}} zu {{category}} hinzugefügt"),
    ("message.addedMany", "{{count}} Artikel hinzugefügt"),
    (
        "message.fallback",
        "KI nicht verfügbar ({{reason}}), wie eingegeben hinzugefügt",
    ),
    ("message.sorted", "{{count}} Artikel neu kategorisiert"),
    ("message.unchanged", "Keine Kategorien geändert"),
    ("message.toggledDone", "{{name}} abgehakt"),
    ("message.toggledOpen", "{{name}} wieder offen"),
    ("message.removed", "{{name}} entfernt"),
    ("message.cleared", "Liste geleert"),
    (
        "message.clearedCompleted",
        "{{count}} erledigte Artikel entfernt",
    ),
    ("message.nothingCompleted", "Keine erledigten Artikel"),
    ("message.aborted", "Abgebrochen"),
    ("message.sortFallback", "KI nicht verfügbar ({{reason}}), Kategorien unverändert"),
    ("reason.missingCredential", "kein API-Schlüssel konfiguriert"),
    ("reason.emptyInput", "nichts zu kategorisieren"),
    ("reason.emptyResponse", "leere Antwort"),
    ("reason.service", "Dienstfehler: {{detail}}"),
    ("reason.malformed", "ungültige Antwort: {{detail}}"),
    ("stats.remaining", "noch {{count}} offen"),
    ("spinner.smartAdd", "Kategorisiere..."),
    ("spinner.autoSort", "Sortiere Artikel..."),
    ("category.Fruits & Vegetables", "Obst & Gemüse"),
    ("category.Meat & Fish", "Fleisch & Fisch"),
    ("category.Dairy & Eggs", "Milchprodukte & Eier"),
    ("category.Bakery", "Bäckerei"),
    ("category.Pantry", "Vorratskammer"),
    ("category.Frozen", "Tiefkühlware"),
    ("category.Beverages", "Getränke"),
    ("category.Household", "Haushalt"),
    ("category.Other", "Sonstiges"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    const TEST_BUNDLES: [Bundle; 2] = [
        Bundle {
            locale: "en",
            entries: &[("greeting", "Hello"), ("farewell", "Bye")],
        },
        Bundle {
            locale: "fr",
            entries: &[("greeting", "Bonjour")],
        },
    ];

    #[test]
    fn test_translate_three_tiers() {
        assert_eq!(translate("fr", &TEST_BUNDLES, "greeting"), "Bonjour");
        assert_eq!(translate("fr", &TEST_BUNDLES, "farewell"), "Bye");
        assert_eq!(translate("fr", &TEST_BUNDLES, "missing.key"), "missing.key");
        assert_eq!(translate("ja", &TEST_BUNDLES, "greeting"), "Hello");
    }

    #[test]
    fn test_interpolate() {
        assert_eq!(
            interpolate("{{a}} of {{b}}", &[("a", "1"), ("b", "3")]),
            "1 of 3"
        );
        assert_eq!(interpolate("{{a}} and {{a}}", &[("a", "x")]), "x and x");
        assert_eq!(interpolate("keep {{unknown}}", &[]), "keep {{unknown}}");
    }

    #[test]
    fn test_detect_locale() {
        assert_eq!(detect_locale("es-ES"), "es");
        assert_eq!(detect_locale("de_DE.UTF-8"), "de");
        assert_eq!(detect_locale("EN-us"), "en");
        assert_eq!(detect_locale("ja-JP"), "en");
        assert_eq!(detect_locale("C"), "en");
        assert_eq!(detect_locale(""), "en");
    }

    #[test]
    fn test_translator_with_params() {
        let t = Translator::new("es-MX");
        assert_eq!(t.locale(), "es");
        assert_eq!(
            t.t_with("stats.completedOf", &[("completed", "2"), ("total", "5")]),
            "2 de 5 artículos completados"
        );
    }

    #[test]
    fn test_german_falls_back_to_english_for_missing_key() {
        let t = Translator::new("de");
        assert_eq!(
            t.t("input.tip"),
            "Tip: type several items separated by commas and use smart-add."
        );
    }

    #[test]
    fn test_every_category_is_localized() {
        for bundle in BUNDLES.iter() {
            for category in Category::all() {
                assert!(
                    bundle.get(&category.i18n_key()).is_some(),
                    "{} lacks {}",
                    bundle.locale,
                    category.i18n_key()
                );
            }
        }
    }

    #[test]
    fn test_bundles_have_no_extra_keys() {
        let en = &BUNDLES[0];
        for bundle in BUNDLES.iter().skip(1) {
            for (key, _) in bundle.entries {
                assert!(en.get(key).is_some(), "{} has unknown key {}", bundle.locale, key);
            }
        }
    }

    #[test]
    fn test_reason_keys_take_detail() {
        let t = Translator::new("de");
        assert_eq!(
            t.t_with("reason.service", &[("detail", "503")]),
            "Dienstfehler: 503"
        );
        assert_eq!(t.t("reason.missingCredential"), "kein API-Schlüssel konfiguriert");
    }
}
