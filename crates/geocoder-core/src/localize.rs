// crates/geocoder-core/src/localize.rs
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// UI strings for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiStrings {
    pub placeholder: &'static str,
    pub error_connection_failed: &'static str,
    pub error_no_results: &'static str,
}

const EN: UiStrings = UiStrings {
    placeholder: "Search",
    error_connection_failed: "There was an error reaching the server",
    error_no_results: "No results found",
};

static TABLE: Lazy<HashMap<&'static str, UiStrings>> = Lazy::new(|| {
    HashMap::from([
        ("en", EN),
        (
            "de",
            UiStrings {
                placeholder: "Suche",
                error_connection_failed: "Verbindung zum Server fehlgeschlagen",
                error_no_results: "Keine Ergebnisse gefunden",
            },
        ),
        (
            "es",
            UiStrings {
                placeholder: "Buscar",
                error_connection_failed: "No se pudo conectar con el servidor",
                error_no_results: "No se encontraron resultados",
            },
        ),
        (
            "fr",
            UiStrings {
                placeholder: "Rechercher",
                error_connection_failed: "Impossible de joindre le serveur",
                error_no_results: "Aucun résultat trouvé",
            },
        ),
        (
            "it",
            UiStrings {
                placeholder: "Ricerca",
                error_connection_failed: "Errore di connessione al server",
                error_no_results: "Nessun risultato trovato",
            },
        ),
        (
            "nl",
            UiStrings {
                placeholder: "Zoeken",
                error_connection_failed: "Er kon geen verbinding met de server worden gemaakt",
                error_no_results: "Geen resultaten gevonden",
            },
        ),
    ])
});

/// Strings for the primary subtag of the first language in `language`
/// (`"de-CH,fr"` → German), English when unknown or unset.
pub fn strings_for(language: Option<&str>) -> &'static UiStrings {
    let primary = language
        .and_then(|l| l.split(|c: char| c == ',' || c.is_whitespace()).find(|s| !s.is_empty()))
        .and_then(|tag| tag.split(['-', '_']).next())
        .map(str::to_ascii_lowercase);
    primary
        .and_then(|p| TABLE.get(p.as_str()))
        .unwrap_or(&EN)
}
