//! Static category tables: key → icon token and display name.
//!
//! Lookups are exact and case-sensitive. Unknown keys degrade to the
//! generic document icon and the "General" label.

/// Icon used for unknown categories and generic documents.
pub const GENERIC_ICON: &str = "fas fa-file-alt";

/// Display name used for unknown categories.
pub const GENERIC_NAME: &str = "General";

/// One known category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryEntry {
    pub key: &'static str,
    pub icon: &'static str,
    pub name: &'static str,
}

const fn entry(key: &'static str, icon: &'static str, name: &'static str) -> CategoryEntry {
    CategoryEntry { key, icon, name }
}

/// All known categories, in filter-bar order.
pub const CATALOG: [CategoryEntry; 12] = [
    entry("analisis", "fas fa-chart-bar", "Análisis"),
    entry("politica", "fas fa-landmark", "Política"),
    entry("ensayo", "fas fa-feather-alt", "Ensayo"),
    entry("reflexion", "fas fa-brain", "Reflexión"),
    entry("entrevista", "fas fa-microphone-alt", "Entrevista"),
    entry("critica", "fas fa-exclamation-triangle", "Crítica"),
    entry("economia", "fas fa-chart-line", "Economía"),
    entry("cultura", "fas fa-theater-masks", "Cultura"),
    entry("historia", "fas fa-history", "Historia"),
    entry("tecnologia", "fas fa-laptop-code", "Tecnología"),
    entry("internacional", "fas fa-globe-americas", "Internacional"),
    entry("educacion", "fas fa-graduation-cap", "Educación"),
];

pub fn lookup(key: &str) -> Option<&'static CategoryEntry> {
    CATALOG.iter().find(|e| e.key == key)
}

/// Icon token for a category key, or [`GENERIC_ICON`].
pub fn icon_for(key: &str) -> &'static str {
    lookup(key).map_or(GENERIC_ICON, |e| e.icon)
}

/// Display name for a category key, or [`GENERIC_NAME`].
pub fn name_for(key: &str) -> &'static str {
    lookup(key).map_or(GENERIC_NAME, |e| e.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys_resolve() {
        assert_eq!(icon_for("politica"), "fas fa-landmark");
        assert_eq!(name_for("politica"), "Política");
        assert_eq!(icon_for("educacion"), "fas fa-graduation-cap");
        assert_eq!(name_for("reflexion"), "Reflexión");
    }

    #[test]
    fn test_every_entry_round_trips_through_lookup() {
        for e in CATALOG.iter() {
            assert_eq!(icon_for(e.key), e.icon);
            assert_eq!(name_for(e.key), e.name);
        }
    }

    #[test]
    fn test_unknown_keys_fall_back() {
        for key in ["", "deportes", "Politica", "POLITICA", " politica", "constructor"] {
            assert_eq!(icon_for(key), GENERIC_ICON, "icon for {:?}", key);
            assert_eq!(name_for(key), GENERIC_NAME, "name for {:?}", key);
        }
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<_> = CATALOG.iter().map(|e| e.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 12);
    }
}
