//! User-facing strings.

/// Every piece of text the app renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub title: &'static str,
    pub color_columns: &'static str,
    pub sort_by_country: &'static str,
    pub unsort_by_country: &'static str,
    pub reset: &'static str,
    pub filter_hint: &'static str,
    pub header_picture: &'static str,
    pub header_first_name: &'static str,
    pub header_last_name: &'static str,
    pub header_country: &'static str,
    pub header_actions: &'static str,
    pub delete: &'static str,
    pub loading: &'static str,
    /// Suffix of the user count, e.g. "3 usuarios".
    pub users_suffix: &'static str,
}

impl Labels {
    pub const SPANISH: Self = Self {
        title: "Prueba Tecnica",
        color_columns: "Colorear columnas",
        sort_by_country: "Ordenar por pais",
        unsort_by_country: "No ordenar por pais",
        reset: "Resetear estado",
        filter_hint: "Filtrar por pais",
        header_picture: "Foto",
        header_first_name: "Nombre",
        header_last_name: "Apellido",
        header_country: "Pais",
        header_actions: "Acciones",
        delete: "Eliminar",
        loading: "Cargando usuarios...",
        users_suffix: "usuarios",
    };

    pub const ENGLISH: Self = Self {
        title: "Technical Test",
        color_columns: "Color rows",
        sort_by_country: "Sort by country",
        unsort_by_country: "Don't sort by country",
        reset: "Reset state",
        filter_hint: "Filter by country",
        header_picture: "Picture",
        header_first_name: "First name",
        header_last_name: "Last name",
        header_country: "Country",
        header_actions: "Actions",
        delete: "Delete",
        loading: "Loading users...",
        users_suffix: "users",
    };

    /// Label of the sort button for the current sort flag.
    pub fn sort_toggle(&self, sorted: bool) -> &'static str {
        if sorted {
            self.unsort_by_country
        } else {
            self.sort_by_country
        }
    }

    pub fn users_count(&self, count: usize) -> String {
        format!("{count} {}", self.users_suffix)
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::SPANISH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_spanish() {
        let labels = Labels::default();
        assert_eq!(labels.color_columns, "Colorear columnas");
        assert_eq!(labels.users_count(3), "3 usuarios");
    }

    #[test]
    fn test_sort_toggle_reflects_state() {
        let labels = Labels::ENGLISH;
        assert_eq!(labels.sort_toggle(false), "Sort by country");
        assert_eq!(labels.sort_toggle(true), "Don't sort by country");
    }
}
