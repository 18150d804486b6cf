use crate::models::TouristPlace;

/// Filter state for the home list: selected category plus free-text query.
///
/// `category: None` means every category, mirroring the "Todos" chip of the
/// original screen.
#[derive(Debug, Clone, Default)]
pub struct HomeFilter {
    pub category: Option<String>,
    pub query: String,
}

impl HomeFilter {
    pub fn apply(&self, places: &[TouristPlace]) -> Vec<TouristPlace> {
        places
            .iter()
            .filter(|place| self.matches_category(place) && self.matches_query(place))
            .cloned()
            .collect()
    }

    fn matches_category(&self, place: &TouristPlace) -> bool {
        match &self.category {
            Some(category) => place.categoria == *category,
            None => true,
        }
    }

    fn matches_query(&self, place: &TouristPlace) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let query = self.query.to_lowercase();
        place.name.to_lowercase().contains(&query)
            || place.description.to_lowercase().contains(&query)
    }
}

/// Distinct categories across the snapshot, sorted. Feeds the category chips.
pub fn categories(places: &[TouristPlace]) -> Vec<String> {
    let mut categories: Vec<String> = places
        .iter()
        .map(|place| place.categoria.clone())
        .filter(|categoria| !categoria.is_empty())
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_places() -> Vec<TouristPlace> {
        vec![
            TouristPlace::new(1, "Monasterio de Santa Catalina")
                .with_categoria("Histórico")
                .with_description("Ciudadela religiosa del siglo XVI"),
            TouristPlace::new(2, "Cañón del Colca")
                .with_categoria("Naturaleza")
                .with_description("Uno de los cañones más profundos del mundo"),
            TouristPlace::new(3, "Mirador de Yanahuara").with_categoria("Histórico"),
        ]
    }

    #[test]
    fn test_no_filter_returns_everything() {
        let filtered = HomeFilter::default().apply(&sample_places());
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_category_filter() {
        let filter = HomeFilter {
            category: Some("Histórico".to_string()),
            query: String::new(),
        };

        let filtered = filter.apply(&sample_places());
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|p| p.categoria == "Histórico"));
    }

    #[test]
    fn test_query_matches_name_case_insensitive() {
        let filter = HomeFilter {
            category: None,
            query: "colca".to_string(),
        };

        let filtered = filter.apply(&sample_places());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[test]
    fn test_query_matches_description() {
        let filter = HomeFilter {
            category: None,
            query: "siglo XVI".to_string(),
        };

        let filtered = filter.apply(&sample_places());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_category_and_query_combine() {
        let filter = HomeFilter {
            category: Some("Histórico".to_string()),
            query: "mirador".to_string(),
        };

        let filtered = filter.apply(&sample_places());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 3);
    }

    #[test]
    fn test_categories_are_distinct_and_sorted() {
        assert_eq!(categories(&sample_places()), vec!["Histórico", "Naturaleza"]);
    }
}
