use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A tourist point of interest in Arequipa.
///
/// The favorite flag is eventually consistent between the local cache and the
/// remote store; every other field is overwritten wholesale on each sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouristPlace {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub precio: f64,
    pub categoria: String,
    pub imagen: String,
    pub rating: f64,
    pub is_favorite: bool,
    /// Geo-location as stored on the wire: "lat"/"lng" keys.
    pub location: HashMap<String, f64>,
    pub transport_info: String,
    pub local_tips: Vec<String>,
    pub services: HashMap<String, bool>,
}

impl TouristPlace {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            precio: 0.0,
            categoria: String::new(),
            imagen: String::new(),
            rating: 0.0,
            is_favorite: false,
            location: HashMap::new(),
            transport_info: String::new(),
            local_tips: Vec::new(),
            services: HashMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_precio(mut self, precio: f64) -> Self {
        self.precio = precio;
        self
    }

    pub fn with_categoria(mut self, categoria: impl Into<String>) -> Self {
        self.categoria = categoria.into();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }

    pub fn with_transport_info(mut self, transport_info: impl Into<String>) -> Self {
        self.transport_info = transport_info.into();
        self
    }

    pub fn with_local_tips(mut self, local_tips: Vec<String>) -> Self {
        self.local_tips = local_tips;
        self
    }

    pub fn with_services(mut self, services: HashMap<String, bool>) -> Self {
        self.services = services;
        self
    }
}

impl fmt::Display for TouristPlace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.len()))?;
        writeln!(f, "Category: {}", self.categoria)?;
        writeln!(f, "Price: S/ {:.2}", self.precio)?;
        writeln!(f, "Rating: {:.1}", self.rating)?;
        writeln!(f, "Favorite: {}", if self.is_favorite { "yes" } else { "no" })?;

        if !self.description.is_empty() {
            writeln!(f, "\n{}", self.description)?;
        }
        if !self.transport_info.is_empty() {
            writeln!(f, "\nTransport: {}", self.transport_info)?;
        }
        if !self.local_tips.is_empty() {
            writeln!(f, "\nTips:")?;
            for tip in &self.local_tips {
                writeln!(f, "  - {}", tip)?;
            }
        }
        if !self.services.is_empty() {
            writeln!(f, "\nServices:")?;
            let mut names: Vec<_> = self.services.keys().collect();
            names.sort();
            for name in names {
                let available = self.services[name];
                writeln!(f, "  {}: {}", name, if available { "sí" } else { "no" })?;
            }
        }

        Ok(())
    }
}
