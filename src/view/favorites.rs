use crate::models::TouristPlace;

/// The favorites screen subset: rows with the favorite flag set.
pub fn favorites(places: &[TouristPlace]) -> Vec<TouristPlace> {
    places
        .iter()
        .filter(|place| place.is_favorite)
        .cloned()
        .collect()
}
