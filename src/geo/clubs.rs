//! Padel club catalog.

use super::{filter_by_radius, ClubMarker, GeoPoint, PointOfInterest};

/// A padel club shown on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct PadelClub {
    pub poi: PointOfInterest,
    pub description: String,
}

impl PadelClub {
    fn new(
        id: &str,
        name: &str,
        (latitude, longitude): (f64, f64),
        description: &str,
        rating: f64,
    ) -> Self {
        Self {
            poi: PointOfInterest::new(
                id,
                name,
                GeoPoint::new_unchecked(latitude, longitude),
                rating,
            ),
            description: description.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.poi.id
    }

    pub fn name(&self) -> &str {
        &self.poi.name
    }

    pub fn location(&self) -> GeoPoint {
        self.poi.location
    }

    pub fn rating(&self) -> f64 {
        self.poi.rating
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.poi.distance_km
    }

    /// Marker data for the map.
    pub fn marker(&self) -> ClubMarker {
        ClubMarker {
            coordinate: self.poi.location,
            title: self.poi.name.clone(),
            description: self.description.clone(),
        }
    }
}

/// Clubs within `radius_km` of `origin`, in catalog order, with distances.
pub fn filter_clubs_by_radius(
    origin: GeoPoint,
    clubs: &[PadelClub],
    radius_km: f64,
) -> Vec<PadelClub> {
    let pois: Vec<PointOfInterest> = clubs.iter().map(|c| c.poi.clone()).collect();
    let kept = filter_by_radius(origin, &pois, radius_km);

    // Ids are unique, so each kept POI matches exactly one club.
    kept.into_iter()
        .filter_map(|poi| {
            clubs.iter().find(|c| c.poi.id == poi.id).map(|club| PadelClub {
                poi,
                ..club.clone()
            })
        })
        .collect()
}

/// The built-in catalog of clubs around central London.
pub fn london_catalog() -> Vec<PadelClub> {
    vec![
        PadelClub::new(
            "1",
            "Hyde Park Padel Club",
            (51.5085, -0.1515),
            "Premium padel club near Hyde Park with 6 courts",
            4.5,
        ),
        PadelClub::new(
            "2",
            "Camden Padel Center",
            (51.5290, -0.1255),
            "Modern facility with professional coaching in Camden",
            4.2,
        ),
        PadelClub::new(
            "3",
            "Royal Chelsea Padel",
            (51.4874, -0.1687),
            "Exclusive club with tournament facilities in Chelsea",
            4.8,
        ),
        PadelClub::new(
            "4",
            "Canary Wharf Padel",
            (51.5054, -0.0235),
            "State-of-the-art facility in the financial district",
            4.1,
        ),
        PadelClub::new(
            "5",
            "Southbank Padel Club",
            (51.5045, -0.1097),
            "Riverside courts with Thames views",
            4.3,
        ),
        PadelClub::new(
            "6",
            "Islington Sports Padel",
            (51.5416, -0.1022),
            "Community-focused club in North London",
            4.6,
        ),
        PadelClub::new(
            "7",
            "Kensington Padel Academy",
            (51.4994, -0.1947),
            "Premium training academy in affluent Kensington",
            4.7,
        ),
        PadelClub::new(
            "8",
            "Hackney Padel Courts",
            (51.5450, -0.0553),
            "Hip East London club with vibrant atmosphere",
            4.0,
        ),
        PadelClub::new(
            "9",
            "Westminster Padel Elite",
            (51.4975, -0.1357),
            "Central London location near Parliament",
            4.4,
        ),
        PadelClub::new(
            "10",
            "Greenwich Padel Park",
            (51.4816, 0.0052),
            "Beautiful courts near Greenwich Observatory",
            4.2,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const LONDON: GeoPoint = GeoPoint::new_unchecked(51.5074, -0.1278);

    #[test]
    fn test_catalog_ids_unique() {
        let catalog = london_catalog();
        let ids: HashSet<&str> = catalog.iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_all_clubs_within_twenty_km() {
        let catalog = london_catalog();
        let clubs = filter_clubs_by_radius(LONDON, &catalog, 20.0);
        assert_eq!(clubs.len(), catalog.len());
        assert!(clubs.iter().all(|c| c.distance_km().is_some()));
    }

    #[test]
    fn test_filter_keeps_metadata_and_order() {
        let catalog = london_catalog();
        let clubs = filter_clubs_by_radius(LONDON, &catalog, 3.0);

        let ids: Vec<&str> = clubs.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["1", "2", "5", "9"]);
        assert_eq!(clubs[2].description, "Riverside courts with Thames views");
        assert!(clubs.iter().all(|c| c.distance_km().unwrap() <= 3.0));
    }

    #[test]
    fn test_marker_uses_name_and_description() {
        let club = &london_catalog()[0];
        let marker = club.marker();
        assert_eq!(marker.title, "Hyde Park Padel Club");
        assert_eq!(marker.description, club.description);
        assert_eq!(marker.coordinate, club.location());
    }

    #[test]
    fn test_catalog_rows_carry_rating_and_description() {
        let catalog = london_catalog();
        assert_eq!(catalog.len(), 10);
        assert!((catalog[2].rating() - 4.8).abs() < 1e-9);
        assert_eq!(catalog[9].name(), "Greenwich Padel Park");
        assert!(catalog.iter().all(|c| !c.description.is_empty()));
    }
}
