use serde::Deserialize;

/// A business as reported by the places directory's place-details lookup.
///
/// Every field is optional; the directory omits whatever it does not know.
/// Deserializes straight from the directory's JSON shape (see [`PlaceDetails`]).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "PlaceDetails")]
pub struct BusinessRecord {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Star rating, 0–5.
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    pub website_url: Option<String>,
    /// Stable directory identity (`place_id`).
    pub external_id: Option<String>,
}

impl BusinessRecord {
    /// Returns `true` if the record carries a non-blank phone number.
    #[must_use]
    pub fn has_phone(&self) -> bool {
        self.phone.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}

/// Wire shape of a place-details result.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub vicinity: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
    pub website: Option<String>,
    pub place_id: Option<String>,
}

impl From<PlaceDetails> for BusinessRecord {
    fn from(details: PlaceDetails) -> Self {
        // Empty strings from the directory mean "not provided".
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());

        Self {
            name: present(details.name),
            address: present(details.formatted_address).or_else(|| present(details.vicinity)),
            phone: present(details.formatted_phone_number),
            rating: details.rating,
            review_count: details.user_ratings_total,
            website_url: present(details.website),
            external_id: present(details.place_id),
        }
    }
}
