use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccommodationId(pub i64);

/// A bookable unit as described by the read-only catalog.
///
/// Field names on the wire follow the catalog file format, so `capacity` is
/// serialized as `guests`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccommodationRecord {
    pub id: AccommodationId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(rename = "price_per_night")]
    pub nightly_price: f64,
    #[serde(rename = "image_url", default)]
    pub image: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(rename = "guests")]
    pub capacity: u32,
}

impl AccommodationRecord {
    pub fn seats(&self, guests: i64) -> bool {
        i64::from(self.capacity) >= guests
    }

    pub fn seats_exactly(&self, guests: i64) -> bool {
        i64::from(self.capacity) == guests
    }

    pub fn as_option(&self) -> AccommodationOption {
        AccommodationOption::from(self)
    }
}

/// Client-facing projection of an [`AccommodationRecord`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccommodationOption {
    pub id: AccommodationId,
    pub name: String,
    #[serde(rename = "guests")]
    pub capacity: u32,
    #[serde(rename = "price_per_night")]
    pub nightly_price: f64,
    #[serde(rename = "image_url")]
    pub image: String,
}

impl From<&AccommodationRecord> for AccommodationOption {
    fn from(record: &AccommodationRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            capacity: record.capacity,
            nightly_price: record.nightly_price,
            image: record.image.clone(),
        }
    }
}
