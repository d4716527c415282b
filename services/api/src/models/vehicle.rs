//! Vehicle listings and their image fields
//!
//! Wire names follow the stored column names the site front-end already
//! uses (`plan`, `anticipo`, `cuota`, `modelo`, `km`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::lenient;

/// Upper bound on gallery length
pub const MAX_GALLERY_IMAGES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleKind {
    /// 0km listings
    New,
    Used,
}

impl VehicleKind {
    pub fn table(&self) -> &'static str {
        match self {
            VehicleKind::New => "vehicles_0km",
            VehicleKind::Used => "vehicles_usados",
        }
    }
}

/// A new-vehicle (0km) listing as stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewVehicle {
    pub id: i32,
    pub brand: String,
    pub name: String,
    pub price: Option<String>,
    #[serde(rename = "plan")]
    pub financing_plan: Option<String>,
    #[serde(rename = "anticipo")]
    pub down_payment: Option<String>,
    #[serde(rename = "cuota")]
    pub installment: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// A used-vehicle listing as stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsedVehicle {
    pub id: i32,
    pub brand: String,
    #[serde(rename = "modelo")]
    pub model: String,
    pub year: Option<i32>,
    #[serde(rename = "km")]
    pub mileage: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Text fields of a new-vehicle request. Absent fields are `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewVehicleFields {
    #[serde(deserialize_with = "lenient::text")]
    pub brand: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub price: Option<String>,
    #[serde(rename = "plan", deserialize_with = "lenient::text")]
    pub financing_plan: Option<String>,
    #[serde(rename = "anticipo", deserialize_with = "lenient::text")]
    pub down_payment: Option<String>,
    #[serde(rename = "cuota", deserialize_with = "lenient::text")]
    pub installment: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
}

/// Text fields of a used-vehicle request. Absent fields are `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UsedVehicleFields {
    #[serde(deserialize_with = "lenient::text")]
    pub brand: Option<String>,
    #[serde(rename = "modelo", deserialize_with = "lenient::text")]
    pub model: Option<String>,
    #[serde(deserialize_with = "lenient::year")]
    pub year: Option<i32>,
    #[serde(rename = "km", deserialize_with = "lenient::text")]
    pub mileage: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub price: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
}

/// Image fields as submitted: a legacy single image and/or an ordered gallery.
/// Entries are hosted URLs or inline `data:image` payloads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageInput {
    #[serde(deserialize_with = "lenient::text")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient::gallery")]
    pub images: Option<Vec<String>>,
}

impl ImageInput {
    /// Whether the request touches the image columns at all
    pub fn is_present(&self) -> bool {
        self.image.is_some() || self.images.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewVehiclePayload {
    #[serde(flatten)]
    pub fields: NewVehicleFields,
    #[serde(flatten)]
    pub media: ImageInput,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsedVehiclePayload {
    #[serde(flatten)]
    pub fields: UsedVehicleFields,
    #[serde(flatten)]
    pub media: ImageInput,
}

/// Resolved image columns: primary image plus ordered gallery.
///
/// When `images` is non-empty, `image` equals `images[0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    pub image: Option<String>,
    pub images: Vec<String>,
}

impl ImageSet {
    pub fn from_gallery(images: Vec<String>) -> Self {
        Self {
            image: images.first().cloned(),
            images,
        }
    }

    /// Value for the `images` column
    pub fn gallery_column(&self) -> Option<String> {
        encode_gallery(&self.images)
    }
}

/// Image columns of one stored row, as scanned by the inline-image migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRow {
    pub id: i32,
    pub image: Option<String>,
    pub images: Vec<String>,
}

/// Serialize a gallery into its column form. An empty gallery is stored as NULL.
pub fn encode_gallery(images: &[String]) -> Option<String> {
    if images.is_empty() {
        None
    } else {
        serde_json::to_string(images).ok()
    }
}

/// Decode the `images` column. NULL, blank and undecodable values read as empty.
pub fn decode_gallery(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(images) => images,
        Err(e) => {
            warn!("Ignoring undecodable gallery column: {}", e);
            Vec::new()
        }
    }
}
