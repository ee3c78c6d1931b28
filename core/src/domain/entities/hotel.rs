//! Pet hotel listings and their reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

pub const NAME_MAX_LEN: usize = 100;
pub const LOCATION_MAX_LEN: usize = 200;
pub const CUSTOM_TAG_MAX_LEN: usize = 50;
pub const MAX_CUSTOM_TAGS: usize = 5;
pub const PRICE_MIN: f64 = 10.0;
pub const PRICE_MAX: f64 = 10_000.0;
pub const SERVICE_PRICE_MAX: f64 = 10_000.0;
pub const REVIEW_TEXT_MAX_LEN: usize = 1000;
pub const REVIEW_USERNAME_MAX_LEN: usize = 50;

/// Which pets a hotel accepts. Encoded on the wire as 0 (cats), 1 (dogs)
/// or 2 (both).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PetsAllowed {
    Cats,
    Dogs,
    Both,
}

impl PetsAllowed {
    pub fn accepts_cats(&self) -> bool {
        matches!(self, PetsAllowed::Cats | PetsAllowed::Both)
    }

    pub fn accepts_dogs(&self) -> bool {
        matches!(self, PetsAllowed::Dogs | PetsAllowed::Both)
    }

    /// Whether a hotel with this policy satisfies a catalog filter value.
    /// Asking for cats or dogs also matches hotels taking both.
    pub fn satisfies(&self, wanted: PetsAllowed) -> bool {
        match wanted {
            PetsAllowed::Cats => self.accepts_cats(),
            PetsAllowed::Dogs => self.accepts_dogs(),
            PetsAllowed::Both => *self == PetsAllowed::Both,
        }
    }
}

impl TryFrom<u8> for PetsAllowed {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PetsAllowed::Cats),
            1 => Ok(PetsAllowed::Dogs),
            2 => Ok(PetsAllowed::Both),
            other => Err(format!("pets_allowed must be 0, 1 or 2, got {}", other)),
        }
    }
}

impl From<PetsAllowed> for u8 {
    fn from(value: PetsAllowed) -> Self {
        match value {
            PetsAllowed::Cats => 0,
            PetsAllowed::Dogs => 1,
            PetsAllowed::Both => 2,
        }
    }
}

macro_rules! tag_types {
    ($($variant:ident => $name:literal, $label:literal;)+) => {
        /// Fixed amenity tags a hotel can carry
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum TagType {
            $(
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl TagType {
            pub const ALL: &'static [TagType] = &[$(TagType::$variant),+];

            /// Wire name (e.g. `CCTV_Cameras`)
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(TagType::$variant => $name,)+
                }
            }

            /// Display label (e.g. `CCTV cameras`)
            pub fn label(&self) -> &'static str {
                match self {
                    $(TagType::$variant => $label,)+
                }
            }
        }
    };
}

tag_types! {
    Vet => "Vet", "Vet";
    Groomer => "Groomer", "Groomer";
    CctvCameras => "CCTV_Cameras", "CCTV cameras";
    TopInYourCountry => "Top_In_Your_Country", "Top in your country";
    AvailableDiscounts => "Available_Discounts", "Available discounts";
    FreeCancellation => "Free_Cancellation", "Free cancelation";
    NoPrepaymentNeeded => "No_Prepayment_Needed", "No prepayment needed";
    DogHandler => "Dog_Handler", "Dog handler";
    TraditionalFood => "Traditional_Food", "Traditional food";
    SpecialFoodHypoallergenic => "Special_Food_Hypoallergenic", "Special food (hypoallergenic)";
    RegularFood => "Regular_Food", "Regular food";
    WalkingInTheYard => "Walking_In_The_Yard", "Walking in the yard";
    WalkingInOwnArea => "Walking_In_Own_Area", "Walking in own area";
    WalkingInThePark => "Walking_In_The_Park", "Walking in the park";
    WalkingAroundTheCity => "Walking_Around_The_City", "Walking around the city";
    WalkingInTheForest => "Walking_In_The_Forest", "Walking in the forest";
    WalkingOnTheBeach => "Walking_On_The_Beach", "Walking on the beach";
    NearSea => "Near_Sea", "Near sea";
    NearMountain => "Near_Mountain", "Near mountain";
    NearMyLocation => "Near_My_Location", "Near my location";
}

impl std::fmt::Display for TagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TagType {
    type Err = String;

    /// Case-insensitive match on the wire name or the display label
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TagType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted) || t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Invalid tag type: {}", s))
    }
}

/// Guest review attached to a hotel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub user_id: Option<String>,
    pub username: String,
    pub avatar_url: Option<String>,
    /// 1 to 5 stars
    pub rating: u8,
    pub text: String,
    pub date_added: DateTime<Utc>,
}

impl Review {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=5).contains(&self.rating) {
            return Err(out_of_range("rating", 1, 5));
        }
        require_text("username", &self.username, REVIEW_USERNAME_MAX_LEN)?;
        require_text("text", &self.text, REVIEW_TEXT_MAX_LEN)
    }
}

/// Review as supplied by a client; a missing date means "now"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    pub user_id: Option<String>,
    pub username: String,
    pub avatar_url: Option<String>,
    pub rating: u8,
    pub text: String,
    pub date_added: Option<DateTime<Utc>>,
}

impl NewReview {
    pub fn into_review(self, now: DateTime<Utc>) -> Review {
        Review {
            user_id: self.user_id,
            username: self.username,
            avatar_url: self.avatar_url,
            rating: self.rating,
            text: self.text,
            date_added: self.date_added.unwrap_or(now),
        }
    }
}

/// Aggregate rating figures, recomputed from the review list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average_rating: f64,
    pub review_count: u32,
    pub percentage_1_star: f64,
    pub percentage_2_star: f64,
    pub percentage_3_star: f64,
    pub percentage_4_star: f64,
    pub percentage_5_star: f64,
}

impl RatingSummary {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return Self::default();
        }

        let total = reviews.len() as f64;
        let mut per_star = [0u32; 5];
        let mut sum = 0u32;
        for review in reviews {
            sum += review.rating as u32;
            if let Some(slot) = per_star.get_mut((review.rating as usize).wrapping_sub(1)) {
                *slot += 1;
            }
        }
        let pct = |n: u32| n as f64 / total * 100.0;

        Self {
            average_rating: sum as f64 / total,
            review_count: reviews.len() as u32,
            percentage_1_star: pct(per_star[0]),
            percentage_2_star: pct(per_star[1]),
            percentage_3_star: pct(per_star[2]),
            percentage_4_star: pct(per_star[3]),
            percentage_5_star: pct(per_star[4]),
        }
    }
}

/// Fields a hotel owner edits. Shared by create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelDetails {
    pub name: String,
    pub location: String,
    pub pets_allowed: PetsAllowed,
    pub price_per_night: f64,
    pub available_places: u32,
    #[serde(default)]
    pub occupied_places: u32,
    #[serde(default)]
    pub free_cancellation: bool,
    #[serde(default)]
    pub no_prepayment: bool,
    #[serde(default)]
    pub photo_urls: Vec<String>,
    pub large_logo_url: Option<String>,
    pub small_logo_url: Option<String>,
    #[serde(default)]
    pub discount_percentage: u8,
    pub extra_option: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub groomer_price: f64,
    #[serde(default)]
    pub vet_price: f64,
    #[serde(default)]
    pub cctv_price: f64,
    #[serde(default)]
    pub tags: Vec<TagType>,
    #[serde(default)]
    pub custom_tags: Vec<String>,
}

impl HotelDetails {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name, NAME_MAX_LEN)?;
        require_text("location", &self.location, LOCATION_MAX_LEN)?;

        if !(PRICE_MIN..=PRICE_MAX).contains(&self.price_per_night) {
            return Err(out_of_range("price_per_night", PRICE_MIN, PRICE_MAX));
        }
        if self.discount_percentage > 100 {
            return Err(out_of_range("discount_percentage", 0, 100));
        }
        for (field, price) in [
            ("groomer_price", self.groomer_price),
            ("vet_price", self.vet_price),
            ("cctv_price", self.cctv_price),
        ] {
            if !(0.0..=SERVICE_PRICE_MAX).contains(&price) {
                return Err(out_of_range(field, 0.0, SERVICE_PRICE_MAX));
            }
        }
        if let Some(tag) = self
            .custom_tags
            .iter()
            .find(|t| t.chars().count() > CUSTOM_TAG_MAX_LEN)
        {
            return Err(ValidationError::TooLong {
                field: format!("custom tag '{}'", tag),
                max: CUSTOM_TAG_MAX_LEN,
            });
        }
        Ok(())
    }

    /// Keep at most five custom tags and drop duplicate fixed tags
    pub fn normalize(mut self) -> Self {
        self.custom_tags.truncate(MAX_CUSTOM_TAGS);
        let mut seen = Vec::with_capacity(self.tags.len());
        self.tags.retain(|t| {
            if seen.contains(t) {
                false
            } else {
                seen.push(*t);
                true
            }
        });
        self
    }
}

/// Stored hotel listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: i64,
    #[serde(flatten)]
    pub details: HotelDetails,
    pub date_added: DateTime<Utc>,
    #[serde(flatten)]
    pub rating: RatingSummary,
    pub reviews: Vec<Review>,
}

impl Hotel {
    /// Places still free for booking
    pub fn free_places(&self) -> u32 {
        self.details
            .available_places
            .saturating_sub(self.details.occupied_places)
    }

    pub fn has_any_tag(&self, tags: &[TagType], raw: &[String]) -> bool {
        self.details.tags.iter().any(|t| tags.contains(t))
            || self.details.custom_tags.iter().any(|ct| raw.contains(ct))
    }
}

/// Hotel to be created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHotel {
    #[serde(flatten)]
    pub details: HotelDetails,
    #[serde(default)]
    pub reviews: Vec<NewReview>,
}

/// Compact listing used by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogHotel {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub date_added: DateTime<Utc>,
    pub pets_allowed: PetsAllowed,
    pub price_per_night: f64,
    /// Free places (available minus occupied)
    pub available_places: u32,
    pub free_cancellation: bool,
    pub no_prepayment: bool,
    pub average_rating: f64,
    pub review_count: u32,
    pub small_logo_url: Option<String>,
    pub discount_percentage: u8,
    pub tags: Vec<TagType>,
    pub custom_tags: Vec<String>,
    pub extra_option: Option<String>,
    pub photo_url: Option<String>,
}

impl From<&Hotel> for CatalogHotel {
    fn from(hotel: &Hotel) -> Self {
        let d = &hotel.details;
        Self {
            id: hotel.id,
            name: d.name.clone(),
            location: d.location.clone(),
            date_added: hotel.date_added,
            pets_allowed: d.pets_allowed,
            price_per_night: d.price_per_night,
            available_places: hotel.free_places(),
            free_cancellation: d.free_cancellation,
            no_prepayment: d.no_prepayment,
            average_rating: hotel.rating.average_rating,
            review_count: hotel.rating.review_count,
            small_logo_url: d.small_logo_url.clone(),
            discount_percentage: d.discount_percentage,
            tags: d.tags.clone(),
            custom_tags: d.custom_tags.clone(),
            extra_option: d.extra_option.clone(),
            photo_url: d.photo_urls.first().cloned(),
        }
    }
}

fn require_text(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

fn out_of_range(field: &str, min: impl ToString, max: impl ToString) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min: min.to_string(),
        max: max.to_string(),
    }
}
