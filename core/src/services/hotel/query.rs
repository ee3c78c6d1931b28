//! Catalog query and statistics types

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::str::FromStr;

use ph_shared::PageRequest;

use crate::domain::entities::{Hotel, PetsAllowed, TagType};

/// Catalog ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Most reviewed first, then best rated
    #[default]
    BestSelling,
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    DateOldNew,
    DateNewOld,
}

impl SortBy {
    /// Parse a client value; anything unrecognised sorts by best selling
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    pub fn compare(&self, a: &Hotel, b: &Hotel) -> Ordering {
        match self {
            SortBy::BestSelling => b
                .rating
                .review_count
                .cmp(&a.rating.review_count)
                .then_with(|| cmp_f64(b.rating.average_rating, a.rating.average_rating)),
            SortBy::NameAsc => a.details.name.cmp(&b.details.name),
            SortBy::NameDesc => b.details.name.cmp(&a.details.name),
            SortBy::PriceAsc => cmp_f64(a.details.price_per_night, b.details.price_per_night),
            SortBy::PriceDesc => cmp_f64(b.details.price_per_night, a.details.price_per_night),
            SortBy::DateOldNew => a.date_added.cmp(&b.date_added),
            SortBy::DateNewOld => b.date_added.cmp(&a.date_added),
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best_selling" => Ok(SortBy::BestSelling),
            "name_asc" => Ok(SortBy::NameAsc),
            "name_desc" => Ok(SortBy::NameDesc),
            "price_asc" => Ok(SortBy::PriceAsc),
            "price_desc" => Ok(SortBy::PriceDesc),
            "date_old_new" => Ok(SortBy::DateOldNew),
            "date_new_old" => Ok(SortBy::DateNewOld),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Catalog filters, ordering and page
#[derive(Debug, Clone, Default)]
pub struct HotelQuery {
    /// Raw tag values; matched against fixed tags (case-insensitive) and
    /// custom tags (exact)
    pub tags: Vec<String>,
    pub min_rating: Option<f64>,
    pub pets_allowed: Option<PetsAllowed>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    /// Case-insensitive substring of the hotel name
    pub search: Option<String>,
    pub sort_by: SortBy,
    pub page: PageRequest,
}

impl HotelQuery {
    /// Tag values that name a fixed tag. The tag filter only applies when
    /// this is non-empty.
    pub fn parsed_tags(&self) -> Vec<TagType> {
        self.tags
            .iter()
            .filter_map(|raw| raw.parse::<TagType>().ok())
            .collect()
    }

    pub fn matches(&self, hotel: &Hotel, parsed_tags: &[TagType]) -> bool {
        if !parsed_tags.is_empty() && !hotel.has_any_tag(parsed_tags, &self.tags) {
            return false;
        }
        if let Some(min) = self.min_rating {
            if hotel.rating.average_rating < min {
                return false;
            }
        }
        if let Some(wanted) = self.pets_allowed {
            if !hotel.details.pets_allowed.satisfies(wanted) {
                return false;
            }
        }
        let price = hotel.details.price_per_night;
        if self.price_min.is_some_and(|min| price < min) {
            return false;
        }
        if self.price_max.is_some_and(|max| price > max) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => hotel
                .details
                .name
                .to_lowercase()
                .contains(&term.to_lowercase()),
            _ => true,
        }
    }
}

/// Rating thresholds and tag usage across all hotels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelStats {
    pub hotels_with_rating_1_or_above: u32,
    pub hotels_with_rating_2_or_above: u32,
    pub hotels_with_rating_3_or_above: u32,
    pub hotels_with_rating_4_or_above: u32,
    /// Keyed by tag wire name; every fixed tag is present
    pub tag_counts: BTreeMap<String, u32>,
}

impl HotelStats {
    pub fn from_hotels(hotels: &[Hotel]) -> Self {
        let mut stats = HotelStats {
            tag_counts: TagType::ALL
                .iter()
                .map(|t| (t.as_str().to_string(), 0))
                .collect(),
            ..Default::default()
        };

        for hotel in hotels {
            let rating = hotel.rating.average_rating;
            let thresholds = [
                (1.0, &mut stats.hotels_with_rating_1_or_above),
                (2.0, &mut stats.hotels_with_rating_2_or_above),
                (3.0, &mut stats.hotels_with_rating_3_or_above),
                (4.0, &mut stats.hotels_with_rating_4_or_above),
            ];
            for (min, count) in thresholds {
                if rating >= min {
                    *count += 1;
                }
            }

            let mut seen: Vec<TagType> = Vec::new();
            for tag in &hotel.details.tags {
                if seen.contains(tag) {
                    continue;
                }
                seen.push(*tag);
                if let Some(count) = stats.tag_counts.get_mut(tag.as_str()) {
                    *count += 1;
                }
            }
        }
        stats
    }
}
