//! Hotel catalog query parameters

use serde::Deserialize;

use ph_core::domain::entities::PetsAllowed;
use ph_core::services::hotel::{HotelQuery, SortBy};
use ph_shared::PageRequest;

/// Query string of `GET /api/hotels/catalog`
///
/// `tags` is a comma-separated list, e.g. `tags=Vet,Near_Sea,Pool`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogParams {
    pub tags: Option<String>,
    pub min_rating: Option<f64>,
    /// 0 cats, 1 dogs, 2 both; other values are ignored
    pub pets_allowed: Option<u8>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub search_term: Option<String>,
    pub sort_by: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl From<CatalogParams> for HotelQuery {
    fn from(params: CatalogParams) -> Self {
        HotelQuery {
            tags: params
                .tags
                .as_deref()
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            min_rating: params.min_rating,
            pets_allowed: params.pets_allowed.and_then(|v| PetsAllowed::try_from(v).ok()),
            price_min: params.price_min,
            price_max: params.price_max,
            search: params.search_term,
            sort_by: SortBy::parse_or_default(params.sort_by.as_deref()),
            page: PageRequest::new(params.page_number, params.page_size),
        }
    }
}
