//! Pure category filter / rating sort over a resolved place list.
//!
//! Mirrors the map page's sidebar behavior: four fixed category buckets
//! matched by keyword substrings, plus a "별점" (by-rating) pseudo-category
//! that disables filtering and sorts by rating instead.

use crate::place::Place;

/// Sidebar category selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// 음식 — restaurants.
    Food,
    /// 카페 — cafes and coffee shops.
    Cafe,
    /// 상점 — marts and convenience stores.
    Shop,
    /// 디저트 — dessert and bakery.
    Dessert,
    /// 별점 — no category filter; activates rating sort instead.
    ByRating,
}

impl Category {
    /// Keyword substrings a place's `category` field is matched against.
    ///
    /// Matching is case-sensitive substring containment on the stored text.
    /// [`Category::ByRating`] has no keywords; it passes every place.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Food => &["음식점", "식당", "한식", "중식", "일식", "양식"],
            Self::Cafe => &["카페", "커피"],
            Self::Shop => &["마트", "편의점", "상점"],
            Self::Dessert => &["디저트", "베이커리", "아이스크림"],
            Self::ByRating => &[],
        }
    }

    /// The sidebar label for this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Food => "음식",
            Self::Cafe => "카페",
            Self::Shop => "상점",
            Self::Dessert => "디저트",
            Self::ByRating => "별점",
        }
    }

    /// Parses a sidebar label back into a category.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "음식" => Some(Self::Food),
            "카페" => Some(Self::Cafe),
            "상점" => Some(Self::Shop),
            "디저트" => Some(Self::Dessert),
            "별점" => Some(Self::ByRating),
            _ => None,
        }
    }

    fn passes(self, place: &Place) -> bool {
        let keywords = self.keywords();
        if keywords.is_empty() {
            return true;
        }
        keywords.iter().any(|k| place.category.contains(k))
    }
}

/// Rating sort direction, only honored under [`Category::ByRating`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// 높은 순 — highest rating first.
    Descending,
    /// 낮은 순 — lowest rating first.
    Ascending,
}

/// Produces the displayed place list for the given category and sort order.
///
/// Referentially transparent: identical inputs always yield an identical
/// output sequence. Under [`Category::ByRating`] no filter is applied and
/// the list is stably sorted by rating, so rating ties keep the resolver's
/// submission order. Under any other category the list is filtered and left
/// in resolver order.
#[must_use]
pub fn view(places: &[Place], category: Category, order: SortOrder) -> Vec<Place> {
    let mut filtered: Vec<Place> = places
        .iter()
        .filter(|p| category.passes(p))
        .cloned()
        .collect();

    if category == Category::ByRating {
        match order {
            SortOrder::Descending => filtered.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortOrder::Ascending => filtered.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
        }
    }

    filtered
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
