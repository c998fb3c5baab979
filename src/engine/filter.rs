//! Filter chain, sort comparators and pagination.

use std::collections::HashSet;

use crate::store::Property;

use super::query::{ListingQuery, SortOrder, UNBOUNDED};

// == Page Result ==
/// One page of filtered, sorted records plus the totals the response needs.
#[derive(Debug, Clone)]
pub struct PageResult {
    pub items: Vec<Property>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

// == Listing ==
/// Runs the full listing pipeline: filter, sort, paginate.
///
/// An empty result is a normal outcome (`total_pages = 0`), never an error.
/// The `ids` parameter narrows *after* every other filter here; the map
/// endpoint treats it as a bypass instead (see [`run_map`]).
pub fn run_listing(
    records: &[Property],
    new_build_refs: &HashSet<String>,
    query: &ListingQuery,
) -> PageResult {
    let mut matches: Vec<&Property> = records.iter().collect();

    apply_filters(&mut matches, new_build_refs, query, true);

    if !query.ids.is_empty() {
        let wanted: HashSet<i64> = query.ids.iter().copied().collect();
        matches.retain(|p| wanted.contains(&p.id));
    }

    sort_records(&mut matches, query);

    let total_count = matches.len();
    let total_pages = total_count.div_ceil(query.limit);
    let start = (query.page - 1) * query.limit;
    let items = matches
        .into_iter()
        .skip(start)
        .take(query.limit)
        .cloned()
        .collect();

    PageResult {
        items,
        total_count,
        total_pages,
        page: query.page,
        page_size: query.limit,
    }
}

// == Map ==
/// Runs the map pipeline and returns the matching records unpaginated.
///
/// When `ids` is present it is an allow-list that bypasses every other
/// filter entirely. That asymmetry with the listing endpoint is deliberate.
pub fn run_map<'a>(
    records: &'a [Property],
    new_build_refs: &HashSet<String>,
    query: &ListingQuery,
) -> Vec<&'a Property> {
    let mut matches: Vec<&Property> = records.iter().collect();

    if !query.ids.is_empty() {
        let wanted: HashSet<i64> = query.ids.iter().copied().collect();
        matches.retain(|p| wanted.contains(&p.id));
        return matches;
    }

    apply_filters(&mut matches, new_build_refs, query, false);
    matches
}

// == Filter Chain ==
/// AND-composes the shared filters in a fixed order. `search_towns` widens
/// the free-text search to the town field on the listing endpoint.
fn apply_filters(
    matches: &mut Vec<&Property>,
    new_build_refs: &HashSet<String>,
    query: &ListingQuery,
    search_towns: bool,
) {
    // 1. Market tab
    if let Some(tab) = query.tab {
        matches.retain(|p| p.classify(new_build_refs) == Some(tab));
    }

    // 2. Free-text search: OR across name, reference and (listing) town
    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        matches.retain(|p| {
            p.development_name.to_lowercase().contains(&needle)
                || p.reference_id.to_lowercase().contains(&needle)
                || (search_towns && p.town.to_lowercase().contains(&needle))
        });
    }

    // 3. Subtype multi-select
    if !query.subtypes.is_empty() {
        let subtypes = lowered(&query.subtypes);
        matches.retain(|p| subtypes.contains(&p.subtype.to_lowercase()));
    }

    // 4. Town/province multi-select
    if !query.towns.is_empty() {
        let towns = lowered(&query.towns);
        matches.retain(|p| {
            towns.contains(&p.town.to_lowercase()) || towns.contains(&p.province.to_lowercase())
        });
    }

    // 5. Price and size ranges; a missing value counts as 0
    if query.price_min > 0.0 || query.price_max < UNBOUNDED {
        matches.retain(|p| p.price >= query.price_min && p.price <= query.price_max);
    }
    if query.size_min > 0.0 || query.size_max < UNBOUNDED {
        matches.retain(|p| p.built_area >= query.size_min && p.built_area <= query.size_max);
    }

    // 6. Bedrooms: exact-match-any-of or at-least-the-minimum
    if !query.beds.is_empty() {
        if query.beds_exact {
            matches.retain(|p| query.beds.contains(&p.beds));
        } else {
            let min_beds = *query.beds.iter().min().unwrap_or(&0);
            matches.retain(|p| p.beds >= min_beds);
        }
    }

    // 7. Bathrooms minimum
    if let Some(baths) = query.baths {
        matches.retain(|p| p.baths >= baths);
    }

    // 8. Amenities: record must have every requested one
    if !query.amenities.is_empty() {
        let amenities = lowered(&query.amenities);
        matches.retain(|p| {
            amenities.iter().all(|wanted| {
                p.amenities
                    .iter()
                    .any(|have| have.to_lowercase() == *wanted)
            })
        });
    }
}

fn lowered(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

// == Sort ==
fn sort_records(matches: &mut [&Property], query: &ListingQuery) {
    // `featured` only picks the default order when no explicit sort is given
    let order = query.sort.or(if query.featured {
        Some(SortOrder::PriceDesc)
    } else {
        None
    });

    match order {
        Some(SortOrder::PriceAsc) => matches.sort_by(|a, b| a.price.total_cmp(&b.price)),
        Some(SortOrder::PriceDesc) => matches.sort_by(|a, b| b.price.total_cmp(&a.price)),
        Some(SortOrder::SizeAsc) => matches.sort_by(|a, b| a.built_area.total_cmp(&b.built_area)),
        Some(SortOrder::SizeDesc) => matches.sort_by(|a, b| b.built_area.total_cmp(&a.built_area)),
        // missing completion dates are 0 and therefore sort last
        Some(SortOrder::DateDesc) => matches.sort_by(|a, b| b.completion_date.cmp(&a.completion_date)),
        Some(SortOrder::Random) => matches.sort_by_key(|p| p.random_score),
        None => {}
    }
}
