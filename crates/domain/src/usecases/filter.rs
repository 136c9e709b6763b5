//! Filter, facet and pagination engine
//!
//! Three independent pure functions. Facets are always computed over the
//! unfiltered base set so counts describe what each filter would yield.

use crate::model::{Domain, FacetCount, Facets, FilterState, Page, Post};

/// Page size used when the caller passes 0
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Keep posts matching the selected domain AND carrying the selected tag.
///
/// Input order is preserved, so applying the same state twice is a no-op.
pub fn apply_filters<'a, I>(posts: I, state: &FilterState) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    posts
        .into_iter()
        .filter(|post| {
            state
                .selected_domain
                .is_none_or(|domain| post.domain == domain)
        })
        .filter(|post| {
            state
                .selected_tag
                .as_deref()
                .is_none_or(|tag| post.has_tag(tag))
        })
        .collect()
}

/// Count posts per domain and per tag.
///
/// Every domain is listed (zeros included). Tags are grouped
/// case-insensitively under the first spelling seen.
pub fn compute_facets<'a, I>(posts: I) -> Facets
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut domain_totals = [0usize; Domain::ALL.len()];
    let mut tag_counts: Vec<FacetCount> = Vec::new();

    for post in posts {
        if let Some(idx) = Domain::ALL.iter().position(|d| *d == post.domain) {
            domain_totals[idx] += 1;
        }

        for tag in &post.tags {
            match tag_counts
                .iter_mut()
                .find(|f| f.key.eq_ignore_ascii_case(tag))
            {
                Some(existing) => existing.count += 1,
                None => tag_counts.push(FacetCount {
                    key: tag.clone(),
                    count: 1,
                }),
            }
        }
    }

    tag_counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.key.to_ascii_lowercase().cmp(&b.key.to_ascii_lowercase()))
    });

    let domain_counts = Domain::ALL
        .iter()
        .zip(domain_totals)
        .map(|(domain, count)| FacetCount {
            key: domain.label().to_string(),
            count,
        })
        .collect();

    Facets {
        domain_counts,
        tag_counts,
    }
}

/// Cut a 1-indexed window out of `items`.
///
/// `page` 0 means the first page, pages past the end clamp to the last one,
/// and `page_size` 0 means [`DEFAULT_PAGE_SIZE`]. An empty input has a
/// single empty page.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = if page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    };
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let current_page = page.clamp(1, total_pages);

    let start = (current_page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let window = items.get(start..end).unwrap_or_default().to_vec();

    Page {
        items: window,
        current_page,
        total_pages,
        total_items,
        page_size,
    }
}
