//! Tests for pagination module

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn page(count: usize, limit: u32, offset: u64, total: Option<u64>) -> Page<u32> {
    Page::new((0..count as u32).collect(), limit, offset).with_total(total)
}

/// Walk a backend of `size` items; returns (fetches, items seen).
fn walk(size: u64, limit: u32, report_total: bool, stop: StopCondition) -> (usize, Vec<u64>) {
    let backend: Vec<u64> = (0..size).collect();
    let mut sequence = PageSequence::new();
    let mut offset = 0;

    loop {
        let start = offset.min(size) as usize;
        let end = (offset + u64::from(limit)).min(size) as usize;
        let total = report_total.then_some(size);
        sequence.push(Page::new(backend[start..end].to_vec(), limit, offset).with_total(total));

        match next_page_offset(sequence.last(), sequence.pages(), stop) {
            Some(next) => offset = next,
            None => break,
        }
        assert!(sequence.len() < 10_000, "walk did not terminate");
    }

    (sequence.len(), sequence.into_items())
}

// ============================================================================
// Page / PageSequence
// ============================================================================

#[test]
fn test_page_basics() {
    let p = page(3, 24, 48, Some(51));
    assert_eq!(p.len(), 3);
    assert!(p.is_short());
    assert!(!p.is_empty());

    let empty: Page<u32> = Page::empty(20, 0);
    assert!(empty.is_empty());
    assert!(empty.is_short());
    assert_eq!(empty.total, None);
}

#[test]
fn test_page_map_keeps_metadata() {
    let mapped = page(2, 24, 0, Some(2)).map(|n| n.to_string());
    assert_eq!(mapped.items, vec!["0".to_string(), "1".to_string()]);
    assert_eq!(mapped.limit, 24);
    assert_eq!(mapped.total, Some(2));
}

#[test]
fn test_page_serde_omits_missing_total() {
    let json = serde_json::to_value(page(1, 20, 0, None)).unwrap();
    assert_eq!(json, serde_json::json!({"items": [0], "limit": 20, "offset": 0}));
}

#[test]
fn test_sequence_cumulative_count() {
    let mut sequence = PageSequence::new();
    assert_eq!(sequence.fetched(), 0);
    assert!(sequence.is_empty());

    sequence.push(page(24, 24, 0, None));
    sequence.push(page(24, 24, 24, None));
    sequence.push(page(2, 24, 48, None));

    assert_eq!(sequence.len(), 3);
    assert_eq!(sequence.fetched(), 50);
    assert_eq!(sequence.items().count(), 50);

    sequence.clear();
    assert!(sequence.is_empty());
}

// ============================================================================
// next_page_offset rules
// ============================================================================

#[test]
fn test_no_last_page_means_done() {
    let pages: Vec<Page<u32>> = Vec::new();
    assert_eq!(
        next_page_offset(None, &pages, StopCondition::default()),
        None
    );
}

#[test_case(Some(100) ; "with total")]
#[test_case(None ; "without total")]
fn test_short_page_wins_over_total(total: Option<u64>) {
    let pages = vec![page(24, 24, 0, total), page(5, 24, 24, total)];
    assert_eq!(
        next_page_offset(pages.last(), &pages, StopCondition::ShortPageOrTotal),
        None
    );
    assert_eq!(
        next_page_offset(pages.last(), &pages, StopCondition::ShortPage),
        None
    );
}

#[test]
fn test_total_reached_with_full_page() {
    let pages = vec![page(5, 5, 0, Some(10)), page(5, 5, 5, Some(10))];
    assert_eq!(
        next_page_offset(pages.last(), &pages, StopCondition::ShortPageOrTotal),
        None
    );
}

#[test]
fn test_short_page_only_ignores_total() {
    let pages = vec![page(5, 5, 0, Some(10)), page(5, 5, 5, Some(10))];
    assert_eq!(
        next_page_offset(pages.last(), &pages, StopCondition::ShortPage),
        Some(10)
    );
}

#[test]
fn test_continue_at_cumulative_count() {
    let pages = vec![page(24, 24, 0, Some(100)), page(24, 24, 24, Some(100))];
    assert_eq!(
        next_page_offset(pages.last(), &pages, StopCondition::ShortPageOrTotal),
        Some(48)
    );
}

#[test]
fn test_zero_limit_is_done() {
    let pages = vec![page(0, 0, 0, None)];
    assert_eq!(
        next_page_offset(pages.last(), &pages, StopCondition::default()),
        None
    );
}

#[test]
fn test_empty_failed_page_is_done() {
    // What a fail-soft fetch returns after an HTTP 500
    let pages = vec![Page::<u32>::empty(24, 0)];
    assert_eq!(
        next_page_offset(pages.last(), &pages, StopCondition::default()),
        None
    );
}

// ============================================================================
// Walk scenarios
// ============================================================================

#[test]
fn test_scenario_fifty_items_no_total() {
    let (fetches, items) = walk(50, 24, false, StopCondition::ShortPageOrTotal);
    assert_eq!(fetches, 3);
    assert_eq!(items, (0..50).collect::<Vec<_>>());
}

#[test]
fn test_scenario_exact_page_with_total() {
    let (fetches, items) = walk(20, 20, true, StopCondition::ShortPageOrTotal);
    assert_eq!(fetches, 1);
    assert_eq!(items.len(), 20);
}

#[test]
fn test_scenario_exact_page_without_total_costs_one_extra_fetch() {
    let (fetches, items) = walk(20, 20, false, StopCondition::ShortPageOrTotal);
    assert_eq!(fetches, 2);
    assert_eq!(items.len(), 20);
}

#[test_case(0, 24)]
#[test_case(1, 24)]
#[test_case(23, 24)]
#[test_case(24, 24)]
#[test_case(25, 24)]
#[test_case(100, 20)]
#[test_case(101, 21)]
fn test_walk_terminates_without_gaps(size: u64, limit: u32) {
    let bound = size.div_ceil(u64::from(limit)) as usize + 1;

    for report_total in [true, false] {
        for stop in [StopCondition::ShortPage, StopCondition::ShortPageOrTotal] {
            let (fetches, items) = walk(size, limit, report_total, stop);
            assert!(fetches <= bound, "{fetches} fetches > bound {bound}");
            assert_eq!(items, (0..size).collect::<Vec<_>>());
        }
    }
}

#[test]
fn test_next_offset_after_single_page() {
    let stop = StopCondition::ShortPageOrTotal;
    assert_eq!(next_offset_after(&page(24, 24, 48, None), stop), Some(72));
    assert_eq!(next_offset_after(&page(24, 24, 48, Some(72)), stop), None);
    assert_eq!(
        next_offset_after(&page(24, 24, 48, Some(72)), StopCondition::ShortPage),
        Some(72)
    );
    assert_eq!(next_offset_after(&page(3, 24, 48, Some(500)), stop), None);
    assert_eq!(next_offset_after(&page(0, 0, 0, None), stop), None);
}

#[test]
fn test_next_offset_after_agrees_with_sequence_from_start() {
    let mut sequence = PageSequence::new();
    sequence.push(page(10, 10, 0, Some(25)));
    sequence.push(page(10, 10, 10, Some(25)));
    let last = sequence.last().unwrap();
    assert_eq!(
        next_offset_after(last, StopCondition::ShortPageOrTotal),
        next_page_offset(sequence.last(), sequence.pages(), StopCondition::ShortPageOrTotal)
    );
}

// ============================================================================
// OffsetPaginator
// ============================================================================

#[test]
fn test_offset_paginator_params() {
    let paginator = OffsetPaginator::new("size", "from", 24, StopCondition::ShortPageOrTotal);
    assert_eq!(
        paginator.params(24, 48),
        vec![
            ("size".to_string(), "24".to_string()),
            ("from".to_string(), "48".to_string()),
        ]
    );
    assert_eq!(paginator.with_limit(10).limit, 10);
}

#[test]
fn test_has_next_page_follows_stop_condition() {
    let mut sequence = PageSequence::new();
    assert!(!has_next_page(&sequence, StopCondition::ShortPage));

    sequence.push(page(20, 20, 0, Some(20)));
    assert!(has_next_page(&sequence, StopCondition::ShortPage));
    assert!(!has_next_page(&sequence, StopCondition::ShortPageOrTotal));
}

#[test]
fn test_full_page_at_end_of_offset_range_is_done() {
    let last = page(4, 4, u64::MAX - 2, None);
    assert_eq!(next_offset_after(&last, StopCondition::ShortPage), None);
    assert_eq!(next_offset_after(&last, StopCondition::ShortPageOrTotal), None);

    let fits = page(4, 4, u64::MAX - 4, None);
    assert_eq!(next_offset_after(&fits, StopCondition::ShortPage), Some(u64::MAX));
}

#[test]
fn test_stop_condition_serde() {
    let stop: StopCondition = serde_json::from_str("\"short_page\"").unwrap();
    assert_eq!(stop, StopCondition::ShortPage);
    assert_eq!(StopCondition::default(), StopCondition::ShortPageOrTotal);
}
