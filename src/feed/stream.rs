//! Whole-list page stream

use crate::error::Result;
use crate::fetcher::PageSource;
use crate::pagination::{next_page_offset, Page, PageSequence};
use futures::stream::{self, BoxStream, StreamExt};

/// Stream every page of one list, in order.
///
/// Stops after the last page, after `max_fetches` fetches, or after the
/// first error, which is yielded as the final item.
pub fn page_stream<'a, T, S>(
    source: &'a S,
    parent_id: impl Into<String>,
    max_fetches: usize,
) -> BoxStream<'a, Result<Page<T>>>
where
    T: Send + 'static,
    S: PageSource<T> + ?Sized,
{
    let parent_id = parent_id.into();
    let limit = source.page_size();
    let stop = source.stop_condition();

    // Only lengths and totals matter for the cursor, so seen pages are kept itemless.
    let seen: PageSequence<()> = PageSequence::new();

    stream::unfold(
        (seen, 0usize, false),
        move |(mut seen, fetches, failed)| {
            let parent_id = parent_id.clone();
            async move {
                if failed || fetches >= max_fetches || limit == 0 {
                    return None;
                }

                let offset = if seen.is_empty() {
                    0
                } else {
                    next_page_offset(seen.last(), seen.pages(), stop)?
                };

                match source.try_fetch_page(&parent_id, limit, offset).await {
                    Ok(page) => {
                        let marker = Page::new(vec![(); page.len()], page.limit, page.offset)
                            .with_total(page.total);
                        seen.push(marker);
                        Some((Ok(page), (seen, fetches + 1, false)))
                    }
                    Err(e) => Some((Err(e), (seen, fetches + 1, true))),
                }
            }
        },
    )
    .boxed()
}
