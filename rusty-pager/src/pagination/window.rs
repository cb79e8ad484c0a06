//! Page-addressable access over bounded lists and forward-only producers.

use futures::future::BoxFuture;
use futures::stream::{BoxStream, Stream, StreamExt};
use tracing::debug;

use super::error::{PaginationError, Result};
use super::page::{filled_pages, items_needed_for, page_range, total_pages};

/// Forward-only, one-shot item producer.
///
/// `next` yields items in order and `None` once the source is drained. A producer
/// may also report exhaustion early through `is_exhausted`.
pub trait Producer<T>: Send {
    fn next(&mut self) -> BoxFuture<'_, Option<T>>;

    fn is_exhausted(&self) -> bool;
}

/// [`Producer`] over any `futures` stream.
pub struct StreamProducer<T> {
    stream: BoxStream<'static, T>,
    done: bool,
}

impl<T> StreamProducer<T> {
    pub fn new(stream: impl Stream<Item = T> + Send + 'static) -> Self {
        Self {
            stream: stream.boxed(),
            done: false,
        }
    }
}

impl<T: Send> Producer<T> for StreamProducer<T> {
    fn next(&mut self) -> BoxFuture<'_, Option<T>> {
        Box::pin(async move {
            if self.done {
                return None;
            }
            let item = self.stream.next().await;
            if item.is_none() {
                self.done = true;
            }
            item
        })
    }

    fn is_exhausted(&self) -> bool {
        self.done
    }
}

/// [`Producer`] over a synchronous iterator.
pub struct IterProducer<I> {
    iter: I,
    done: bool,
}

impl<I> IterProducer<I> {
    pub fn new(iter: I) -> Self {
        Self { iter, done: false }
    }
}

impl<I> Producer<I::Item> for IterProducer<I>
where
    I: Iterator + Send,
    I::Item: Send,
{
    fn next(&mut self) -> BoxFuture<'_, Option<I::Item>> {
        let item = if self.done { None } else { self.iter.next() };
        if item.is_none() {
            self.done = true;
        }
        Box::pin(std::future::ready(item))
    }

    fn is_exhausted(&self) -> bool {
        self.done
    }
}

enum Source<T> {
    Bounded(Vec<T>),
    Streaming {
        producer: Box<dyn Producer<T>>,
        buffer: Vec<T>,
        exhausted: bool,
        total_pages: Option<usize>,
    },
}

/// One `fetch(page)` contract over a bounded list or an unbounded producer.
///
/// Streaming items are buffered lazily and never re-fetched; once the producer is
/// exhausted the page count is fixed.
pub struct DataWindow<T> {
    source: Source<T>,
    items_per_page: usize,
}

impl<T: Send + 'static> DataWindow<T> {
    /// Window over a pre-materialized list.
    pub fn bounded(items: Vec<T>, items_per_page: usize) -> Result<Self> {
        if items_per_page == 0 {
            return Err(PaginationError::ZeroPageSize);
        }

        Ok(Self {
            source: Source::Bounded(items),
            items_per_page,
        })
    }

    /// Window over a forward-only producer of unknown length.
    pub fn streaming(producer: impl Producer<T> + 'static, items_per_page: usize) -> Result<Self> {
        if items_per_page == 0 {
            return Err(PaginationError::ZeroPageSize);
        }

        Ok(Self {
            source: Source::Streaming {
                producer: Box::new(producer),
                buffer: Vec::new(),
                exhausted: false,
                total_pages: None,
            },
            items_per_page,
        })
    }

    /// Window over any `futures` stream.
    pub fn from_stream(
        stream: impl Stream<Item = T> + Send + 'static,
        items_per_page: usize,
    ) -> Result<Self> {
        Self::streaming(StreamProducer::new(stream), items_per_page)
    }
}

impl<T> DataWindow<T> {
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Whether the window wraps a streaming producer.
    pub fn is_streaming(&self) -> bool {
        matches!(self.source, Source::Streaming { .. })
    }

    /// Page count, if already known.
    pub fn total_pages(&self) -> Option<usize> {
        match &self.source {
            Source::Bounded(items) => Some(total_pages(items.len(), self.items_per_page)),
            Source::Streaming { total_pages, .. } => *total_pages,
        }
    }

    /// Whether a streaming source has been drained. Always `false` for bounded lists.
    pub fn is_exhausted(&self) -> bool {
        match &self.source {
            Source::Bounded(_) => false,
            Source::Streaming { exhausted, .. } => *exhausted,
        }
    }

    /// Items currently available without pulling from the producer.
    pub fn buffered_len(&self) -> usize {
        match &self.source {
            Source::Bounded(items) => items.len(),
            Source::Streaming { buffer, .. } => buffer.len(),
        }
    }

    /// Pages holding at least one available item.
    pub fn buffered_pages(&self) -> usize {
        filled_pages(self.buffered_len(), self.items_per_page)
    }

    /// Make `page` available, pulling from the producer as needed.
    pub async fn fill(&mut self, page: usize) {
        let target = items_needed_for(page, self.items_per_page);
        self.pull_until(target).await;
    }

    /// Pull from the producer until it is exhausted.
    pub async fn drain(&mut self) {
        self.pull_until(usize::MAX).await;
    }

    /// Items on `page` that are already available; empty when out of range.
    pub fn slice(&self, page: usize) -> &[T] {
        let items = match &self.source {
            Source::Bounded(items) => items.as_slice(),
            Source::Streaming { buffer, .. } => buffer.as_slice(),
        };

        if let Some(total) = self.total_pages()
            && page >= total
        {
            return &[];
        }

        let (start, end) = page_range(items.len(), self.items_per_page, page);
        &items[start..end]
    }

    /// Items on a 0-based page, buffering streamed items as required.
    pub async fn fetch(&mut self, page: usize) -> &[T] {
        self.fill(page).await;
        self.slice(page)
    }

    async fn pull_until(&mut self, target: usize) {
        let items_per_page = self.items_per_page;
        let Source::Streaming {
            producer,
            buffer,
            exhausted,
            total_pages: total,
        } = &mut self.source
        else {
            return;
        };

        let before = buffer.len();
        while buffer.len() < target && !*exhausted {
            if producer.is_exhausted() {
                *exhausted = true;
                break;
            }

            match producer.next().await {
                Some(item) => buffer.push(item),
                None => *exhausted = true,
            }
        }

        // A producer may know it is done right after yielding its last item.
        if producer.is_exhausted() {
            *exhausted = true;
        }

        if *exhausted && total.is_none() {
            let pages = total_pages(buffer.len(), items_per_page);
            *total = Some(pages);
            debug!(items = buffer.len(), pages, "streaming source exhausted");
        }

        if buffer.len() > before {
            debug!(pulled = buffer.len() - before, buffered = buffer.len(), "buffered streamed items");
        }
    }
}
