//! Lazy paginated streams.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::{Stream, stream};

use crate::Result;

/// Chronological order of a paginated stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// Ascending by creation time.
    OldestFirst,
    /// Descending by creation time.
    NewestFirst,
    /// No ordering guarantee.
    Unordered,
}

/// A finite, non-restartable stream of raw items.
///
/// Pages are pulled lazily: remote requests happen only while the stream is
/// polled. The stream declares the order it produces items in so consumers
/// can cheaply pre-order before sorting.
pub struct Pages<'a, T> {
    order: Order,
    inner: Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>,
}

impl<'a, T> Pages<'a, T> {
    /// Wrap a stream that yields items in `order`.
    pub fn new<S>(order: Order, stream: S) -> Self
    where
        S: Stream<Item = Result<T>> + Send + 'a,
    {
        Self {
            order,
            inner: Box::pin(stream),
        }
    }

    /// Pages over items already in memory.
    pub fn from_items(order: Order, items: Vec<T>) -> Self
    where
        T: Send + 'a,
    {
        Self::new(order, stream::iter(items.into_iter().map(Ok)))
    }

    /// The order items are produced in.
    pub fn order(&self) -> Order {
        self.order
    }
}

impl<T> Stream for Pages<'_, T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
