//! The caller-supplied fetch contract.

use async_trait::async_trait;

use roster_query::{Page, PageRequest};

/// Error type produced by a fetcher.
///
/// The engine never inspects fetch errors beyond surfacing them; retry
/// policy, if any, belongs inside the caller's fetcher.
pub type FetchError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of one page fetch.
pub type FetchResult<T> = Result<Page<T>, FetchError>;

/// A source of pages for one resource.
///
/// Implemented by whatever talks to the backing API. Plain async closures
/// implement it too, which keeps tests and small callers free of
/// boilerplate:
///
/// ```rust
/// use roster_engine::fetch::Fetcher;
/// use roster_query::{Page, PageRequest};
///
/// async fn demo() {
///     let fetcher = |request: PageRequest| async move {
///         Ok::<_, roster_engine::fetch::FetchError>(Page::new(
///             vec![format!("offset {}", request.offset)],
///             1,
///         ))
///     };
///     let page = fetcher.fetch_page(PageRequest::new(10, 0)).await.unwrap();
///     assert_eq!(page.total, 1);
/// }
/// ```
#[async_trait]
pub trait Fetcher<T>: Send + Sync {
    /// Fetch one page matching the request.
    async fn fetch_page(&self, request: PageRequest) -> FetchResult<T>;
}

#[async_trait]
impl<T, F, Fut> Fetcher<T> for F
where
    T: Send + 'static,
    F: Fn(PageRequest) -> Fut + Send + Sync,
    Fut: Future<Output = FetchResult<T>> + Send,
{
    async fn fetch_page(&self, request: PageRequest) -> FetchResult<T> {
        (self)(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_closure_fetcher() {
        let fetcher = |request: PageRequest| async move {
            Ok::<_, FetchError>(Page::new(vec![request.offset], request.offset + 1))
        };

        let page = fetcher.fetch_page(PageRequest::new(10, 30)).await.unwrap();
        assert_eq!(page.items, vec![30]);
        assert_eq!(page.total, 31);
    }

    #[tokio::test]
    async fn test_failing_fetcher() {
        let fetcher = |_request: PageRequest| async move {
            Err::<Page<u64>, _>(FetchError::from("boom"))
        };

        let err = fetcher.fetch_page(PageRequest::probe()).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
