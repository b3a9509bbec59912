//! Data source collaborator.
//!
//! Fetching records is the one place a request may block on I/O, so the
//! interface is async. Like the other seams in this crate, the trait comes in
//! two flavors: [`DataSource`] uses native `async fn` for static dispatch, and
//! [`DynDataSource`] is the object-safe version for storage behind `Arc`, with
//! a blanket implementation bridging the two.

use crate::error::BoxError;
use crate::model::Model;
use crate::record::BoxRecord;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Filter parameters passed through to the data source, keyed by field name.
pub type FilterParams = HashMap<String, String>;

/// The "fetch records" capability consumed by the request handlers.
///
/// No timeout or retry policy is imposed here: fetches are deterministic given
/// their inputs and failures propagate visibly to the request boundary.
pub trait DataSource: Send + Sync + 'static {
    /// Fetch up to `limit` records starting at `offset`.
    fn fetch_page(
        &self,
        model: &Model,
        offset: usize,
        limit: usize,
        filter: &FilterParams,
    ) -> impl Future<Output = Result<Vec<BoxRecord>, BoxError>> + Send;

    /// Fetch the single record matching `filter`, if any.
    fn fetch_one(
        &self,
        model: &Model,
        filter: &FilterParams,
    ) -> impl Future<Output = Result<Option<BoxRecord>, BoxError>> + Send;
}

/// Dynamic object-safe version of [`DataSource`].
pub trait DynDataSource: Send + Sync + 'static {
    /// Fetch a page of records (dynamic dispatch version).
    fn fetch_page_dyn<'a>(
        &'a self,
        model: &'a Model,
        offset: usize,
        limit: usize,
        filter: &'a FilterParams,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<BoxRecord>, BoxError>> + Send + 'a>>;

    /// Fetch one record (dynamic dispatch version).
    fn fetch_one_dyn<'a>(
        &'a self,
        model: &'a Model,
        filter: &'a FilterParams,
    ) -> Pin<Box<dyn Future<Output = Result<Option<BoxRecord>, BoxError>> + Send + 'a>>;
}

// Shared-handle form: an Arc over any DataSource is itself a DataSource,
// forwarding to the inner value.
impl<T: DataSource + ?Sized> DataSource for Arc<T> {
    fn fetch_page(
        &self,
        model: &Model,
        offset: usize,
        limit: usize,
        filter: &FilterParams,
    ) -> impl Future<Output = Result<Vec<BoxRecord>, BoxError>> + Send {
        self.as_ref().fetch_page(model, offset, limit, filter)
    }

    fn fetch_one(
        &self,
        model: &Model,
        filter: &FilterParams,
    ) -> impl Future<Output = Result<Option<BoxRecord>, BoxError>> + Send {
        self.as_ref().fetch_one(model, filter)
    }
}

// Blanket implementation: any DataSource is usable as a DynDataSource.
impl<T: DataSource> DynDataSource for T {
    fn fetch_page_dyn<'a>(
        &'a self,
        model: &'a Model,
        offset: usize,
        limit: usize,
        filter: &'a FilterParams,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<BoxRecord>, BoxError>> + Send + 'a>> {
        Box::pin(self.fetch_page(model, offset, limit, filter))
    }

    fn fetch_one_dyn<'a>(
        &'a self,
        model: &'a Model,
        filter: &'a FilterParams,
    ) -> Pin<Box<dyn Future<Output = Result<Option<BoxRecord>, BoxError>> + Send + 'a>> {
        Box::pin(self.fetch_one(model, filter))
    }
}
