use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::StoreError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a document stream, stable across updates
    StreamId
);

string_id!(
    /// Identifier of one version of a document stream
    CommitId
);

string_id!(
    /// Identifier of an accepted record in the row store
    RowId
);

/// Result of creating a document stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamCommit {
    pub stream_id: StreamId,
    pub commit_id: CommitId,
}

/// Latest version of a document stream.
///
/// The content is untrusted: anyone may publish under any model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub stream_id: StreamId,
    pub commit_id: CommitId,
    pub controller: String,
    pub model: String,
    pub content: Value,
}

/// A record that failed validation, kept for inspection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarantinedRecord {
    pub stream_id: StreamId,
    pub content: Value,
    pub error: String,
}

/// Opaque position in a paginated listing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub(crate) fn from_offset(offset: usize) -> Self {
        Self(offset.to_string())
    }

    pub(crate) fn offset(&self) -> Result<usize, StoreError> {
        self.0
            .parse()
            .map_err(|_| StoreError::InvalidCursor(self.0.clone()))
    }
}

impl From<String> for Cursor {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Forward pagination request: at most `first` items after `after`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub first: usize,
    pub after: Option<Cursor>,
}

impl PageRequest {
    pub fn first(first: usize) -> Self {
        Self { first, after: None }
    }

    pub fn after(self, cursor: Cursor) -> Self {
        Self {
            after: Some(cursor),
            ..self
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub end_cursor: Option<Cursor>,
    pub has_next_page: bool,
}

impl<T> Page<T> {
    /// The request for the page following this one, if any.
    pub fn next(&self, first: usize) -> Option<PageRequest> {
        if !self.has_next_page {
            return None;
        }

        self.end_cursor
            .clone()
            .map(|cursor| PageRequest::first(first).after(cursor))
    }
}

impl<T> Page<T> {
    /// Builds the requested page from a listing, cloning only the items on it.
    pub(crate) fn from_listing<'a, I>(items: I, request: &PageRequest) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = &'a T>,
        T: Clone + 'a,
    {
        if request.first == 0 {
            return Err(StoreError::EmptyPage);
        }

        let start = match &request.after {
            Some(cursor) => cursor.offset()?,
            None => 0,
        };

        let mut items = items.into_iter();
        if items.by_ref().take(start).count() < start {
            return Err(StoreError::InvalidCursor(start.to_string()));
        }

        let page = items
            .by_ref()
            .take(request.first)
            .cloned()
            .collect::<Vec<_>>();
        let end = start + page.len();

        Ok(Self {
            end_cursor: (end > start).then(|| Cursor::from_offset(end)),
            has_next_page: items.next().is_some(),
            items: page,
        })
    }

    pub(crate) fn slice(items: &[T], request: &PageRequest) -> Result<Self, StoreError>
    where
        T: Clone,
    {
        Self::from_listing(items, request)
    }

    pub(crate) fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        Ok(Page {
            items: self.items.into_iter().map(f).collect::<Result<_, _>>()?,
            end_cursor: self.end_cursor,
            has_next_page: self.has_next_page,
        })
    }
}
