//! The structured browse query and its flat key/value codec.
//!
//! Serialisation contract: only the durable subset (`search`, `filter_by`,
//! `page`) round-trips through [`QueryState::to_pairs`] and
//! [`QueryState::from_pairs`]. The sort selection is deliberately excluded
//! from the addressable representation: sort is page-local view state and
//! does not survive navigation.

use std::collections::BTreeMap;
use std::fmt;

/// Key under which the free-text search term is persisted.
pub const SEARCH_KEY: &str = "search";
/// Key under which the filter dimension is persisted.
pub const FILTER_BY_KEY: &str = "filter_by";
/// Key under which the page number is persisted.
pub const PAGE_KEY: &str = "page";

/// Filter dimension applied to the free-text search server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterBy {
    /// Match the search term against name and role.
    #[default]
    All,
    /// Match against the employee name only.
    Name,
    /// Match against the job role only.
    Role,
}

impl FilterBy {
    /// Wire value used in the addressable representation and the read query.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Name => "name",
            Self::Role => "role",
        }
    }

    /// Parse a wire value, treating anything unrecognised as [`FilterBy::All`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "name" => Self::Name,
            "role" => Self::Role,
            _ => Self::All,
        }
    }
}

impl fmt::Display for FilterBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column a page of records can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Stable record identifier.
    Id,
    /// Employee name, compared case-insensitively.
    Name,
    /// Email address, compared case-insensitively.
    Email,
    /// Job role, compared case-insensitively.
    Role,
    /// Privilege level.
    UserRole,
    /// Joining date; absent dates compare as the epoch date.
    DateJoined,
}

/// Direction a sort key orders records in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the opposite direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Page-local sort selection: at most one active key and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSelection {
    /// Active sort column, if any.
    pub key: Option<SortKey>,
    /// Direction applied to the active column.
    pub direction: SortDirection,
}

impl SortSelection {
    /// Apply the column-click policy: selecting the active key flips the
    /// direction; selecting a different key activates it ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Asc;
        }
    }
}

/// The authoritative browse query.
///
/// Invariant: `page` is always at least 1. Decoding normalizes malformed or
/// missing page values rather than failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    /// Free-text search term, may be empty.
    pub search: String,
    /// Dimension the search term is matched against.
    pub filter_by: FilterBy,
    /// One-based page number.
    pub page: u32,
    /// Page-local sort selection; never persisted.
    pub sort: SortSelection,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            filter_by: FilterBy::All,
            page: 1,
            sort: SortSelection::default(),
        }
    }
}

impl QueryState {
    /// Encode the durable subset as a flat key/value mapping.
    ///
    /// All three keys are always emitted, including an empty search term, so
    /// the addressable representation is self-describing.
    #[must_use]
    pub fn to_pairs(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (SEARCH_KEY.to_owned(), self.search.clone()),
            (FILTER_BY_KEY.to_owned(), self.filter_by.as_str().to_owned()),
            (PAGE_KEY.to_owned(), self.page.to_string()),
        ])
    }

    /// Decode a flat key/value mapping, tolerating missing keys and malformed
    /// page values.
    ///
    /// Defaults: empty search, [`FilterBy::All`], page 1, no sort. A page
    /// value that is non-numeric or below 1 normalizes to 1.
    #[must_use]
    pub fn from_pairs(pairs: &BTreeMap<String, String>) -> Self {
        Self {
            search: pairs.get(SEARCH_KEY).cloned().unwrap_or_default(),
            filter_by: pairs
                .get(FILTER_BY_KEY)
                .map_or(FilterBy::All, |raw| FilterBy::parse(raw)),
            page: pairs.get(PAGE_KEY).map_or(1, |raw| normalize_page(raw)),
            sort: SortSelection::default(),
        }
    }

    /// Encode the durable subset as a `application/x-www-form-urlencoded`
    /// query string suitable for a shareable location.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.to_pairs() {
            serializer.append_pair(&key, &value);
        }
        serializer.finish()
    }

    /// Decode a query string produced by [`QueryState::to_query_string`] or
    /// typed by hand; unknown keys are ignored.
    #[must_use]
    pub fn from_query_string(raw: &str) -> Self {
        let pairs = url::form_urlencoded::parse(raw.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect::<BTreeMap<_, _>>();
        Self::from_pairs(&pairs)
    }
}

fn normalize_page(raw: &str) -> u32 {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}
