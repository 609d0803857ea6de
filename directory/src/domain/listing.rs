//! Listing pipeline: filter, then sort, then paginate.
//!
//! Every stage is pure and works on borrowed users, so the fetched collection
//! is never reordered or modified. [`ListingState`] holds the inputs the
//! pipeline is re-run with and applies the page reset rules.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use pagination::{DEFAULT_PAGE_SIZE, Page, PageNumber, PageSize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::User;

/// Raised when parsing an unknown sort option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort option {input:?}; expected one of none, name-asc, name-desc, age-asc, age-desc")]
pub struct UnknownSortOption {
    input: String,
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOption {
    /// Keep the filtered order.
    #[default]
    None,
    NameAsc,
    NameDesc,
    AgeAsc,
    AgeDesc,
}

impl SortOption {
    /// Every option, in the order a picker would list them.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::NameAsc,
        Self::NameDesc,
        Self::AgeAsc,
        Self::AgeDesc,
    ];

    /// Wire literal, e.g. `name-asc`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::AgeAsc => "age-asc",
            Self::AgeDesc => "age-desc",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = UnknownSortOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| UnknownSortOption {
                input: s.to_owned(),
            })
    }
}

/// Case-insensitive free-text search over names and email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    needle: String,
}

impl SearchQuery {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.trim().to_lowercase();
        Self { raw, needle }
    }

    /// Text as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the query keeps every user.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Whether `user` matches on first name, last name, email or
    /// `"firstName lastName"`. Empty fields never match a non-empty query.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        if self.is_empty() {
            return true;
        }
        [user.first_name(), user.last_name(), user.email()]
            .into_iter()
            .any(|field| self.matches_field(field))
            || self.matches_field(&user.full_name())
    }

    fn matches_field(&self, field: &str) -> bool {
        !field.is_empty() && field.to_lowercase().contains(&self.needle)
    }
}

/// Keep the users matching `query`, in input order.
pub fn filter_users<'a>(
    users: impl IntoIterator<Item = &'a User>,
    query: &SearchQuery,
) -> Vec<&'a User> {
    users.into_iter().filter(|user| query.matches(user)).collect()
}

/// Stable in-place sort of `users` by `option`.
///
/// Descending orders reverse the comparator rather than the result, so users
/// with equal keys keep their filtered order in both directions.
pub fn sort_users(users: &mut [&User], option: SortOption) {
    match option {
        SortOption::None => {}
        SortOption::NameAsc => users.sort_by(|a, b| compare_users_by_name(a, b)),
        SortOption::NameDesc => users.sort_by(|a, b| compare_users_by_name(b, a)),
        SortOption::AgeAsc => users.sort_by_key(|user| user.age()),
        SortOption::AgeDesc => users.sort_by(|a, b| b.age().cmp(&a.age())),
    }
}

fn compare_users_by_name(a: &User, b: &User) -> Ordering {
    compare_names(&a.full_name(), &b.full_name())
}

/// Collation used for name ordering.
///
/// Names compare on their base letters first, ignoring case and accents, so
/// `Élodie` sorts among the `E`s. Ties break on accents, then on case, then on
/// the raw text so the order stays total and deterministic.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| lowercase(a).cmp(&lowercase(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn lowercase(text: &str) -> String {
    text.nfd().flat_map(char::to_lowercase).collect()
}

/// Inputs of the listing pipeline for one view.
///
/// Changing the query or sort resets to the first page. Deriving a page that
/// no longer exists also resets to the first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    query: SearchQuery,
    sort: SortOption,
    page: PageNumber,
    page_size: PageSize,
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListingState {
    #[must_use]
    pub fn new(page_size: PageSize) -> Self {
        Self {
            query: SearchQuery::default(),
            sort: SortOption::None,
            page: PageNumber::FIRST,
            page_size,
        }
    }

    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        &self.query
    }

    #[must_use]
    pub const fn sort(&self) -> SortOption {
        self.sort
    }

    #[must_use]
    pub const fn page(&self) -> PageNumber {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = SearchQuery::new(query);
        self.page = PageNumber::FIRST;
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
        self.page = PageNumber::FIRST;
    }

    pub fn set_page(&mut self, page: PageNumber) {
        self.page = page;
    }

    /// Run filter, sort and paginate over `users`.
    ///
    /// Resets the current page to the first one when it lies beyond the
    /// filtered total.
    pub fn derive<'a>(&mut self, users: impl IntoIterator<Item = &'a User>) -> Page<&'a User> {
        let mut visible = filter_users(users, &self.query);
        sort_users(&mut visible, self.sort);
        let total_pages = pagination::page_count(visible.len(), self.page_size);
        if !self.page.is_within(total_pages) {
            self.page = PageNumber::FIRST;
        }
        Page::from_items(visible, self.page, self.page_size)
    }
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
