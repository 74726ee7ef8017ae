//! Paged domain listing for a reviewer.

use std::fmt;
use std::str::FromStr;

use pagination::{Page, PageMeta, PageRequest};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::{Rating, SubjectCode, UserId, WebDomain};

/// Column the listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomainSort {
    /// Host name, then id.
    #[default]
    Domain,
    /// Whether the reviewer has rated the domain, then host name and id.
    Status,
}

/// Direction of the rated/unrated grouping under [`DomainSort::Status`].
///
/// The name sort ignores it and always runs ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Raised when a sort parameter is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported {parameter} value `{value}`")]
pub struct UnknownSortValue {
    pub parameter: &'static str,
    pub value: String,
}

impl FromStr for DomainSort {
    type Err = UnknownSortValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "domain" => Ok(Self::Domain),
            "status" => Ok(Self::Status),
            other => Err(UnknownSortValue {
                parameter: "sortBy",
                value: other.to_owned(),
            }),
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownSortValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(UnknownSortValue {
                parameter: "sortOrder",
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for DomainSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Domain => "domain",
            Self::Status => "status",
        })
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Caller-selected paging and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListingOptions {
    pub page: PageRequest,
    pub sort: DomainSort,
    pub order: SortOrder,
}

/// Everything a listing query needs, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainListingRequest {
    pub subject_code: SubjectCode,
    pub user_id: UserId,
    pub page: PageRequest,
    pub sort: DomainSort,
    pub order: SortOrder,
}

/// One listed domain joined with the reviewer's own rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainListEntry {
    pub domain: WebDomain,
    pub rating: Option<Rating>,
}

impl DomainListEntry {
    /// Whether the reviewer has rated this domain.
    pub fn is_rated(&self) -> bool {
        self.rating.is_some()
    }
}

impl Serialize for DomainListEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DomainListEntry", 6)?;
        state.serialize_field("id", &self.domain.id())?;
        state.serialize_field("domain", self.domain.domain())?;
        state.serialize_field("subjectCode", self.domain.subject_code())?;
        state.serialize_field("url", self.domain.url())?;
        state.serialize_field("urls", &self.domain.urls())?;
        state.serialize_field("rating", &self.rating)?;
        state.end()
    }
}

/// A page of listed domains plus the reviewer's overall progress.
///
/// Serialises as `{domains, pagination, totalRated}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainListing {
    domains: Vec<DomainListEntry>,
    pagination: PageMeta,
    total_rated: u64,
}

impl DomainListing {
    pub fn new(page: Page<DomainListEntry>, total_rated: u64) -> Self {
        let (domains, pagination) = page.into_parts();
        Self {
            domains,
            pagination,
            total_rated,
        }
    }

    pub fn domains(&self) -> &[DomainListEntry] {
        &self.domains
    }

    pub fn pagination(&self) -> PageMeta {
        self.pagination
    }

    /// Distinct domains of the subject the reviewer has rated.
    pub fn total_rated(&self) -> u64 {
        self.total_rated
    }
}
