use serde::{Deserialize, Serialize};

use crate::models::matches::{Match, MatchDto};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Column the match listing is ordered by. Ties are broken by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchSortField {
    #[default]
    Id,
    MatchDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchSort {
    pub field: MatchSortField,
    pub direction: SortDirection,
}

impl MatchSort {
    /// Parses `field[,direction]`, e.g. `matchDate,desc`.
    pub fn parse(value: &str) -> Result<Self, String> {
        let mut parts = value.split(',').map(str::trim);
        let field = match parts.next() {
            Some("id") | Some("") | None => MatchSortField::Id,
            Some("matchDate") | Some("date") => MatchSortField::MatchDate,
            Some(other) => return Err(format!("Cannot sort matches by '{}'", other)),
        };
        let direction = match parts.next().map(str::to_lowercase).as_deref() {
            None | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(other) => return Err(format!("Unknown sort direction '{}'", other)),
        };
        if parts.next().is_some() {
            return Err(format!("Malformed sort parameter '{}'", value));
        }
        Ok(Self { field, direction })
    }
}

/// Query string accepted by the match listing endpoint
#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: MatchSort,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: MatchSort::default(),
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort: MatchSort::default(),
        }
    }

    pub fn with_sort(mut self, sort: MatchSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

impl TryFrom<PageQuery> for PageRequest {
    type Error = String;

    fn try_from(query: PageQuery) -> Result<Self, Self::Error> {
        let sort = match query.sort.as_deref() {
            Some(sort) => MatchSort::parse(sort)?,
            None => MatchSort::default(),
        };
        Ok(PageRequest::new(
            query.page.unwrap_or(0),
            query.size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .with_sort(sort))
    }
}

/// One page of results plus the size of the whole dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            0
        } else {
            self.total_elements.div_ceil(self.size as u64)
        }
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }
}

/// Wire shape of a page of matches.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchPage {
    pub content: Vec<MatchDto>,
    pub number: u32,
    pub size: u32,
    pub number_of_elements: usize,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl From<&Page<Match>> for MatchPage {
    fn from(page: &Page<Match>) -> Self {
        let total_pages = page.total_pages();
        Self {
            content: page.content.iter().map(MatchDto::from).collect(),
            number: page.page,
            size: page.size,
            number_of_elements: page.number_of_elements(),
            total_elements: page.total_elements,
            total_pages,
            first: page.page == 0,
            last: (page.page as u64) + 1 >= total_pages,
            empty: page.content.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(PageRequest::new(0, 0).size, 1);
        assert_eq!(PageRequest::new(0, 5000).size, MAX_PAGE_SIZE);
        assert_eq!(PageRequest::new(3, 10).offset(), 30);
    }

    #[test]
    fn sort_parameter_parsing() {
        assert_eq!(MatchSort::parse("id").unwrap(), MatchSort::default());
        assert_eq!(
            MatchSort::parse("matchDate,DESC").unwrap(),
            MatchSort { field: MatchSortField::MatchDate, direction: SortDirection::Desc }
        );
        assert!(MatchSort::parse("teamA").is_err());
        assert!(MatchSort::parse("id,sideways").is_err());
        assert!(MatchSort::parse("id,asc,extra").is_err());
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Page<Match> = Page { content: vec![], page: 0, size: 20, total_elements: 41 };
        assert_eq!(page.total_pages(), 3);
        let wire = MatchPage::from(&page);
        assert!(wire.first);
        assert!(!wire.last);
        assert!(wire.empty);
        assert_eq!(wire.number_of_elements, 0);
        assert_eq!(wire.total_elements, 41);
    }
}
