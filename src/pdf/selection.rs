//! Page selection for viewing several pages at once.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Which pages to view (1-indexed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Every page
    #[default]
    All,
    /// A range of pages (inclusive)
    Range(RangeInclusive<usize>),
    /// Specific pages, ascending
    Pages(Vec<usize>),
}

impl PageSelection {
    /// Check if a page number is selected.
    pub fn includes(&self, page: usize) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.binary_search(&page).is_ok(),
        }
    }

    /// Parse a selection string (e.g., "all", "1-10", "1,3,5-7").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                return Ok(PageSelection::Range(parse_range(start, end)?));
            }
        }

        let mut pages = BTreeSet::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                pages.extend(parse_range(start, end)?);
            } else {
                pages.insert(parse_page(part)?);
            }
        }

        Ok(PageSelection::Pages(pages.into_iter().collect()))
    }

    /// Resolve to concrete page numbers for a document of `page_count` pages.
    ///
    /// Fails with [`Error::PageOutOfRange`] if any explicitly selected page
    /// does not exist.
    pub fn resolve(&self, page_count: usize) -> Result<Vec<usize>> {
        match self {
            PageSelection::All => Ok((1..=page_count).collect()),
            PageSelection::Range(range) => {
                if *range.end() > page_count {
                    return Err(Error::PageOutOfRange(*range.end(), page_count));
                }
                Ok(range.clone().collect())
            }
            PageSelection::Pages(pages) => {
                if let Some(&bad) = pages.iter().find(|&&p| p > page_count) {
                    return Err(Error::PageOutOfRange(bad, page_count));
                }
                Ok(pages.clone())
            }
        }
    }
}

fn parse_range(start: &str, end: &str) -> Result<RangeInclusive<usize>> {
    let start = parse_page(start)?;
    let end = parse_page(end)?;
    if start > end {
        return Err(Error::InvalidParameter(format!(
            "page range {}-{} is reversed",
            start, end
        )));
    }
    Ok(start..=end)
}

fn parse_page(s: &str) -> Result<usize> {
    let page: usize = s
        .trim()
        .parse()
        .map_err(|_| Error::InvalidParameter(format!("invalid page number '{}'", s.trim())))?;
    if page == 0 {
        return Err(Error::InvalidParameter("page numbers start at 1".into()));
    }
    Ok(page)
}
