// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page-number pagination for list views.
//!
//! Computes what a pager needs to draw: the clamped current page, whether
//! previous/next exist, and a compact run of page links with ellipsis gaps
//! (`1 … 4 5 6 … 20`).

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;
/// Pages shown on each side of the current page.
pub const DEFAULT_SIBLINGS: u32 = 1;

/// One slot in the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Position within a paged list. Pages are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Requested page is clamped into `1..=total_pages`. An empty list still
    /// has one (empty) page.
    pub fn new(total_items: u64, per_page: u32, requested_page: u32) -> Self {
        let per_page = per_page.clamp(1, MAX_PER_PAGE);
        let total_pages = total_items.div_ceil(u64::from(per_page)).max(1);
        let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);
        let page = requested_page.clamp(1, total_pages);

        Self {
            page,
            per_page,
            total_items,
            total_pages,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Index of the first item on the current page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.per_page as usize
    }

    /// Slice the current page out of a full list.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = (start + self.per_page as usize).min(items.len());
        &items[start..end]
    }

    /// Page links to draw. First and last page are always present, as is the
    /// current page with `siblings` neighbours on each side. A gap of exactly
    /// one page shows that page instead of an ellipsis.
    pub fn window(&self, siblings: u32) -> Vec<PageItem> {
        let last = self.total_pages;
        let lo = self.page.saturating_sub(siblings).max(1);
        let hi = self.page.saturating_add(siblings).min(last);

        let mut pages: Vec<u32> = Vec::with_capacity((hi - lo + 3) as usize);
        pages.push(1);
        pages.extend(lo..=hi);
        pages.push(last);
        pages.sort_unstable();
        pages.dedup();

        let mut items = Vec::with_capacity(pages.len() + 2);
        let mut prev: Option<u32> = None;
        for p in pages {
            if let Some(prev) = prev {
                match p - prev {
                    1 => {}
                    2 => items.push(PageItem::Page(prev + 1)),
                    _ => items.push(PageItem::Ellipsis),
                }
            }
            items.push(PageItem::Page(p));
            prev = Some(p);
        }
        items
    }
}

/// A page of results plus pager metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(flatten)]
    pub pagination: Pagination,
    pub has_previous: bool,
    pub has_next: bool,
    pub links: Vec<PageItem>,
}

impl<T: Clone> Page<T> {
    pub fn from_slice(all: &[T], per_page: u32, requested_page: u32) -> Self {
        let pagination = Pagination::new(all.len() as u64, per_page, requested_page);
        Self {
            items: pagination.slice(all).to_vec(),
            has_previous: pagination.has_previous(),
            has_next: pagination.has_next(),
            links: pagination.window(DEFAULT_SIBLINGS),
            pagination,
        }
    }
}
