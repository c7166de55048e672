///
/// PageWindow
///
/// One-based page window. A non-positive size disables paging; a
/// non-positive page number reads as the first page.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageWindow {
    size: i64,
    number: i64,
}

impl PageWindow {
    #[must_use]
    pub const fn new(size: i64, number: i64) -> Self {
        Self {
            size,
            number: if number <= 0 { 1 } else { number },
        }
    }

    #[must_use]
    pub const fn size(&self) -> i64 {
        self.size
    }

    #[must_use]
    pub const fn number(&self) -> i64 {
        self.number
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.size <= 0
    }

    /// Elements skipped before the window; saturates instead of overflowing.
    #[must_use]
    pub fn offset(&self) -> usize {
        if self.is_unbounded() {
            return 0;
        }

        let skip = (self.number - 1).saturating_mul(self.size);
        usize::try_from(skip).unwrap_or(usize::MAX)
    }

    /// Maximum elements in the window, `None` when paging is disabled.
    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        if self.is_unbounded() {
            return None;
        }

        Some(usize::try_from(self.size).unwrap_or(usize::MAX))
    }

    pub fn apply<I: IntoIterator>(self, items: I) -> impl Iterator<Item = I::Item> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.limit().unwrap_or(usize::MAX))
    }
}

/// Window `items` to page `number` of `size` elements.
pub fn page<I: IntoIterator>(items: I, size: i64, number: i64) -> impl Iterator<Item = I::Item> {
    PageWindow::new(size, number).apply(items)
}
