//! Paginated listing responses.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage<T> {
    #[serde(rename = "data", default = "Vec::new")]
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageShapeError {
    #[error("page must be at least 1, got {0}")]
    PageOutOfRange(u32),

    #[error("page holds {items} items but page size is {page_size}")]
    TooManyItems { items: usize, page_size: u32 },
}

impl<T> ResultPage<T> {
    pub fn empty(page: u32, page_size: u32) -> Self {
        Self { items: Vec::new(), page, page_size, total_items: 0 }
    }

    pub fn validate(&self) -> Result<(), PageShapeError> {
        if self.page < 1 {
            return Err(PageShapeError::PageOutOfRange(self.page));
        }
        if self.items.len() > self.page_size as usize {
            return Err(PageShapeError::TooManyItems { items: self.items.len(), page_size: self.page_size });
        }
        Ok(())
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_items.div_ceil(self.page_size as u64)
    }

    pub fn has_next(&self) -> bool {
        (self.page as u64) < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
