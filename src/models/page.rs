use serde::Deserialize;

use super::Contact;

/// One page of contacts as returned by `GET /contacts?page=&size=`.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse {
    #[serde(default)]
    pub content: Vec<Contact>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub number: u32,
}

impl PaginatedResponse {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Clamp a requested page index into `[0, total_pages)`, or 0 when there are no pages.
    pub fn clamp_page(&self, page: u32) -> u32 {
        if self.total_pages == 0 {
            0
        } else {
            page.min(self.total_pages - 1)
        }
    }
}
