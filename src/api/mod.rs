use async_trait::async_trait;

use crate::models::{Contact, ImageFile, PaginatedResponse};

#[cfg(test)]
use mockall::automock;

mod error;
mod http;

#[cfg(test)]
pub mod test_utils;

pub use error::{ApiAction, ApiError};
pub use http::HttpContactsApi;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Remote contacts backend.
///
/// Every failure is returned as an [`ApiError`] whose `Display` is a message
/// fit to show to the user.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContactsApi: Send + Sync {
    /// Fetches one page of contacts, `page` being zero based.
    async fn list(&self, page: u32, size: u32) -> Result<PaginatedResponse>;

    async fn get(&self, id: &str) -> Result<Contact>;

    /// Creates a contact and returns it with its backend assigned identifier.
    async fn create(&self, contact: &Contact) -> Result<Contact>;

    async fn update(&self, id: &str, contact: &Contact) -> Result<Contact>;

    async fn delete(&self, id: &str) -> Result<()>;

    /// Uploads a profile photo for an already persisted contact.
    async fn update_image(&self, id: &str, image: &ImageFile) -> Result<()>;
}
