mod contact;
pub(crate) mod image;
mod page;

pub use contact::{Contact, ContactStatus};
pub use image::ImageFile;
pub use page::PaginatedResponse;
