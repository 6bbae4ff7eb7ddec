pub mod pagination;
pub mod popup;
