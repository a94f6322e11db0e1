pub mod key;
pub mod key_listing;
pub mod paste;
pub mod upload;
