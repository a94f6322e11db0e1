pub mod pastebin_store;
pub mod transfer_store;
