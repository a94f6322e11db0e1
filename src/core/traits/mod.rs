pub mod key_source;
pub mod remote_store;
pub mod selector;
