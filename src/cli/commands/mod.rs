pub mod delete;
pub mod list;
pub mod login;
pub mod share;
pub mod sources;
