pub mod github_source;
pub mod local_source;
