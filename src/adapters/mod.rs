pub mod agent;
pub mod http;
pub mod prompt;
pub mod sources;
pub mod stores;

#[cfg(test)]
pub(crate) mod test_support;
