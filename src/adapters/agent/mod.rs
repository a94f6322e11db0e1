pub mod ssh_agent;
pub mod wire;
