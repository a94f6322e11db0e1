pub mod share_service;
