//! Integration tests for the dirtree directory service

mod cli_binary;
mod concurrency;
mod config_integration;
mod directory_service;
mod sled_store;
mod test_utils;
