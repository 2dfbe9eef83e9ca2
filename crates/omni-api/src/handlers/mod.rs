//! HTTP request handlers for the OmniChain API

pub mod dashboard;
pub mod stores;
