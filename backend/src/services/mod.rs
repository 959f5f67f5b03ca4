pub mod analyzer;
pub mod chat_service;
pub mod formatter;
pub mod knowledge;
pub mod matcher;
pub mod rate_limiter;
pub mod repository;

#[cfg(test)]
pub mod testing;
