//! Configuration module for the trivia backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Base URL of the upstream question provider
    pub upstream_url: String,
    /// Timeout for a single provider call, in milliseconds
    pub upstream_timeout_ms: u64,
    /// Hard cap on the number of questions one request may ask for
    pub max_questions: u32,
    /// Extra provider fetches allowed while replacing duplicate questions
    pub fetch_retries: u32,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("TRIVIA_DB_PATH")
            .unwrap_or_else(|_| "./data/questions.sqlite".to_string())
            .into();

        let bind_addr = env::var("TRIVIA_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid TRIVIA_BIND_ADDR format");

        let upstream_url = env::var("TRIVIA_UPSTREAM_URL")
            .unwrap_or_else(|_| "https://jservice.io/api".to_string());

        let upstream_timeout_ms = env::var("TRIVIA_UPSTREAM_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5_000);

        let max_questions = env::var("TRIVIA_MAX_QUESTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let fetch_retries = env::var("TRIVIA_FETCH_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let log_level = env::var("TRIVIA_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            db_path,
            bind_addr,
            upstream_url,
            upstream_timeout_ms,
            max_questions,
            fetch_retries,
            log_level,
        }
    }

    /// Timeout applied to every provider call.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }
}
