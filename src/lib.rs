pub mod cli;
pub mod config;
pub mod i18n;
pub mod llm;
pub mod outlet;
pub mod researcher;
pub mod search;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use researcher::launch;
pub use types::CompanyResearchOutput;
