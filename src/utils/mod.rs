// Utilities
pub mod error;
pub mod formatter;
pub mod filter;
pub mod natural;
