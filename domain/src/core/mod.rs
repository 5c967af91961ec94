//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: plan validation errors
//! - [`error::ParseError`]: malformed structured backend output
//! - [`string`]: text helpers used by parsing and scoring

pub mod error;
pub mod string;
