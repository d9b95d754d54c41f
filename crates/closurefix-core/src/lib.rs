//! Core infrastructure for closurefix.
//!
//! This crate provides editor- and language-agnostic infrastructure:
//! - Document model with atomic, hash-verified text insertions
//! - Text position utilities (byte offset <-> line:column)
//! - Error types and stable output error codes
//! - JSON output envelope for CLI responses

pub mod edit;
pub mod error;
pub mod output;
pub mod text;
