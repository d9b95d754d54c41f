//! closurefix: closure-stub synthesis for Go syntax trees.
//!
//! Given a parsed source tree and a cursor location naming an undeclared
//! call-head identifier, closurefix infers the syntactic/type context and
//! inserts a closure-function stub (`name := func (<inferred params>) {}`)
//! after the nearest declaration inside the enclosing function body.

// Core infrastructure - re-exported from closurefix-core
pub use closurefix_core::edit;
pub use closurefix_core::error;
pub use closurefix_core::output;
pub use closurefix_core::text;

// The synthesis engine
pub mod args;
pub mod classify;
pub mod editor;
pub mod fix;
pub mod interchange;
pub mod tree;
pub mod typesig;

// Front door for the CLI
pub mod cli;

// Error bridges - converts tree errors to FixError
mod error_bridges;
