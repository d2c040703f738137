pub mod io;
pub mod models;
pub mod parsing;
pub mod store;
pub mod tabular;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::*;
pub use models::*;
pub use parsing::{DEFAULT_DOCUMENT_NAME, ParseError, parse_document, render_document};
pub use store::*;
pub use tabular::*;
