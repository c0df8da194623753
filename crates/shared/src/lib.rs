pub mod builtin;
pub mod deck;
pub mod domain;
pub mod error;

#[cfg(test)]
#[path = "tests/deck_tests.rs"]
mod tests;
