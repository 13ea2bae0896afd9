pub mod compile;
pub mod loader;
pub mod logging;
pub mod parse;

#[cfg(test)]
mod loader_tests;
