//! Cross-module test suites


mod concurrent_tests;
mod default_tests;
