mod error_tests;
mod support;
