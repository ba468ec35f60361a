//! Test modules kept out of the implementation files.

mod program_tests;
mod unary_operators_tests;
