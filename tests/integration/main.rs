//! Integration tests against an in-process fake of the duplicate endpoints

mod form_tests;
mod oracle_tests;
mod support;
