//! Exam-intake adapter for the lab report engine.
//!
//! This crate turns the exam-intake form payload into typed lab results and
//! a species key, and reports form fields that match no lab parameter.

pub mod form;

pub use form::*;
