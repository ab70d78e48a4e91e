//! Unit tests for ceh-coach modules
//!
//! These tests cover individual components without network I/O. Generation
//! goes through a scripted in-process model.

mod support;

mod test_coach;
mod test_config;
mod test_errors;
mod test_render;
mod test_repl;
mod test_study;
mod test_syllabus;
