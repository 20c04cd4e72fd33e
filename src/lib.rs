//! Workspace integration tests
//!
//! This package exists to host the end-to-end scenarios in `tests/`; the
//! engine itself lives in `crates/triggerflow`.
