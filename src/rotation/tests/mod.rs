//! Unit tests for the rotation module.
