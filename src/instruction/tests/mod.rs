//! Unit tests for the instruction module.
