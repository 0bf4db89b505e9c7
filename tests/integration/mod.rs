//! Integration tests for the form service over in-memory storage.
