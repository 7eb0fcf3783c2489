//! Tests for the session manager
