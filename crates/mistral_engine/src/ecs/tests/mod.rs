//! Registry scenario tests
