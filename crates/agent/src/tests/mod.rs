//! Agent test suite.

mod scenarios;
