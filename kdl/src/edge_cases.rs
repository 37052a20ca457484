//! Edge case and round-trip tests for the parser/printer pair.
