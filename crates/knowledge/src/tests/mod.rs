//! Cross-module tests for retrieval and answering.

mod support;
