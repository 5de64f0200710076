//! Cross-module tests: sources feeding the index, retrieval over rebuilt corpora.
