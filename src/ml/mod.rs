//! Offline sentiment training pipeline.
//!
//! Developer-facing building blocks behind the `sentidash-train` binary: a toy corpus,
//! a deterministic stratified split, a TF-IDF vectorizer, a multinomial logistic
//! regression head, evaluation metrics and the versioned JSON artifacts they produce.
//! Nothing in the dashboard loads these artifacts.

pub mod artifacts;
pub mod corpus;
pub mod logreg;
pub mod metrics;
pub mod split;
pub mod tfidf;
pub mod trainer;
