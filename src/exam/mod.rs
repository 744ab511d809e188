// src/exam/mod.rs

pub mod assembler;
pub mod classifier;
pub mod ingest;
pub mod scoring;
pub mod store;
