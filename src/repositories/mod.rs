#[cfg(test)]
pub mod instrumented_store;
pub mod memory_store;
pub mod question_repository;
