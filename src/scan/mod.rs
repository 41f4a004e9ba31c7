//! Repository traversal

pub mod walker;

pub use walker::RepoWalker;
