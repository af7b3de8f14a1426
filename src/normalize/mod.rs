pub mod cache;

pub use cache::NormalizeCache;
