pub mod batch;
pub mod candidate;
pub mod product;
pub mod profile;
