pub mod filter;
pub mod shelf;
