pub mod bookmarks;
pub mod config;
pub mod practice;
pub mod resources;
pub mod srs;
pub mod statistics;
