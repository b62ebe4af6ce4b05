pub mod bookmark;
pub mod config;
pub mod folders;
pub mod lang;
pub mod ls;
pub mod manage;
pub mod normalize;
pub mod practice;
pub mod show;
pub mod srs;
pub mod stats;
