pub mod clean;
pub mod configure;
pub mod data;
pub mod handlers;
pub mod list;
pub mod search;
