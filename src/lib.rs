pub mod authors;
pub mod catalog;
pub mod config;
pub mod default_colors;
pub mod display;
pub mod error;
pub mod favourites;
pub mod resolver;
pub mod traits;
pub mod types;
