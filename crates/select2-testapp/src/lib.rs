//! Demo application for the select2 widgets
//!
//! A small music catalogue (genres, artists, albums), an address book
//! (countries, cities) and one form for every widget configuration:
//! light, heavy, model backed, tagging, chained selects and custom labels.

pub mod app;
pub mod forms;
pub mod models;
pub mod views;
pub mod widgets;

pub use app::TestApp;
pub use models::{Album, Artist, City, Country, Db, Genre, Groupie};
