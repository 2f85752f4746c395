//! SeaORM entities for the tables the workflows write to.

pub mod post;
pub mod post_view;
pub mod user;
