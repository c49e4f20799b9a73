pub mod analytics;
pub mod auth;
pub mod health;
pub mod livestream;
pub mod media;
pub mod notification;
pub mod post;
