pub mod config;
pub mod contact;
pub mod health;
pub mod html;
pub mod i18n;
pub mod render;
pub mod routes;
pub mod security;
pub mod seed;
pub mod seo;
pub mod server;
pub mod sitemap;
pub mod store;
