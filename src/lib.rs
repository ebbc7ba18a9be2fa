pub mod app;
pub mod bootstrap;
pub mod config;
pub mod demo_seeder;
pub mod error;
pub mod models {
    pub mod document;
    pub mod search;
}
pub mod search {
    pub mod client;
    pub mod query;
    pub mod results;
    pub mod schema;
}
pub mod api {
    pub mod errors;
    pub mod health;
    pub mod search;
}
