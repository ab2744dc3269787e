pub mod handlers;
pub mod models;
pub mod routes;

use crate::model::Backends;

pub struct AppState {
    pub backends: Backends,
}
