pub mod identity;
pub mod protected;
pub mod todos;

use crate::auth::{HashCost, TokenService};
use crate::store::{MemoryStore, TodoStore, UserStore};
use actix_web::web;
use std::sync::Arc;

/// Everything handlers need, built once at startup and handed to each worker.
#[derive(Clone)]
pub struct AppServices {
    pub todos: Arc<dyn TodoStore>,
    pub users: Arc<dyn UserStore>,
    pub tokens: TokenService,
    pub hash_cost: HashCost,
}

impl AppServices {
    /// Services over a fresh in-memory store.
    pub fn in_memory(tokens: TokenService, hash_cost: HashCost) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            todos: store.clone(),
            users: store,
            tokens,
            hash_cost,
        }
    }

    /// Registers the services as app data and mounts the route table.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.todos.clone()))
            .app_data(web::Data::from(self.users.clone()))
            .app_data(web::Data::new(self.tokens.clone()))
            .app_data(web::Data::new(self.hash_cost))
            .configure(config);
    }
}

/// The route table.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/identity")
            .service(identity::register)
            .service(identity::login)
            .service(identity::refresh)
            .service(identity::manage_info),
    )
    .service(protected::requires_auth)
    .service(
        web::scope("/todos")
            .service(todos::list_todos)
            .service(todos::create_todo)
            .service(todos::get_todo)
            .service(todos::update_todo)
            .service(todos::delete_todo),
    );
}
