use super::{duplicate_email, StoreResult, TodoStore, UserStore};
use crate::models::{normalize_email, NewUser, Todo, User};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-process store with the same id semantics as a fresh database:
/// ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryStore {
    todos: RwLock<Table<Todo>>,
    users: RwLock<Table<User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TodoStore for MemoryStore {
    fn list(&self) -> StoreResult<'_, Vec<Todo>> {
        Box::pin(async move { Ok(self.todos.read().await.rows.values().cloned().collect()) })
    }

    fn create(&self, description: String) -> StoreResult<'_, Todo> {
        Box::pin(async move {
            let mut table = self.todos.write().await;
            let todo = Todo {
                id: table.next_id(),
                description,
            };
            table.rows.insert(todo.id, todo.clone());
            Ok(todo)
        })
    }

    fn get(&self, id: i32) -> StoreResult<'_, Option<Todo>> {
        Box::pin(async move { Ok(self.todos.read().await.rows.get(&id).cloned()) })
    }

    fn update(&self, id: i32, description: String) -> StoreResult<'_, Option<Todo>> {
        Box::pin(async move {
            let mut table = self.todos.write().await;
            Ok(table.rows.get_mut(&id).map(|todo| {
                todo.description = description;
                todo.clone()
            }))
        })
    }

    fn delete(&self, id: i32) -> StoreResult<'_, bool> {
        Box::pin(async move { Ok(self.todos.write().await.rows.remove(&id).is_some()) })
    }
}

impl UserStore for MemoryStore {
    fn create(&self, user: NewUser) -> StoreResult<'_, User> {
        Box::pin(async move {
            let mut table = self.users.write().await;
            let key = normalize_email(&user.email);
            if table.rows.values().any(|u| normalize_email(&u.email) == key) {
                return Err(duplicate_email(&user.email));
            }
            let user = User {
                id: table.next_id(),
                email: user.email,
                password_hash: user.password_hash,
                security_stamp: user.security_stamp,
            };
            table.rows.insert(user.id, user.clone());
            Ok(user)
        })
    }

    fn find_by_email<'a>(&'a self, email: &'a str) -> StoreResult<'a, Option<User>> {
        Box::pin(async move {
            let key = normalize_email(email);
            Ok(self
                .users
                .read()
                .await
                .rows
                .values()
                .find(|u| normalize_email(&u.email) == key)
                .cloned())
        })
    }

    fn find_by_id(&self, id: i32) -> StoreResult<'_, Option<User>> {
        Box::pin(async move { Ok(self.users.read().await.rows.get(&id).cloned()) })
    }
}
