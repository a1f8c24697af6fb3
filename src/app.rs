use leptos::prelude::*;

use crate::components::header::Header;
use crate::components::todos::Todos;
use crate::config::AppConfig;
use crate::storage::LocalStorage;
use crate::theme::ThemeProvider;
use crate::todo::TodoList;

/// Shared list state read by both the header and the list.
#[derive(Clone, Copy)]
pub struct TodoContext {
    pub list: RwSignal<TodoList>,
}

fn load_todos(key: &str) -> TodoList {
    let loaded = LocalStorage::open().and_then(|store| TodoList::load(&store, key));
    match loaded {
        Ok(list) => {
            log::debug!("Loaded {} todos from '{}'", list.len(), key);
            list
        }
        Err(e) => {
            log::warn!("Failed to load todos, starting empty: {}", e);
            TodoList::new()
        }
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let list = RwSignal::new(load_todos(&config.todos_key));
    provide_context(TodoContext { list });

    // Persist on every change
    let todos_key = config.todos_key.clone();
    Effect::new(move |_| {
        let result = LocalStorage::open()
            .and_then(|store| list.with(|l| l.save(&store, &todos_key)));
        if let Err(e) = result {
            log::warn!("Failed to save todos: {}", e);
        }
    });

    view! {
        <ThemeProvider storage_key=config.theme_key>
            <Header />
            <Todos />
        </ThemeProvider>
    }
}
