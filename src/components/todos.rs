use leptos::prelude::*;
use leptos_router::components::Router;
use leptos_router::hooks::use_query_map;

use crate::app::TodoContext;
use crate::components::todo_item::TodoItem;
use crate::todo::{items_left_label, Filter};

/// The list panel. Owns the router so the active filter lives in the
/// `?filter=` query string and survives reloads.
#[component]
pub fn Todos() -> impl IntoView {
    view! {
        <Router>
            <TodoPanel />
        </Router>
    }
}

#[component]
fn TodoPanel() -> impl IntoView {
    let TodoContext { list } = expect_context::<TodoContext>();
    let query = use_query_map();
    let filter = Memo::new(move |_| {
        query.with(|q| Filter::from_query(q.get("filter").as_deref()))
    });
    let (draft, set_draft) = signal(String::new());

    let add_todo = move || {
        let title = draft.get_untracked();
        // leave the list untouched so nothing is notified or re-saved
        if title.trim().is_empty() {
            log::debug!("Ignored blank todo");
            return;
        }
        let mut added = false;
        list.update(|l| match l.add(&title) {
            Ok(id) => {
                log::debug!("Added todo {}", id);
                added = true;
            }
            Err(e) => log::warn!("Failed to add todo: {}", e),
        });
        if added {
            set_draft.set(String::new());
        }
    };

    let toggle_all = move |_| {
        list.update(|l| {
            let all_done = l.all_completed();
            l.set_all(!all_done);
        });
    };

    let clear_completed = move |_| {
        list.update(|l| {
            let removed = l.clear_completed();
            log::debug!("Cleared {} completed todos", removed);
        });
    };

    view! {
        <section class="todos">
            <div class="todo-input-row">
                <Show when=move || list.with(|l| !l.is_empty())>
                    <input
                        type="checkbox"
                        class="toggle-all"
                        title="Mark all as complete"
                        prop:checked=move || list.with(|l| l.all_completed())
                        on:change=toggle_all
                    />
                </Show>
                <input
                    type="text"
                    class="input new-todo"
                    placeholder="What needs to be done?"
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" { add_todo(); }
                        if ev.key() == "Escape" { set_draft.set(String::new()); }
                    }
                />
            </div>

            <ul class="todo-list">
                <For
                    each=move || list.with(|l| l.visible(filter.get()))
                    key=|todo| (todo.id, todo.completed, todo.title.clone())
                    children=move |todo| view! { <TodoItem todo=todo /> }
                />
            </ul>

            <Show when=move || list.with(|l| !l.is_empty())>
                <footer class="todo-footer">
                    <span class="todo-count">
                        {move || list.with(|l| items_left_label(l.remaining()))}
                    </span>
                    <ul class="filters">
                        {Filter::ALL
                            .into_iter()
                            .map(|f| {
                                view! {
                                    <li>
                                        <a href=f.href() class:selected=move || filter.get() == f>
                                            {f.label()}
                                        </a>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                    <Show when=move || list.with(|l| l.completed_count() > 0)>
                        <button class="btn clear-completed" on:click=clear_completed>
                            "Clear completed"
                        </button>
                    </Show>
                </footer>
            </Show>
        </section>
    }
}
