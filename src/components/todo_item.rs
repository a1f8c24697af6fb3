use leptos::html;
use leptos::prelude::*;

use crate::app::TodoContext;
use crate::todo::Todo;

/// One row of the list. Double-click the title to edit; Enter or blur
/// commits, Escape cancels, and an emptied title deletes the item.
#[component]
pub fn TodoItem(todo: Todo) -> impl IntoView {
    let TodoContext { list } = expect_context::<TodoContext>();
    let id = todo.id;
    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(todo.title.clone());
    let input_ref = NodeRef::<html::Input>::new();

    Effect::new(move |_| {
        if editing.get() {
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
            }
        }
    });

    let commit = move || {
        // blur fires again when the input is torn down after Enter
        if !editing.get_untracked() {
            return;
        }
        set_editing.set(false);
        let title = draft.get_untracked();
        list.update(|l| {
            if let Err(e) = l.rename(id, &title) {
                log::warn!("Failed to rename todo {}: {}", id, e);
            }
        });
    };

    let original = todo.title.clone();
    let cancel = move || {
        set_draft.set(original.clone());
        set_editing.set(false);
    };

    let toggle = move |_| {
        list.update(|l| {
            if let Err(e) = l.toggle(id) {
                log::warn!("Failed to toggle todo {}: {}", id, e);
            }
        });
    };

    let destroy = move |_| {
        list.update(|l| {
            if let Err(e) = l.remove(id) {
                log::warn!("Failed to remove todo {}: {}", id, e);
            }
        });
    };

    let title = todo.title.clone();
    let completed = todo.completed;

    view! {
        <li class="todo-item" class:completed=completed class:editing=move || editing.get()>
            <Show
                when=move || editing.get()
                fallback=move || {
                    view! {
                        <div class="view">
                            <input
                                type="checkbox"
                                class="toggle"
                                prop:checked=completed
                                on:change=toggle
                            />
                            <label on:dblclick=move |_| set_editing.set(true)>{title.clone()}</label>
                            <button class="destroy" title="Delete" on:click=destroy>
                                "\u{2717}"
                            </button>
                        </div>
                    }
                }
            >
                <input
                    type="text"
                    class="input edit"
                    node_ref=input_ref
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    on:keydown={
                        let cancel = cancel.clone();
                        move |ev| {
                            if ev.key() == "Enter" { commit(); }
                            if ev.key() == "Escape" { cancel(); }
                        }
                    }
                    on:blur=move |_| commit()
                />
            </Show>
        </li>
    }
}
