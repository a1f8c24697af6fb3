use leptos::prelude::*;

use crate::app::TodoContext;
use crate::theme::ThemeContext;
use crate::todo::items_left_label;

#[component]
pub fn Header() -> impl IntoView {
    let TodoContext { list } = expect_context::<TodoContext>();
    let ThemeContext { mode } = expect_context::<ThemeContext>();

    view! {
        <header class="app-header">
            <h1 class="app-title">"Todos"</h1>
            <span class="app-remaining">
                {move || list.with(|l| items_left_label(l.remaining()))}
            </span>
            <button
                class="btn theme-toggle"
                title="Switch theme"
                on:click=move |_| mode.update(|m| *m = m.next())
            >
                {move || format!("Theme: {}", mode.get().label())}
            </button>
        </header>
    }
}
