//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Image Analysis Hub"</h1>
            <p class="text-muted">"Upload your images or folders and let AI analyze them for you."</p>
        </header>
    }
}
