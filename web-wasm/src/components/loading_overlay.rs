//! 解析中オーバーレイ

use leptos::prelude::*;

/// 未完了のバッチが1つでもあれば表示
#[component]
pub fn LoadingOverlay(pending_batches: RwSignal<u32>) -> impl IntoView {
    view! {
        <Show when=move || { pending_batches.get() > 0 }>
            <div class="loading-overlay">
                <div class="loading-dialog">
                    <div class="spinner" />
                    <p>"Analyzing images..."</p>
                </div>
            </div>
        </Show>
    }
}
