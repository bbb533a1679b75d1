use crate::domain::a002_asset::logo::{initials, logo_sources};
use crate::shared::api_utils::api_base;
use contracts::domain::a002_asset::AssetMetadata;
use leptos::prelude::*;

/// Asset logo that walks the fallback chain on load errors
#[component]
pub fn AssetLogo(
    symbol: String,
    metadata: Option<AssetMetadata>,
    #[prop(optional)] size: Option<u32>,
) -> impl IntoView {
    let size = size.unwrap_or(24);
    let sources = logo_sources(&symbol, metadata.as_ref(), &api_base());
    let badge = initials(&symbol);
    let index = RwSignal::new(0usize);
    let sources = StoredValue::new(sources);

    let current = move || sources.with_value(|s| s.get(index.get()).cloned());
    let dimension = format!("width: {size}px; height: {size}px;");
    let alt = format!("{} logo", symbol);

    view! {
        {move || match current() {
            Some(src) => view! {
                <img
                    class="asset-logo"
                    src=src
                    alt=alt.clone()
                    style=dimension.clone()
                    on:error=move |_| index.update(|i| *i += 1)
                />
            }
            .into_any(),
            None => view! {
                <span class="asset-logo asset-logo--initials" style=dimension.clone()>
                    {badge.clone()}
                </span>
            }
            .into_any(),
        }}
    }
}
