//! Поиск, фильтрация и сортировка списков в памяти плюс общие UI элементы для них

use gloo_timers::callback::Timeout;
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use std::cmp::Ordering;

const SEARCH_DEBOUNCE_MS: u32 = 250;

/// Trait для типов данных, поддерживающих поиск
pub trait Searchable {
    /// Case-insensitive match against the already lower-cased query
    fn matches_filter(&self, filter_lower: &str) -> bool;
}

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Stable sort by `field`; equal keys keep their previous order in both directions
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Keep the items matching `filter`; a blank filter keeps everything
pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    let filter = filter.trim();
    if filter.is_empty() {
        return items;
    }
    let filter_lower = filter.to_lowercase();

    items
        .into_iter()
        .filter(|item| item.matches_filter(&filter_lower))
        .collect()
}

/// Case-insensitive substring test used by `Searchable` impls
pub fn contains_ci(haystack: &str, filter_lower: &str) -> bool {
    haystack.to_lowercase().contains(filter_lower)
}

/// Total order over floats for sorting; NaN sorts last
pub fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| match (a.is_nan(), b.is_nan()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => Ordering::Equal,
    })
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Click handler for a sortable header: same column flips direction, a new one starts ascending
pub fn create_sort_toggle(
    field: &'static str,
    sort_field: RwSignal<String>,
    sort_ascending: RwSignal<bool>,
) -> impl Fn(MouseEvent) + Copy + 'static {
    move |_| {
        if sort_field.get_untracked() == field {
            sort_ascending.update(|v| *v = !*v);
        } else {
            sort_field.set(field.to_string());
            sort_ascending.set(true);
        }
    }
}

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let input_value = RwSignal::new(value.get_untracked());
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input = move |new_value: String| {
        input_value.set(new_value.clone());
        // dropping the previous Timeout cancels it
        let timeout = Timeout::new(SEARCH_DEBOUNCE_MS, move || on_change.run(new_value));
        pending.set_value(Some(timeout));
    };

    let clear = move |_| {
        pending.set_value(None);
        input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class=move || {
                    if value.get().trim().is_empty() {
                        "search-input__field"
                    } else {
                        "search-input__field search-input__field--active"
                    }
                }
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" title="Clear" on:click=clear>
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}
