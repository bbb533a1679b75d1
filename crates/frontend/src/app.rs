use crate::domain::a001_transaction::ui::list::TransactionList;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page">
            <h1 class="header__title">"Page not found"</h1>
            <a href="/transactions">"Back to transactions"</a>
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=TransactionList />
                    <Route path=path!("/transactions") view=TransactionList />
                </Routes>
            </main>
        </Router>
    }
}
