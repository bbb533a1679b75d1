use crate::domain::a001_transaction::api;
use crate::domain::a001_transaction::row::{visible_rows, TransactionRow};
use crate::domain::a002_asset::ui::logo::AssetLogo;
use crate::shared::export::export_to_csv;
use crate::shared::icons::icon;
use crate::shared::list_utils::{create_sort_toggle, get_sort_indicator, SearchInput};
use crate::shared::number_format::{format_money, format_quantity};
use crate::system::auth::storage;
use crate::usecases::u501_import_transactions_csv::ImportProgressModal;
use chrono::Utc;
use contracts::domain::a001_transaction::TransactionType;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;

fn sort_header(
    label: &'static str,
    field: &'static str,
    sort_field: RwSignal<String>,
    sort_ascending: RwSignal<bool>,
) -> impl IntoView {
    view! {
        <th
            class="table__header-cell table__header-cell--sortable"
            on:click=create_sort_toggle(field, sort_field, sort_ascending)
        >
            {label}
            {move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())}
        </th>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn TransactionList() -> impl IntoView {
    let portfolio_id = RwSignal::new(storage::get_active_portfolio_id());
    let rows = RwSignal::new(Vec::<TransactionRow>::new());
    let error = RwSignal::new(None::<String>);
    let is_loading = RwSignal::new(false);

    let search = RwSignal::new(String::new());
    let type_filter = RwSignal::new(None::<TransactionType>);
    let sort_field = RwSignal::new("date".to_string());
    let sort_ascending = RwSignal::new(false);

    let import_open = RwSignal::new(false);
    let import_file = RwSignal::new_local(None::<web_sys::File>);

    let fetch = move || {
        let id = portfolio_id.get_untracked();
        is_loading.set(true);
        spawn_local(async move {
            match api::fetch_transactions(&id).await {
                Ok(items) => {
                    log::debug!("loaded {} transaction(s) for {}", items.len(), id);
                    rows.set(items.into_iter().map(Into::into).collect());
                    error.set(None);
                }
                Err(e) => {
                    log::error!("failed to load transactions: {}", e);
                    error.set(Some(e));
                }
            }
            is_loading.set(false);
        });
    };

    let visible = Memo::new(move |_| {
        visible_rows(
            &rows.get(),
            type_filter.get(),
            &search.get(),
            &sort_field.get(),
            sort_ascending.get(),
        )
    });

    let handle_refresh = move |_| {
        storage::save_active_portfolio_id(&portfolio_id.get_untracked());
        fetch();
    };

    let handle_export = move |_| {
        let filename = format!(
            "transactions_{}_{}.csv",
            portfolio_id.get_untracked(),
            Utc::now().format("%Y%m%d")
        );
        if let Err(e) = export_to_csv(&visible.get_untracked(), &filename) {
            error.set(Some(e));
        }
    };

    let handle_file_select = move |ev: web_sys::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        if let Some(input) = input {
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                import_file.set(Some(file));
                import_open.set(true);
            }
            // so that picking the same file again fires `change`
            input.set_value("");
        }
    };

    let on_import_close = Callback::new(move |_| import_open.set(false));
    let on_import_complete = Callback::new(move |success: bool| {
        if success {
            fetch();
        }
    });

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Transactions"</h1>
                </div>
                <div class="header__actions">
                    <Input value=portfolio_id placeholder="Portfolio" />
                    <Button appearance=ButtonAppearance::Secondary on_click=handle_refresh disabled=Signal::derive(move || is_loading.get())>
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=handle_export>
                        {icon("download")}
                        " Export CSV"
                    </Button>
                    <label class="button button--primary" for="transactions-import-input">
                        {icon("upload")}
                        " Import CSV"
                    </label>
                    <input
                        id="transactions-import-input"
                        type="file"
                        accept=".csv,text/csv"
                        class="hidden"
                        on:change=handle_file_select
                    />
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="filter-bar">
                <SearchInput
                    value=search
                    on_change=Callback::new(move |v: String| search.set(v))
                    placeholder="Symbol, name, notes..."
                />
                <select
                    class="filter-bar__select"
                    on:change=move |ev| type_filter.set(TransactionType::from_code(&event_target_value(&ev)))
                >
                    <option value="">"All types"</option>
                    {TransactionType::ALL
                        .iter()
                        .map(|t| view! { <option value=t.code()>{t.display_name()}</option> })
                        .collect_view()}
                </select>
                <span class="filter-bar__count">
                    {move || format!("{} of {} transaction(s)", visible.get().len(), rows.get().len())}
                </span>
            </div>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            {sort_header("Date", "date", sort_field, sort_ascending)}
                            {sort_header("Symbol", "symbol", sort_field, sort_ascending)}
                            {sort_header("Type", "type", sort_field, sort_ascending)}
                            {sort_header("Quantity", "quantity", sort_field, sort_ascending)}
                            {sort_header("Price", "price", sort_field, sort_ascending)}
                            {sort_header("Fees", "fees", sort_field, sort_ascending)}
                            {sort_header("Total", "total", sort_field, sort_ascending)}
                            <th class="table__header-cell">"Notes"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || visible.get()
                            key=|row| row.id.clone()
                            children=move |row| {
                                let type_class = format!("badge badge--{}", row.transaction_type.code());
                                let quantity = match row.split_ratio.as_str() {
                                    "" => format_quantity(row.quantity),
                                    ratio => format!("{} ({})", format_quantity(row.quantity), ratio),
                                };
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{row.date.format("%Y-%m-%d").to_string()}</td>
                                        <td class="table__cell">
                                            <div class="asset-cell">
                                                <AssetLogo symbol=row.symbol.clone() metadata=row.metadata.clone() />
                                                <span class="asset-cell__symbol">{row.symbol.clone()}</span>
                                                <span class="asset-cell__name">{row.asset_name.clone()}</span>
                                            </div>
                                        </td>
                                        <td class="table__cell">
                                            <span class=type_class>{row.transaction_type.display_name()}</span>
                                        </td>
                                        <td class="table__cell table__cell--number">{quantity}</td>
                                        <td class="table__cell table__cell--number">{format_money(row.price, &row.currency)}</td>
                                        <td class="table__cell table__cell--number">{format_money(row.fees, &row.currency)}</td>
                                        <td class="table__cell table__cell--number">{format_money(row.total, &row.currency)}</td>
                                        <td class="table__cell">{row.notes.clone()}</td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>

            <Show when=move || import_open.get()>
                <ImportProgressModal
                    portfolio_id=portfolio_id
                    file=import_file
                    on_close=on_import_close
                    on_complete=on_import_complete
                />
            </Show>
        </div>
    }
}
