//! CSV export of list pages (comma separated, quotes doubled)

use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Types that can be written as one CSV row
pub trait CsvExportable {
    /// Column headers, in row order
    fn headers() -> Vec<&'static str>;

    fn to_csv_row(&self) -> Vec<String>;
}

/// Build the CSV document: header line plus one line per item, `\n` terminated
pub fn build_csv<T: CsvExportable>(data: &[T]) -> String {
    let mut csv_content = String::new();

    csv_content.push_str(&T::headers().join(","));
    csv_content.push('\n');

    for item in data {
        let escaped_row: Vec<String> = item
            .to_csv_row()
            .iter()
            .map(|cell| escape_csv_cell(cell))
            .collect();
        csv_content.push_str(&escaped_row.join(","));
        csv_content.push('\n');
    }

    csv_content
}

/// Экспортирует список в CSV файл и инициирует скачивание
pub fn export_to_csv<T: CsvExportable>(data: &[T], filename: &str) -> Result<(), String> {
    if data.is_empty() {
        return Err("Nothing to export".to_string());
    }

    let blob = create_csv_blob(&build_csv(data))?;
    download_blob(&blob, filename)?;
    log::info!("exported {} row(s) to {}", data.len(), filename);

    Ok(())
}

/// Quote a cell if it contains a separator, a quote or a line break
pub fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn js_err(what: &'static str) -> impl Fn(wasm_bindgen::JsValue) -> String {
    move |e| format!("{}: {:?}", what, e)
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8;");
    Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_err("Failed to create blob"))
}

/// Click a hidden `<a download>` pointing at an object URL of `blob`
fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(blob).map_err(js_err("Failed to create object URL"))?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_err("Failed to create anchor"))?
        .unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(js_err("Failed to hide anchor"))?;

    body.append_child(&anchor).map_err(js_err("Failed to attach anchor"))?;
    anchor.click();
    let detached = body.remove_child(&anchor).map(|_| ());
    let revoked = Url::revoke_object_url(&url);
    detached.map_err(js_err("Failed to detach anchor"))?;
    revoked.map_err(js_err("Failed to revoke object URL"))
}
