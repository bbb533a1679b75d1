use contracts::usecases::u501_import_transactions_csv::ImportRequest;
use futures::Stream;
use gloo_net::http::Request;
use js_sys::{Reflect, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, ReadableStream, ReadableStreamDefaultReader};

use super::error::ImportStreamError;
use super::line_reader::ndjson_lines;
use crate::shared::api_utils::api_url;

/// Upload `file` and return the response body as a stream of NDJSON lines.
///
/// Fails before streaming on request, network, HTTP status or missing-body errors.
pub async fn stream_import(
    request: &ImportRequest,
    file: &File,
    access_token: Option<String>,
) -> Result<impl Stream<Item = Result<String, ImportStreamError>>, ImportStreamError> {
    let form = FormData::new().map_err(|e| ImportStreamError::Request(format!("{:?}", e)))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| ImportStreamError::Request(format!("{:?}", e)))?;

    let url = api_url(&request.path());
    log::debug!("POST {} ({} bytes)", url, file.size());

    // Content-Type is left to the browser so it can add the multipart boundary
    let mut builder = Request::post(&url);
    if let Some(token) = access_token {
        builder = builder.header("Authorization", &format!("Bearer {}", token));
    }

    let response = builder
        .body(form)
        .map_err(|e| ImportStreamError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ImportStreamError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ImportStreamError::HttpStatus {
            status: response.status(),
            status_text: response.status_text(),
        });
    }

    let body = response.body().ok_or(ImportStreamError::MissingBody)?;
    Ok(ndjson_lines(body_chunks(body)))
}

/// Adapt a browser `ReadableStream` into a stream of byte chunks
fn body_chunks(body: ReadableStream) -> impl Stream<Item = Result<Vec<u8>, ImportStreamError>> {
    let reader: ReadableStreamDefaultReader = body.get_reader().unchecked_into();

    async_stream::stream! {
        loop {
            let chunk = match JsFuture::from(reader.read()).await {
                Ok(chunk) => chunk,
                Err(e) => {
                    yield Err(ImportStreamError::Read(format!("{:?}", e)));
                    break;
                }
            };

            let done = Reflect::get(&chunk, &JsValue::from_str("done"))
                .ok()
                .and_then(|v| v.as_bool())
                .unwrap_or(true);
            if done {
                break;
            }

            match Reflect::get(&chunk, &JsValue::from_str("value")) {
                Ok(value) if value.is_instance_of::<Uint8Array>() => {
                    yield Ok(Uint8Array::new(&value).to_vec());
                }
                Ok(other) => {
                    yield Err(ImportStreamError::Read(format!("unexpected chunk {:?}", other)));
                    break;
                }
                Err(e) => {
                    yield Err(ImportStreamError::Read(format!("{:?}", e)));
                    break;
                }
            }
        }
        let _ = reader.release_lock();
    }
}
