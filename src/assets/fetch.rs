//! Browser texture fetch.

use image::RgbaImage;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::{
    channel_path, decode_image, TextureChannel, TextureLoadError,
    TextureLoadErrorKind, TextureSet, TextureSetError,
};

fn js_err(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{e:?}"))
}

/// Fetch all six maps below `root_url`.
///
/// All requests are issued before the first one is awaited, so the
/// downloads overlap; the function resolves once every request settled.
///
/// # Errors
///
/// Returns [`TextureSetError`] naming every map that failed to download or
/// decode.
pub async fn fetch_texture_set(
    root_url: &str,
) -> Result<TextureSet, TextureSetError> {
    let window = web_sys::window();
    let pending: Vec<_> = TextureChannel::ALL
        .into_iter()
        .map(|channel| {
            let url = channel_path(root_url, channel);
            let request = window
                .as_ref()
                .map(|w| JsFuture::from(w.fetch_with_str(&url)));
            (channel, url, request)
        })
        .collect();

    let mut results = Vec::with_capacity(pending.len());
    for (channel, url, request) in pending {
        let result = match request {
            Some(request) => fetch_one(channel, &url, request).await,
            None => Err(TextureLoadError {
                channel,
                source_path: url,
                kind: TextureLoadErrorKind::Fetch("no window".into()),
            }),
        };
        results.push((channel, result));
    }
    TextureSet::assemble(results)
}

async fn fetch_one(
    channel: TextureChannel,
    url: &str,
    request: JsFuture,
) -> Result<RgbaImage, TextureLoadError> {
    let error = |kind| TextureLoadError {
        channel,
        source_path: url.to_owned(),
        kind,
    };
    let fetch_err = |msg: String| error(TextureLoadErrorKind::Fetch(msg));

    let resp_val = request.await.map_err(|e| fetch_err(js_err(&e)))?;
    let resp: web_sys::Response =
        resp_val.dyn_into().map_err(|e| fetch_err(js_err(&e)))?;
    if !resp.ok() {
        return Err(fetch_err(format!(
            "HTTP {} {}",
            resp.status(),
            resp.status_text()
        )));
    }

    let buf_promise = resp.array_buffer().map_err(|e| fetch_err(js_err(&e)))?;
    let buf_val = JsFuture::from(buf_promise)
        .await
        .map_err(|e| fetch_err(js_err(&e)))?;
    let bytes = js_sys::Uint8Array::new(&buf_val).to_vec();
    decode_image(&bytes).map_err(|e| error(TextureLoadErrorKind::Decode(e)))
}
