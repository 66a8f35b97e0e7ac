//! Reading a picked image file into an embedded payload.

use hr_animations::media::encode_data_url;
use js_sys::Uint8Array;
use wasm_bindgen_futures::JsFuture;
use web_sys::File;

/// Read `file` and encode it as a `data:` URL.
///
/// Files the browser does not label as images are rejected.
pub async fn read_image_file(file: File) -> Result<String, String> {
    let mime = file.type_();
    if !mime.starts_with("image/") {
        return Err(format!("{} is not an image ({})", file.name(), mime));
    }
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read {}: {:?}", file.name(), e))?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(encode_data_url(&mime, &bytes))
}
