//! Save generated text as a file through a temporary object URL.

/// Offer `body` to the user as a download named `filename`.
///
/// # Errors
///
/// Returns a description of the failing browser call. Always fails outside
/// the browser.
pub fn save_text(filename: &str, mime_type: &str, body: &str) -> Result<(), String> {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| "no document".to_owned())?;

        let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(body));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime_type);
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
            .map_err(|e| format!("blob: {e:?}"))?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("object url: {e:?}"))?;

        let anchor = document
            .create_element("a")
            .map_err(|e| format!("anchor: {e:?}"))?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "anchor element has the wrong type".to_owned())?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();

        let _ = web_sys::Url::revoke_object_url(&url);
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (filename, mime_type, body);
        Err("downloads need a browser".to_owned())
    }
}
