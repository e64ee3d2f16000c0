use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

pub const DEFAULT_DOWNLOAD_NAME: &str = "ai-generated-background.png";
pub const DOWNLOAD_SUFFIX: &str = "_background_changed.png";

/// `photo.jpg` -> `photo_background_changed.png`; only the last extension is
/// dropped.
pub fn download_filename(original: Option<&str>) -> String {
    let Some(name) = original.map(str::trim).filter(|n| !n.is_empty()) else {
        return DEFAULT_DOWNLOAD_NAME.to_string();
    };
    let stem = match name.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => name,
    };
    format!("{stem}{DOWNLOAD_SUFFIX}")
}

/// Clicks a temporary `<a download>` pointing at `href`.
pub fn trigger_download(href: &str, filename: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document")?;
    let body = document.body().ok_or("No body")?;

    let link: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "create_element a failed")?
        .dyn_into()
        .map_err(|_| "dyn_into HtmlAnchorElement failed")?;
    link.set_href(href);
    link.set_download(filename);

    body.append_child(&link)
        .map_err(|_| "append link failed")?;
    link.click();
    body.remove_child(&link)
        .map_err(|_| "remove link failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_last_extension() {
        assert_eq!(download_filename(Some("photo.jpg")), "photo_background_changed.png");
        assert_eq!(
            download_filename(Some("my.holiday.photo.webp")),
            "my.holiday.photo_background_changed.png"
        );
    }

    #[test]
    fn names_without_extension_are_kept() {
        assert_eq!(download_filename(Some("selfie")), "selfie_background_changed.png");
        assert_eq!(download_filename(Some(".hidden")), ".hidden_background_changed.png");
    }

    #[test]
    fn unknown_name_uses_default() {
        assert_eq!(download_filename(None), DEFAULT_DOWNLOAD_NAME);
        assert_eq!(download_filename(Some("  ")), DEFAULT_DOWNLOAD_NAME);
    }
}
