use crate::error::{Result, StatusPageError};
use rust_embed::Embed;

/// Page assets shipped with the binary and uploaded to the pages branch by
/// `create` and `upgrade`.
#[derive(Embed)]
#[folder = "template/"]
pub struct Assets;

/// Uploaded in this order.
pub const ASSET_FILES: &[&str] = &[
    "template.html",
    "style.css",
    "statuspage.js",
    "translations.ini",
];

impl Assets {
    pub fn text(name: &str) -> Result<String> {
        let file =
            <Assets as Embed>::get(name).ok_or_else(|| StatusPageError::UnknownAsset(name.to_string()))?;
        Ok(String::from_utf8(file.data.into_owned())?)
    }
}
