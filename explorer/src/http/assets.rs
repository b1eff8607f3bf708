// SPDX-License-Identifier: AGPL-3.0-or-later

/// Returns content type and content of a bundled asset.
pub fn asset(name: &str) -> Option<(&'static str, &'static str)> {
    let asset = match name {
        "explorer.css" => ("text/css", include_str!("../../assets/explorer.css")),
        "darktheme.css" => ("text/css", include_str!("../../assets/darktheme.css")),
        "explorer.js" => (
            "application/javascript",
            include_str!("../../assets/explorer.js"),
        ),
        "logo.svg" => ("image/svg+xml", include_str!("../../assets/logo.svg")),
        "logo-white.svg" => ("image/svg+xml", include_str!("../../assets/logo-white.svg")),
        _ => return None,
    };

    Some(asset)
}
