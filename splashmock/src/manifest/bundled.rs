use super::model::Manifest;

/// Name of the bundled example manifest.
///
/// Icon selection matches on this exact string to show a placeholder instead of the
/// example's icons, whose files do not ship with the tool. Renaming the example
/// silently disables that fallback.
pub const BUNDLED_EXAMPLE_NAME: &str = "Lumen Prayer Bank";

/// Text a fresh preview session starts with.
pub const BUNDLED_EXAMPLE_JSON: &str = r##"{
    "name": "Lumen Prayer Bank",
    "short_name": "Prayer Bank",
    "description": "A prayer bank for the Lumen 2026 conference",
    "start_url": "/",
    "icons": [
        {
            "src": "/web-app-manifest-192x192.png",
            "sizes": "192x192",
            "type": "image/png",
            "purpose": "maskable"
        },
        {
            "src": "/web-app-manifest-512x512.png",
            "sizes": "512x512",
            "type": "image/png",
            "purpose": "maskable"
        }
    ],
    "theme_color": "#0C1427",
    "background_color": "#0C1427",
    "display": "standalone"
}"##;

impl Manifest {
    /// The bundled example, parsed.
    pub fn bundled_example() -> Self {
        Self::from_json_str(BUNDLED_EXAMPLE_JSON).unwrap_or_default()
    }

    /// Whether this manifest carries the bundled example's name.
    pub fn is_bundled_example(&self) -> bool {
        self.name.as_deref() == Some(BUNDLED_EXAMPLE_NAME)
    }
}
