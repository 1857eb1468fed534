// Route catalogues: the built-in list and JSON catalogue files

use routeprobe_scanner::{RouteDescriptor, RouteType};
use std::fs;
use std::path::Path;

/// The built-in catalogue, in check order.
pub fn default_catalogue() -> Vec<RouteDescriptor> {
    vec![
        // HTML pages served with ISR caching
        RouteDescriptor::new("/", RouteType::Html, "Home page"),
        RouteDescriptor::new("/contact", RouteType::Html, "Contact page"),
        RouteDescriptor::new("/diensten", RouteType::Html, "Services page"),
        RouteDescriptor::new("/over-ons", RouteType::Html, "About page"),
        // API routes, expected to be uncached
        RouteDescriptor::new("/api/contact", RouteType::Api, "Contact form API"),
        // Static assets, expected to be long-lived and immutable
        RouteDescriptor::new(
            "/assets/hero_portal_background.png",
            RouteType::Static,
            "Static asset",
        ),
        RouteDescriptor::new("/logo-proweb-icon.svg", RouteType::Static, "Logo SVG"),
        RouteDescriptor::new(
            "/_next/image?url=%2Fassets%2Fhero_portal_background.png&w=1920&q=75",
            RouteType::Image,
            "Next.js optimized image",
        ),
        RouteDescriptor::new(
            "/_next/static/chunks/main.js",
            RouteType::NextjsStatic,
            "Next.js chunk",
        ),
        RouteDescriptor::new("/manifest.json", RouteType::Pwa, "PWA manifest"),
        RouteDescriptor::new("/sw.js", RouteType::Pwa, "Service Worker"),
    ]
}

/// Load a catalogue from a JSON file holding an array of route descriptors.
pub fn load_catalogue(path: &Path) -> Result<Vec<RouteDescriptor>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read catalogue {}: {}", path.display(), e))?;

    let routes: Vec<RouteDescriptor> = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse catalogue {}: {}", path.display(), e))?;

    if routes.is_empty() {
        return Err(format!("Catalogue {} contains no routes", path.display()));
    }

    Ok(routes)
}
