//! Standalone HTML map pages
//!
//! Each result row with a full coordinate pair becomes a GeoJSON point; the
//! page draws them with Leaflet over OpenStreetMap tiles.

use chrono::Local;
use serde_json::{Map, Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::View;
use crate::Result;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{TITLE}}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
const data = {{DATA}};
const map = L.map('map').setView([data.center.lat, data.center.lon], 12);
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
  attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);
L.geoJSON(data.features, {
  pointToLayer: (feature, latlng) => L.circleMarker(latlng, { radius: 7, color: '#d0f', fillOpacity: 0.8 }),
  onEachFeature: (feature, layer) => {
    const popup = document.createElement('div');
    const heading = document.createElement('strong');
    heading.textContent = feature.properties.label;
    popup.appendChild(heading);
    for (const [field, value] of feature.properties.details) {
      const line = document.createElement('div');
      line.textContent = field + ': ' + value;
      popup.appendChild(line);
    }
    layer.bindPopup(popup);
  }
}).addTo(map);
</script>
</body>
</html>
"#;

/// GeoJSON feature collection plus map center for the placeable rows
#[must_use]
pub fn map_data(view: &View) -> Value {
    let mut features = Vec::new();
    let (mut lat_sum, mut lon_sum) = (0.0, 0.0);

    for row in &view.rows {
        let Some((lat, lon)) = row.position else {
            continue;
        };
        lat_sum += lat;
        lon_sum += lon;

        let details: Vec<Value> = view
            .detail_fields
            .iter()
            .zip(&row.details)
            .map(|(field, value)| json!([field, value]))
            .collect();

        let mut properties = Map::new();
        properties.insert("label".to_string(), json!(row.label));
        properties.insert("details".to_string(), Value::Array(details));

        features.push(json!({
            "type": "Feature",
            // GeoJSON order is longitude, latitude
            "geometry": { "type": "Point", "coordinates": [lon, lat] },
            "properties": properties,
        }));
    }

    let skipped = view.rows.len() - features.len();
    if skipped > 0 {
        debug!("{} rows lack a full coordinate pair and are left off the map", skipped);
    }

    let count = features.len().max(1) as f64;
    json!({
        "center": { "lat": lat_sum / count, "lon": lon_sum / count },
        "features": { "type": "FeatureCollection", "features": features },
    })
}

/// Full HTML page for a view
pub fn render_page(view: &View) -> Result<String> {
    let data = serde_json::to_string(&map_data(view))
        .map_err(|e| std::io::Error::other(format!("Failed to encode map data: {e}")))?
        // keep the payload from closing the script element
        .replace("</", "<\\/");

    Ok(TEMPLATE
        .replace("{{TITLE}}", &escape_html(&view.title))
        .replace("{{DATA}}", &data))
}

/// Write the page into `dir` and return its path
pub fn write_page(view: &View, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let file_name = format!(
        "{}-{}.html",
        slug(&view.title),
        Local::now().format("%Y%m%d-%H%M%S%3f")
    );
    let path = dir.join(file_name);
    fs::write(&path, render_page(view)?)?;
    info!("Wrote map with {} rows to {}", view.rows.len(), path.display());
    Ok(path)
}

fn slug(title: &str) -> String {
    let slug: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug.split('-').filter(|s| !s.is_empty()).collect::<Vec<_>>().join("-");
    if slug.is_empty() { "map".to_string() } else { slug }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::{PresentMode, ViewRow};
    use tempfile::tempdir;

    fn view() -> View {
        View {
            mode: PresentMode::Map,
            title: "Art <North Shore>".to_string(),
            label_field: "title",
            detail_fields: &["artist_name", "neighborhood"],
            rows: vec![
                ViewRow {
                    label: "Tribute To Children".to_string(),
                    details: vec!["Robert Berks".to_string(), "North Shore".to_string()],
                    position: Some((40.0, -80.0)),
                },
                ViewRow {
                    label: "Half Placed".to_string(),
                    details: vec!["</script>".to_string(), "North Shore".to_string()],
                    position: None,
                },
                ViewRow {
                    label: "Second".to_string(),
                    details: vec!["Someone".to_string(), "North Shore".to_string()],
                    position: Some((42.0, -78.0)),
                },
            ],
        }
    }

    #[test]
    fn test_map_data_features_and_center() {
        let data = map_data(&view());
        let features = data["features"]["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["geometry"]["coordinates"], json!([-80.0, 40.0]));
        assert_eq!(features[0]["properties"]["label"], "Tribute To Children");
        assert_eq!(
            features[0]["properties"]["details"][0],
            json!(["artist_name", "Robert Berks"])
        );
        assert_eq!(data["center"]["lat"], 41.0);
        assert_eq!(data["center"]["lon"], -79.0);
    }

    #[test]
    fn test_render_page_escapes() {
        let mut v = view();
        v.rows[1].position = Some((40.0, -80.0));
        let page = render_page(&v).unwrap();
        assert!(page.contains("<title>Art &lt;North Shore&gt;</title>"));
        assert!(!page.contains("\"</script>\""));
        assert!(page.contains("Tribute To Children"));
    }

    #[test]
    fn test_write_page() {
        let dir = tempdir().unwrap();
        let path = write_page(&view(), &dir.path().join("maps")).unwrap();
        assert!(path.exists());
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("art-north-shore-"));
    }

    #[test]
    fn test_slug_fallback() {
        assert_eq!(slug("!!!"), "map");
        assert_eq!(slug("Restaurants: $$"), "restaurants");
    }
}
