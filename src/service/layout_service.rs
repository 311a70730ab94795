use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::widget::{Layout, WidgetSize, WidgetType};

pub const DEFAULT_LAYOUT: &str = "default";
pub const GRID_GAP: &str = "16px";
pub const GRID_MARGIN: &str = "16px";

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid layout name {0:?}")]
    InvalidName(String),
    #[error("unable to load layout {name} ({path}): {source}")]
    Io {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to decode layout {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid size {size} for {widget_type} widget {widget_id}")]
    InvalidSize {
        widget_id: String,
        widget_type: WidgetType,
        size: WidgetSize,
    },
    #[error("data check failed for widget {0}")]
    DataCheck(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedWidget {
    pub irow: i64,
    pub lrow: u32,
    pub icol: i64,
    pub lcol: u32,
    pub widget_id: String,
    pub show_update_btn: bool,
    pub query: String,
    pub wgtype: WidgetType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedLayout {
    pub name: String,
    pub rows: u32,
    pub cols: u32,
    pub gap: String,
    pub margin: String,
    pub widgets: Vec<RenderedWidget>,
}

pub fn layout_path(dir: &Path, name: &str) -> Result<PathBuf, LayoutError> {
    // Names map straight onto file names, so keep them to a single path segment.
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(LayoutError::InvalidName(name.to_string()));
    }
    Ok(dir.join(format!("{}.json", name)))
}

pub fn load_layout(dir: &Path, name: Option<&str>) -> Result<Layout, LayoutError> {
    let name = name.filter(|name| !name.is_empty()).unwrap_or(DEFAULT_LAYOUT);
    let path = layout_path(dir, name)?;
    let content = fs::read_to_string(&path).map_err(|source| LayoutError::Io {
        name: name.to_string(),
        path: path.clone(),
        source,
    })?;
    let mut layout: Layout =
        serde_json::from_str(&content).map_err(|source| LayoutError::Decode {
            name: name.to_string(),
            source,
        })?;
    if layout.name.is_empty() {
        layout.name = name.to_string();
    }
    Ok(layout)
}

pub fn render_layout(layout: &Layout) -> Result<RenderedLayout, LayoutError> {
    let widgets = layout
        .widgets
        .iter()
        .map(|widget| {
            if !widget.widget_type.supports(widget.size) {
                return Err(LayoutError::InvalidSize {
                    widget_id: widget.id(),
                    widget_type: widget.widget_type,
                    size: widget.size,
                });
            }
            if !widget.data_check() {
                return Err(LayoutError::DataCheck(widget.id()));
            }
            let (lrow, lcol) = widget.size.span();
            Ok(RenderedWidget {
                irow: widget.row,
                lrow,
                icol: widget.col,
                lcol,
                widget_id: widget.id(),
                show_update_btn: widget.widget_type.shows_update_button(),
                query: widget.query(),
                wgtype: widget.widget_type,
            })
        })
        .collect::<Result<Vec<_>, LayoutError>>()?;

    Ok(RenderedLayout {
        name: layout.name.clone(),
        rows: layout.rows,
        cols: layout.cols,
        gap: GRID_GAP.to_string(),
        margin: GRID_MARGIN.to_string(),
        widgets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn temp_layouts_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("screensaver_layouts_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_layout() -> serde_json::Value {
        json!({
            "rows": 4,
            "cols": 4,
            "widgets": [
                { "type": "clock", "size": "middleh", "row": 1, "col": 1 },
                { "type": "notioncalendar", "size": "longv", "row": 1, "col": 4 },
                {
                    "type": "weatherforecast", "size": "middlev", "row": 2, "col": 1,
                    "data": { "location_name": "Tokyo", "location_latitude": 35.68, "location_longitude": 139.76 }
                }
            ]
        })
    }

    #[test]
    fn default_layout_is_loaded_when_no_name_given() {
        let dir = temp_layouts_dir();
        fs::write(dir.join("default.json"), sample_layout().to_string()).unwrap();

        let layout = load_layout(&dir, None).unwrap();
        assert_eq!(layout.name, "default");
        assert_eq!(layout.widgets.len(), 3);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn rendered_widgets_carry_grid_spans() {
        let layout: Layout = serde_json::from_value(sample_layout()).unwrap();
        let rendered = render_layout(&layout).unwrap();
        assert_eq!(rendered.gap, "16px");

        let clock = &rendered.widgets[0];
        assert_eq!((clock.lrow, clock.lcol), (1, 2));
        assert!(!clock.show_update_btn);
        assert_eq!(clock.query, "size=middleh");

        let calendar = &rendered.widgets[1];
        assert_eq!((calendar.lrow, calendar.lcol), (4, 1));
        assert_eq!(calendar.widget_id, "wg-notioncalendar-r1-c4");
        assert!(calendar.show_update_btn);
    }

    #[test]
    fn unsupported_size_is_rejected() {
        let layout: Layout = serde_json::from_value(json!({
            "rows": 1, "cols": 1,
            "widgets": [{ "type": "clock", "size": "small", "row": 1, "col": 1 }]
        }))
        .unwrap();
        assert!(matches!(
            render_layout(&layout),
            Err(LayoutError::InvalidSize { .. })
        ));
    }

    #[test]
    fn path_traversal_names_are_rejected() {
        let dir = temp_layouts_dir();
        assert!(matches!(
            load_layout(&dir, Some("../secrets")),
            Err(LayoutError::InvalidName(_))
        ));
        assert!(matches!(
            load_layout(&dir, Some("missing")),
            Err(LayoutError::Io { .. })
        ));
        let _ = fs::remove_dir_all(dir);
    }
}
