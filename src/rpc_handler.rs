//! RPC method handler for the Linkvault JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! This is the view-layer boundary: it trims and validates user input, then
//! calls engine commands and queries through the `App` struct.

use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::warn;

use crate::app::App;
use crate::managers::bookmark_manager::BookmarkManagerTrait;
use crate::types::bookmark::NewBookmark;
use crate::types::category::{NewCategory, PRESET_COLORS};

/// Required string parameter, trimmed; blank counts as missing.
fn required_str(params: &Value, key: &str) -> Result<String, String> {
    optional_str(params, key).ok_or_else(|| format!("missing {}", key))
}

/// Optional string parameter, trimmed; blank becomes `None`.
fn optional_str(params: &Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn bookmark_input(params: &Value) -> Result<NewBookmark, String> {
    Ok(NewBookmark {
        title: required_str(params, "title")?,
        url: required_str(params, "url")?,
        description: optional_str(params, "description"),
        category_id: optional_str(params, "categoryId"),
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Saves the snapshot after a mutation. Storage failures are logged, not returned.
fn persist(app: &App) {
    if let Err(e) = app.persist() {
        warn!(error = %e, "failed to persist local snapshot");
    }
}

fn visible_json(app: &App) -> Result<Value, String> {
    let m = &app.bookmarks;
    Ok(json!({
        "items": to_json(&m.visible_bookmarks())?,
        "searchQuery": m.search_query(),
        "selectedCategory": m.selected_category(),
        "hasActiveFilter": m.has_active_filter(),
    }))
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Bookmarks ───
        "bookmark.add" => {
            let input = bookmark_input(params)?;
            let mut a = app.lock().await;
            let bookmark = a.bookmarks.add_bookmark(input).await;
            persist(&a);
            to_json(&bookmark)
        }
        "bookmark.save" => {
            let id = required_str(params, "id")?;
            let updates = bookmark_input(params)?;
            let mut a = app.lock().await;
            a.bookmarks.save_bookmark(&id, updates).await;
            persist(&a);
            Ok(json!({"ok": true, "bookmark": to_json(&a.bookmarks.find_bookmark(&id))?}))
        }
        "bookmark.delete" => {
            let id = required_str(params, "id")?;
            let mut a = app.lock().await;
            a.bookmarks.delete_bookmark(&id).await;
            persist(&a);
            Ok(json!({"ok": true}))
        }
        "bookmark.list" => {
            let a = app.lock().await;
            Ok(json!({"items": to_json(&a.bookmarks.bookmarks())?}))
        }
        "bookmark.visible" => {
            let a = app.lock().await;
            visible_json(&a)
        }

        // ─── Categories ───
        "category.add" => {
            let name = required_str(params, "name")?;
            let color = optional_str(params, "color").unwrap_or_else(|| PRESET_COLORS[0].to_string());
            let mut a = app.lock().await;
            let category = a.bookmarks.add_category(NewCategory::new(name, color)).await;
            persist(&a);
            to_json(&category)
        }
        "category.delete" => {
            let id = required_str(params, "id")?;
            let mut a = app.lock().await;
            a.bookmarks.delete_category(&id).await;
            persist(&a);
            Ok(json!({"ok": true, "selectedCategory": a.bookmarks.selected_category()}))
        }
        "category.list" => {
            let a = app.lock().await;
            Ok(json!({"items": to_json(&a.bookmarks.categories())?}))
        }

        // ─── Filter ───
        "filter.set" => {
            let mut a = app.lock().await;
            if let Some(search) = params.get("search") {
                let query = search.as_str().ok_or("search must be a string")?;
                a.bookmarks.set_search_query(query);
            }
            if let Some(category) = params.get("categoryId") {
                let selected = match category {
                    Value::Null => None,
                    Value::String(s) if s.trim().is_empty() => None,
                    Value::String(s) => Some(s.trim().to_string()),
                    _ => return Err("categoryId must be a string or null".to_string()),
                };
                a.bookmarks.select_category(selected);
            }
            persist(&a);
            visible_json(&a)
        }

        // ─── Remote ───
        "sync.pull" => {
            let mut a = app.lock().await;
            let synced = a.bookmarks.sync_from_remote().await;
            if synced {
                persist(&a);
            }
            Ok(json!({"synced": synced}))
        }
        "link.suggest_title" => {
            let url = required_str(params, "url")?;
            let a = app.lock().await;
            let title = a.bookmarks.suggest_title(&url).await;
            Ok(json!({"title": title}))
        }
        "link.favicon" => {
            let url = required_str(params, "url")?;
            let a = app.lock().await;
            let favicon = a.bookmarks.fetch_favicon(&url).await;
            Ok(json!({"favicon": favicon}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
