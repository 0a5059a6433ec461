/// Diary API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use keepsake_core::{
    CreateDiaryEntry, DiaryEntry, DiaryEntryId, DiaryMedia, DiaryQuery, UpdateDiaryEntry,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Keyword over title, content text and tags
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MediaQuery {
    pub name: String,
}

impl SearchQuery {
    fn into_query(self) -> Option<DiaryQuery> {
        let keyword = self.q.filter(|q| !q.trim().is_empty());
        let tag = self.tag.filter(|t| !t.trim().is_empty());
        if keyword.is_none() && tag.is_none() {
            return None;
        }
        Some(DiaryQuery { keyword, tag })
    }
}

/// GET /api/diary?q=&tag=
pub async fn list_entries(
    State(app_state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<DiaryEntry>>> {
    let entries = match query.into_query() {
        Some(query) => app_state.diary.search_entries(&query).await?,
        None => app_state.diary.list_entries().await?,
    };
    Ok(Json(entries))
}

/// POST /api/diary
pub async fn create_entry(
    State(app_state): State<AppState>,
    Json(req): Json<CreateDiaryEntry>,
) -> Result<(StatusCode, Json<DiaryEntry>)> {
    let entry = app_state.diary.create_entry(req).await?;
    tracing::info!(entry = %entry.id, "Created diary entry");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/diary/tags
pub async fn list_tags(State(app_state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(app_state.diary.list_tags().await?))
}

/// GET /api/diary/:id
pub async fn get_entry(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DiaryEntry>> {
    let id = DiaryEntryId::new(id);
    app_state
        .diary
        .get_entry(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("Diary entry {id}")))
}

/// PUT /api/diary/:id
pub async fn update_entry(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateDiaryEntry>,
) -> Result<Json<DiaryEntry>> {
    let id = DiaryEntryId::new(id);
    Ok(Json(app_state.diary.update_entry(&id, req).await?))
}

/// DELETE /api/diary/:id
pub async fn delete_entry(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = DiaryEntryId::new(id);
    if !app_state.diary.delete_entry(&id).await? {
        return Err(ServerError::NotFound(format!("Diary entry {id}")));
    }
    tracing::info!(entry = %id, "Deleted diary entry");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/diary/media?name= - body is the file, typed by `Content-Type`
pub async fn upload_media(
    State(app_state): State<AppState>,
    Query(query): Query<MediaQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<DiaryMedia>)> {
    if body.is_empty() {
        return Err(ServerError::BadRequest("Empty upload".to_string()));
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.starts_with("application/octet-stream"));

    let media = app_state
        .media
        .upload_diary_media(&query.name, content_type, body.to_vec())
        .await?;
    Ok((StatusCode::CREATED, Json(media)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_search_lists_everything() {
        assert_eq!(SearchQuery::default().into_query(), None);
        let query = SearchQuery {
            q: Some("  ".to_string()),
            tag: Some(String::new()),
        };
        assert_eq!(query.into_query(), None);
    }

    #[test]
    fn test_search_combines_keyword_and_tag() {
        let query = SearchQuery {
            q: Some("beach".to_string()),
            tag: Some("summer".to_string()),
        };
        assert_eq!(
            query.into_query(),
            Some(DiaryQuery {
                keyword: Some("beach".to_string()),
                tag: Some("summer".to_string()),
            })
        );
    }
}
