use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    auth::ApiRoute,
    ctx::BaseParams,
    extract::{Json, Path, Query, Valid},
};

use super::{handlers, CreateNote, SearchQuery, ShareNote, UpdateNote};

pub fn routes() -> Vec<ApiRoute> {
    vec![
        ApiRoute::authenticated("/notes", get(find_notes).post(create_note)),
        ApiRoute::authenticated("/notes/search", get(search_notes)),
        ApiRoute::authenticated("/notes/{note_id}", get(get_note).put(update_note).delete(delete_note)),
        ApiRoute::authenticated("/notes/{note_id}/share", post(share_note)),
    ]
}

async fn find_notes(base: BaseParams) -> impl IntoResponse {
    handlers::find_notes(base).await.map(Json)
}

async fn create_note(base: BaseParams, Valid(args): Valid<CreateNote>) -> impl IntoResponse {
    handlers::create_note(args, base)
        .await
        .map(|r| (StatusCode::CREATED, Json(r)))
}

async fn get_note(Path(note_id): Path<String>, base: BaseParams) -> impl IntoResponse {
    handlers::get_note(&note_id, base).await.map(Json)
}

async fn update_note(Path(note_id): Path<String>, base: BaseParams, Valid(args): Valid<UpdateNote>) -> impl IntoResponse {
    handlers::update_note(&note_id, args, base).await.map(Json)
}

async fn delete_note(Path(note_id): Path<String>, base: BaseParams) -> impl IntoResponse {
    handlers::delete_note(&note_id, base).await.map(Json)
}

async fn search_notes(Query(SearchQuery { q }): Query<SearchQuery>, base: BaseParams) -> impl IntoResponse {
    handlers::search_notes(q, base).await.map(Json)
}

async fn share_note(Path(note_id): Path<String>, base: BaseParams, Valid(args): Valid<ShareNote>) -> impl IntoResponse {
    handlers::share_note(&note_id, args, base).await.map(Json)
}

#[cfg(test)]
mod tests {
    use axum::http::{header::AUTHORIZATION, HeaderValue};
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{
        auth::{Access, Claims},
        db::init_test_db,
        errors::{ErrorResponse, Result},
        notes::{Acknowledgement, FindNotesResponse, GetNoteResponse, Note, NoteResponse},
        tests::{login_token, signup_user, test_server, test_tokens},
    };

    async fn create(server: &TestServer, token: &str, title: &str, description: &str) -> Note {
        server
            .post("/api/notes")
            .authorization_bearer(token)
            .json(&json!({ "title": title, "description": description }))
            .await
            .json::<NoteResponse>()
            .note
    }

    #[test]
    fn notes_routes_require_identity() {
        assert!(super::routes().iter().all(|route| route.access == Access::Authenticated));
    }

    #[tokio::test]
    async fn rejects_missing_or_invalid_tokens() -> Result<()> {
        let server = test_server(init_test_db().await?).await?;

        let response = server.get("/api/notes").await;
        assert_eq!(response.status_code(), 401);
        assert_eq!(response.json::<ErrorResponse>().error, "unauthorized");

        let response = server
            .get("/api/notes")
            .add_header(AUTHORIZATION, HeaderValue::from_static("Basic YTpi"))
            .await;
        assert_eq!(response.status_code(), 401);

        let response = server.get("/api/notes").authorization_bearer("not.a.token").await;
        assert_eq!(response.status_code(), 401);

        let now = jsonwebtoken::get_current_timestamp();
        let expired = test_tokens().sign(&Claims {
            email_id: "a@x.com".into(),
            iat: now - 120,
            exp: now - 60,
        })?;
        let response = server.get("/api/notes").authorization_bearer(expired).await;
        assert_eq!(response.status_code(), 401);
        Ok(())
    }

    #[tokio::test]
    async fn crud() -> Result<()> {
        let server = test_server(init_test_db().await?).await?;
        signup_user(&server, "a@x.com").await;
        let token = login_token(&server, "a@x.com").await;

        let response = server
            .post("/api/notes")
            .authorization_bearer(&token)
            .json(&json!({ "title": "T", "description": "D" }))
            .await;
        assert_eq!(response.status_code(), 201);
        let note = response.json::<NoteResponse>().note;
        assert_eq!(note.created_by, "a@x.com");
        assert_eq!(note.shared_by, "");

        let response = server.get("/api/notes").authorization_bearer(&token).await;
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.json::<FindNotesResponse>().all_notes, vec![note.clone()]);

        let path = format!("/api/notes/{}", note.id);
        let response = server.get(&path).authorization_bearer(&token).await;
        assert_eq!(response.json::<GetNoteResponse>().note, note);

        let response = server
            .put(&path)
            .authorization_bearer(&token)
            .json(&json!({ "title": "T2", "description": "D2" }))
            .await;
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.json::<NoteResponse>().note.title, "T2");

        let response = server.delete(&path).authorization_bearer(&token).await;
        assert_eq!(response.status_code(), 200);
        assert!(response.json::<Acknowledgement>().success);

        let response = server.get(&path).authorization_bearer(&token).await;
        assert_eq!(response.status_code(), 404);
        Ok(())
    }

    #[tokio::test]
    async fn body_validation() -> Result<()> {
        let server = test_server(init_test_db().await?).await?;
        signup_user(&server, "a@x.com").await;
        let token = login_token(&server, "a@x.com").await;

        let response = server
            .post("/api/notes")
            .authorization_bearer(&token)
            .json(&json!({ "title": "", "description": "D" }))
            .await;
        assert_eq!(response.status_code(), 400);

        let response = server
            .post("/api/notes")
            .authorization_bearer(&token)
            .json(&json!({ "title": "T" }))
            .await;
        assert_eq!(response.status_code(), 400);

        let response = server.get("/api/notes/not-an-id").authorization_bearer(&token).await;
        assert_eq!(response.status_code(), 400);
        assert_eq!(response.json::<ErrorResponse>().error, "validation");
        Ok(())
    }

    #[tokio::test]
    async fn ownership_is_enforced() -> Result<()> {
        let server = test_server(init_test_db().await?).await?;
        signup_user(&server, "a@x.com").await;
        signup_user(&server, "b@x.com").await;
        let alice = login_token(&server, "a@x.com").await;
        let bob = login_token(&server, "b@x.com").await;

        let note = create(&server, &alice, "T", "D").await;
        let path = format!("/api/notes/{}", note.id);

        let response = server.delete(&path).authorization_bearer(&bob).await;
        assert_eq!(response.status_code(), 403);
        assert_eq!(response.json::<ErrorResponse>().error, "forbidden");

        let response = server
            .put(&path)
            .authorization_bearer(&bob)
            .json(&json!({ "title": "X", "description": "Y" }))
            .await;
        assert_eq!(response.status_code(), 403);

        let response = server
            .post(&format!("{path}/share"))
            .authorization_bearer(&bob)
            .json(&json!({ "emailId": "b@x.com" }))
            .await;
        assert_eq!(response.status_code(), 403);

        // reads by id are not owner-scoped
        let response = server.get(&path).authorization_bearer(&bob).await;
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.json::<GetNoteResponse>().note, note);
        Ok(())
    }

    #[tokio::test]
    async fn search_and_share() -> Result<()> {
        let server = test_server(init_test_db().await?).await?;
        signup_user(&server, "a@x.com").await;
        signup_user(&server, "b@x.com").await;
        let alice = login_token(&server, "a@x.com").await;
        let bob = login_token(&server, "b@x.com").await;

        let note = create(&server, &alice, "Shopping List", "milk").await;
        create(&server, &alice, "Work", "standup").await;

        let response = server
            .get("/api/notes/search")
            .add_query_param("q", "shopping")
            .authorization_bearer(&alice)
            .await;
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.json::<FindNotesResponse>().all_notes, vec![note.clone()]);

        let response = server.get("/api/notes/search").authorization_bearer(&alice).await;
        assert_eq!(response.status_code(), 400);

        let response = server
            .get("/api/notes/search")
            .add_query_param("q", "shopping")
            .authorization_bearer(&bob)
            .await;
        assert!(response.json::<FindNotesResponse>().all_notes.is_empty());

        let response = server
            .post(&format!("/api/notes/{}/share", note.id))
            .authorization_bearer(&alice)
            .json(&json!({ "emailId": "b@x.com" }))
            .await;
        assert_eq!(response.status_code(), 200);
        assert!(response.json::<Acknowledgement>().success);

        let response = server.get("/api/notes").authorization_bearer(&bob).await;
        let shared = response.json::<FindNotesResponse>().all_notes;
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].created_by, "b@x.com");
        assert_eq!(shared[0].shared_by, "a@x.com");
        assert_eq!(shared[0].title, "Shopping List");

        let response = server
            .post(&format!("/api/notes/{}/share", note.id))
            .authorization_bearer(&alice)
            .json(&json!({ "emailId": "nobody@x.com" }))
            .await;
        assert_eq!(response.status_code(), 404);
        Ok(())
    }
}
