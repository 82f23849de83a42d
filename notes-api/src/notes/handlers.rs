use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::{ctx::BaseParams, Error, Result};

use super::{Acknowledgement, CreateNote, FindNotesResponse, GetNoteResponse, Note, NoteResponse, ShareNote, UpdateNote};

const NOTE_COLUMNS: &str = "id, title, description, created_by, shared_by, created_at";

impl<'a> TryFrom<&Row<'a>> for Note {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'a>) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            created_by: row.get(3)?,
            shared_by: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

fn parse_note_id(note_id: &str) -> Result<Uuid> {
    Uuid::parse_str(note_id).map_err(|_| Error::validation("Invalid note id format"))
}

fn now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn select_note(conn: &Connection, note_id: Uuid) -> Result<Note> {
    conn.query_row(
        &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?"),
        params![note_id],
        |row| Note::try_from(row),
    )
    .optional()?
    .ok_or_else(|| Error::NotFound("Note not found!".into()))
}

/// Loads the note and fails unless `owner` created it.
fn select_owned_note(conn: &Connection, note_id: Uuid, owner: &str, action: &str) -> Result<Note> {
    let note = select_note(conn, note_id)?;
    if note.created_by != owner {
        return Err(Error::Forbidden(format!(
            "You cannot {action} this note as it is not created by you!"
        )));
    }
    Ok(note)
}

fn insert_note(conn: &Connection, title: &str, description: &str, created_by: &str, shared_by: &str) -> Result<Option<Note>> {
    let note = conn
        .query_row(
            &format!(
                "INSERT INTO notes (title, description, created_by, shared_by, created_at) VALUES (?, ?, ?, ?, ?)
                RETURNING {NOTE_COLUMNS}"
            ),
            params![title, description, created_by, shared_by, now()],
            |row| Note::try_from(row),
        )
        .optional()?;
    Ok(note)
}

pub async fn find_notes(BaseParams { db, ctx }: BaseParams) -> Result<FindNotesResponse> {
    let owner = ctx.user()?.email_id.clone();

    let notes = db
        .call(move |conn| {
            let notes = conn
                .prepare(&format!(
                    "SELECT {NOTE_COLUMNS} FROM notes WHERE created_by = ? ORDER BY created_at, rowid"
                ))?
                .query_map(params![owner], |row| Note::try_from(row))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(notes)
        })
        .await
        .map_err(Error::from)?;

    Ok(FindNotesResponse {
        success: true,
        all_notes: notes,
    })
}

/// Any authenticated caller may read any note by id.
pub async fn get_note(note_id: &str, BaseParams { db, .. }: BaseParams) -> Result<GetNoteResponse> {
    let note_id = parse_note_id(note_id)?;

    let note = db
        .call(move |conn| Ok(select_note(conn, note_id)?))
        .await
        .map_err(Error::from)?;

    Ok(GetNoteResponse { success: true, note })
}

pub async fn create_note(CreateNote { title, description }: CreateNote, BaseParams { db, ctx }: BaseParams) -> Result<NoteResponse> {
    let owner = ctx.user()?.email_id.clone();

    let note = db
        .call(move |conn| {
            let note = insert_note(conn, &title, &description, &owner, "")?
                .ok_or_else(|| Error::Unexpected("note insert returned no row".into()))?;
            Ok(note)
        })
        .await
        .map_err(Error::from)?;

    Ok(NoteResponse {
        success: true,
        message: "Note created successfully!".into(),
        note,
    })
}

pub async fn update_note(
    note_id: &str,
    UpdateNote { title, description }: UpdateNote,
    BaseParams { db, ctx }: BaseParams,
) -> Result<NoteResponse> {
    let note_id = parse_note_id(note_id)?;
    let owner = ctx.user()?.email_id.clone();

    let note = db
        .call(move |conn| {
            select_owned_note(conn, note_id, &owner, "update")?;

            let note = conn
                .query_row(
                    &format!("UPDATE notes SET title = ?, description = ? WHERE id = ? RETURNING {NOTE_COLUMNS}"),
                    params![title, description, note_id],
                    |row| Note::try_from(row),
                )
                .optional()?
                .ok_or_else(|| Error::Unexpected("Unable to update note, please try again!".into()))?;
            Ok(note)
        })
        .await
        .map_err(Error::from)?;

    Ok(NoteResponse {
        success: true,
        message: "Note updated successfully!".into(),
        note,
    })
}

pub async fn delete_note(note_id: &str, BaseParams { db, ctx }: BaseParams) -> Result<Acknowledgement> {
    let note_id = parse_note_id(note_id)?;
    let owner = ctx.user()?.email_id.clone();

    db.call(move |conn| {
        select_owned_note(conn, note_id, &owner, "delete")?;

        let deleted = conn.execute("DELETE FROM notes WHERE id = ?", params![note_id])?;
        if deleted == 0 {
            return Err(Error::Unexpected("Unable to delete, please try again!".into()).into());
        }
        Ok(())
    })
    .await
    .map_err(Error::from)?;

    tracing::info!("note {note_id} deleted");

    Ok(Acknowledgement::new("Note deleted successfully!"))
}

pub async fn search_notes(query: Option<String>, BaseParams { db, ctx }: BaseParams) -> Result<FindNotesResponse> {
    let query = query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| Error::validation("Please specify the proper query"))?;
    let owner = ctx.user()?.email_id.clone();

    let notes = db
        .call(move |conn| {
            let notes = conn
                .prepare(&format!(
                    r#"SELECT {NOTE_COLUMNS} FROM notes
                    WHERE created_by = ?1 AND (contains_ci(title, ?2) OR contains_ci(description, ?2))
                    ORDER BY created_at, rowid"#
                ))?
                .query_map(params![owner, query], |row| Note::try_from(row))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(notes)
        })
        .await
        .map_err(Error::from)?;

    Ok(FindNotesResponse {
        success: true,
        all_notes: notes,
    })
}

/// Copies the note to the recipient; the source note is left untouched.
pub async fn share_note(note_id: &str, ShareNote { email_id }: ShareNote, BaseParams { db, ctx }: BaseParams) -> Result<Acknowledgement> {
    let note_id = parse_note_id(note_id)?;
    let owner = ctx.user()?.email_id.clone();

    let copy = db
        .call(move |conn| {
            let note = select_owned_note(conn, note_id, &owner, "share")?;

            let registered: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE email_id = ?)",
                params![email_id],
                |r| r.get(0),
            )?;
            if !registered {
                return Err(Error::NotFound("The User you want to share note is not registered with us!".into()).into());
            }

            let copy = insert_note(conn, &note.title, &note.description, &email_id, &owner)?
                .ok_or_else(|| Error::Unexpected("shared note copy was not persisted".into()))?;
            Ok(copy)
        })
        .await
        .map_err(Error::from)?;

    tracing::info!("note {note_id} shared by {} to {} as {}", copy.shared_by, copy.created_by, copy.id);

    Ok(Acknowledgement::new("Note shared successfully!"))
}
