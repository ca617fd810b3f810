use crate::numerology::{calculate, NumerologyResult};
use crate::validation::{describe, UserForm};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use tracing::{debug, info, warn};

/// Body of `POST /saveUser`.
///
/// Every key is optional on the wire; a missing key is stored as NULL.
/// `mob` may arrive as a JSON number and is stored as its text. Any other
/// key of the wrong JSON type fails deserialization, which the server
/// reports as a save failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveUserRequest {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub mob: Option<String>,
    pub name_number: Option<i64>,
    pub dob_number: Option<i64>,
    pub moolank: Option<i64>,
    pub bhagyank: Option<i64>,
    pub destiny: Option<i64>,
}

impl SaveUserRequest {
    /// Wire body for a form and its computed numbers
    pub fn from_calculation(form: &UserForm, result: &NumerologyResult) -> Self {
        SaveUserRequest {
            first_name: Some(form.first_name.clone()),
            middle_name: Some(form.middle_name.clone()),
            last_name: Some(form.last_name.clone()),
            dob: Some(form.dob.clone()),
            gender: Some(form.gender.clone()),
            mob: Some(form.mob.clone()),
            name_number: Some(result.name_number as i64),
            dob_number: Some(result.dob_number as i64),
            moolank: Some(result.moolank as i64),
            bhagyank: Some(result.bhagyank as i64),
            destiny: Some(result.destiny as i64),
        }
    }
}

/// Phone numbers typed into a number input come over as JSON numbers
fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

/// A saved user. Created once per save, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Store-assigned identity (UUID v4)
    pub id: String,

    /// When the record was written
    pub created_at: DateTime<Utc>,

    #[serde(flatten)]
    pub fields: SaveUserRequest,
}

impl UserRecord {
    pub fn new(fields: SaveUserRequest) -> Self {
        UserRecord {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            fields,
        }
    }
}

/// Event for audit trail
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Event {
    pub event_id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub entity_type: String,
    pub entity_id: String,
    pub data: serde_json::Value,
    pub actor: String,
}

impl Event {
    pub fn new(
        event_type: &str,
        entity_type: &str,
        entity_id: &str,
        data: serde_json::Value,
        actor: &str,
    ) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event_type: event_type.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
            data,
            actor: actor.to_string(),
        }
    }
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_uuid TEXT UNIQUE NOT NULL,
            created_at TEXT NOT NULL,
            first_name TEXT,
            middle_name TEXT,
            last_name TEXT,
            dob TEXT,
            gender TEXT,
            mob TEXT,
            name_number INTEGER,
            dob_number INTEGER,
            moolank INTEGER,
            bhagyank INTEGER,
            destiny INTEGER
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id TEXT UNIQUE NOT NULL,
            timestamp TEXT NOT NULL,
            event_type TEXT NOT NULL,
            entity_type TEXT NOT NULL,
            entity_id TEXT NOT NULL,
            data TEXT NOT NULL,
            actor TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_users_created_at ON users(created_at)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_entity ON events(entity_type, entity_id)",
        [],
    )?;

    Ok(())
}

/// Open (or create) the database file and make sure the schema exists
pub fn open_database(path: &std::path::Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database: {:?}", path))?;
    setup_database(&conn).context("Failed to initialize database schema")?;
    info!(path = ?path, "database ready");
    Ok(conn)
}

/// Insert one user record. Identical requests produce separate rows.
pub fn insert_user(conn: &Connection, record: &UserRecord, actor: &str) -> Result<()> {
    let f = &record.fields;

    conn.execute(
        "INSERT INTO users (
            user_uuid, created_at, first_name, middle_name, last_name, dob, gender, mob,
            name_number, dob_number, moolank, bhagyank, destiny
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            record.id,
            record.created_at.to_rfc3339(),
            f.first_name,
            f.middle_name,
            f.last_name,
            f.dob,
            f.gender,
            f.mob,
            f.name_number,
            f.dob_number,
            f.moolank,
            f.bhagyank,
            f.destiny,
        ],
    )
    .context("Failed to insert user")?;

    let event = Event::new(
        "user_saved",
        "user",
        &record.id,
        serde_json::json!({
            "dob": f.dob,
            "nameNumber": f.name_number,
        }),
        actor,
    );
    if let Err(e) = insert_event(conn, &event) {
        warn!(error = %e, user = %record.id, "failed to write audit event");
    }

    debug!(user = %record.id, actor, "user inserted");
    Ok(())
}

/// Insert event into audit trail
pub fn insert_event(conn: &Connection, event: &Event) -> Result<()> {
    let data_json = serde_json::to_string(&event.data)?;

    conn.execute(
        "INSERT INTO events (
            event_id, timestamp, event_type, entity_type, entity_id, data, actor
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            event.event_id,
            event.timestamp.to_rfc3339(),
            event.event_type,
            event.entity_type,
            event.entity_id,
            data_json,
            event.actor,
        ],
    )?;

    Ok(())
}

pub fn verify_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;

    Ok(count)
}

// ============================================================================
// CSV IMPORT
// ============================================================================

/// Read forms from CSV with header
/// `firstName,middleName,lastName,dob,gender,mob`
pub fn load_csv<R: Read>(reader: R) -> Result<Vec<UserForm>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let mut forms = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        let form: UserForm =
            result.with_context(|| format!("Failed to deserialize CSV row {}", i + 1))?;
        forms.push(form);
    }

    Ok(forms)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Calculate and store every form; rows that fail presence checks or
/// carry a malformed date are skipped.
pub fn import_forms(conn: &Connection, forms: &[UserForm]) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    for (i, form) in forms.iter().enumerate() {
        if let Err(errors) = form.validate() {
            warn!(row = i + 1, reason = %describe(&errors), "skipping row");
            summary.skipped += 1;
            continue;
        }

        let input = match form.to_input() {
            Ok(input) => input,
            Err(e) => {
                warn!(row = i + 1, reason = %e, "skipping row");
                summary.skipped += 1;
                continue;
            }
        };

        let calc = calculate(&input);
        let record = UserRecord::new(SaveUserRequest::from_calculation(form, &calc.result));
        insert_user(conn, &record, "csv_importer")?;
        summary.inserted += 1;
    }

    info!(inserted = summary.inserted, skipped = summary.skipped, "csv import finished");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        conn
    }

    fn sample_request() -> SaveUserRequest {
        SaveUserRequest {
            first_name: Some("Asha".to_string()),
            middle_name: Some(String::new()),
            last_name: Some("Rao".to_string()),
            dob: Some("1990-05-15".to_string()),
            gender: Some("Female".to_string()),
            mob: Some("9876543210".to_string()),
            name_number: Some(4),
            dob_number: Some(3),
            moolank: Some(6),
            bhagyank: Some(3),
            destiny: Some(3),
        }
    }

    #[test]
    fn test_identical_saves_create_two_records() {
        let conn = test_conn();

        let first = UserRecord::new(sample_request());
        let second = UserRecord::new(sample_request());
        insert_user(&conn, &first, "test").unwrap();
        insert_user(&conn, &second, "test").unwrap();

        assert_ne!(first.id, second.id, "each record gets its own identity");
        assert_eq!(verify_count(&conn).unwrap(), 2);
    }

    #[test]
    fn test_stored_fields() {
        let conn = test_conn();
        let record = UserRecord::new(sample_request());
        insert_user(&conn, &record, "test").unwrap();

        let (dob, moolank, gender): (String, i64, String) = conn
            .query_row(
                "SELECT dob, moolank, gender FROM users WHERE user_uuid = ?1",
                params![record.id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();

        assert_eq!(dob, "1990-05-15");
        assert_eq!(moolank, 6);
        assert_eq!(gender, "Female");
    }

    #[test]
    fn test_missing_fields_stored_as_null() {
        let conn = test_conn();
        let record = UserRecord::new(SaveUserRequest {
            first_name: Some("Only".to_string()),
            ..Default::default()
        });
        insert_user(&conn, &record, "test").unwrap();

        let destiny: Option<i64> = conn
            .query_row(
                "SELECT destiny FROM users WHERE user_uuid = ?1",
                params![record.id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(destiny, None);
    }

    #[test]
    fn test_save_writes_audit_event() {
        let conn = test_conn();
        let record = UserRecord::new(sample_request());
        insert_user(&conn, &record, "web").unwrap();

        let (event_type, actor, data): (String, String, String) = conn
            .query_row(
                "SELECT event_type, actor, data FROM events WHERE entity_id = ?1",
                params![record.id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();
        assert_eq!(event_type, "user_saved");
        assert_eq!(actor, "web");

        let data: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(data["dob"], "1990-05-15");
        assert_eq!(data["nameNumber"], 4);
    }

    #[test]
    fn test_request_wire_names() {
        let req: SaveUserRequest = serde_json::from_str(
            r#"{"firstName":"A","dob":"1990-05-15","nameNumber":1,"bhagyank":3}"#,
        )
        .unwrap();
        assert_eq!(req.first_name.as_deref(), Some("A"));
        assert_eq!(req.name_number, Some(1));
        assert_eq!(req.bhagyank, Some(3));
        assert_eq!(req.mob, None);

        let bad = serde_json::from_str::<SaveUserRequest>(r#"{"nameNumber":"seven"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_numeric_mobile_kept_as_text() {
        let req: SaveUserRequest =
            serde_json::from_str(r#"{"firstName":"A","mob":9876543210}"#).unwrap();
        assert_eq!(req.mob.as_deref(), Some("9876543210"));

        let req: SaveUserRequest = serde_json::from_str(r#"{"mob":null}"#).unwrap();
        assert_eq!(req.mob, None);

        let bad = serde_json::from_str::<SaveUserRequest>(r#"{"mob":true}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_csv_import() {
        let data = "\
firstName,middleName,lastName,dob,gender,mob
Asha,,Rao,1990-05-15,Female,9876543210
Ravi,K,Menon,1985-03-29,Male,9123456780
,,NoFirst,2000-01-01,Other,1
Bad,,Date,15/05/1990,Male,1
";
        let forms = load_csv(data.as_bytes()).unwrap();
        assert_eq!(forms.len(), 4);
        assert_eq!(forms[1].middle_name, "K");

        let conn = test_conn();
        let summary = import_forms(&conn, &forms).unwrap();

        assert_eq!(summary, ImportSummary { inserted: 2, skipped: 2 });
        assert_eq!(verify_count(&conn).unwrap(), 2);
    }
}
