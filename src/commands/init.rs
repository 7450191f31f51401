use crate::db;
use crate::error::CivitError;
use crate::format::Format;
use std::env;
use std::path::PathBuf;

pub fn run(fmt: Format, db_override: Option<&str>) -> Result<(), CivitError> {
    let db_path = if let Some(p) = db_override {
        PathBuf::from(p)
    } else if let Ok(p) = env::var("CIVIT_DB_PATH") {
        PathBuf::from(p)
    } else {
        let cwd = env::current_dir().map_err(CivitError::Io)?;
        cwd.join(".civit.db")
    };

    let created = if db_path.exists() {
        // Idempotent: already exists
        let _conn = db::open_db(&db_path)?;
        false
    } else {
        let _conn = db::init_db(&db_path)?;
        true
    };

    let path_str = db_path.to_string_lossy().to_string();
    match fmt {
        Format::Json => {
            let out = serde_json::json!({
                "action": "init",
                "path": path_str,
                "created": created,
            });
            println!("{}", out);
        }
        _ => {
            println!("INIT: {}", path_str);
        }
    }

    Ok(())
}
