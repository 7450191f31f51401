use std::process;

#[derive(Debug, thiserror::Error)]
pub enum CivitError {
    #[error("Issue {0} not found")]
    NotFound(i64),

    #[error("Missing required field: {field}")]
    Validation { field: String },

    #[error("Invalid value for {field}: '{value}'. Valid: {valid}")]
    InvalidValue {
        field: String,
        value: String,
        valid: String,
    },

    #[error("No .civit.db found. Run 'civit init' to create one.")]
    NoDatabase,

    #[error("Not logged in. Run 'civit login <email>' first.")]
    NoSession,

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CivitError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CivitError::NotFound(_) => 1,
            CivitError::Validation { .. } => 1,
            CivitError::InvalidValue { .. } => 1,
            CivitError::NoDatabase => 1,
            CivitError::NoSession => 1,
            CivitError::Db(_) => 1,
            CivitError::Parse(_) => 1,
            CivitError::Io(_) => 1,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CivitError::NotFound(_) => "NOT_FOUND",
            CivitError::Validation { .. } => "VALIDATION",
            CivitError::InvalidValue { .. } => "INVALID_VALUE",
            CivitError::NoDatabase => "NO_DATABASE",
            CivitError::NoSession => "NO_SESSION",
            CivitError::Db(_) => "DB_ERROR",
            CivitError::Parse(_) => "PARSE_ERROR",
            CivitError::Io(_) => "IO_ERROR",
        }
    }
}

pub fn handle_error(err: CivitError, json_mode: bool) -> ! {
    if json_mode {
        let err_json = serde_json::json!({
            "error": err.to_string(),
            "code": err.error_code(),
        });
        eprintln!("{}", err_json);
    } else {
        eprintln!("ERROR: {}", err);
    }
    process::exit(err.exit_code());
}

/// Exit with code 2 for empty result sets.
pub fn exit_empty(json_mode: bool, msg: &str) -> ! {
    if json_mode {
        // For json mode, output empty array on stdout
        println!("[]");
    } else {
        eprintln!("{}", msg);
    }
    process::exit(2);
}
