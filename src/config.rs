use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "DiaCare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const DATABASE_FILE: &str = "diacare.db";

/// Get the application data directory.
/// ~/DiaCare/ when a home directory is known, ./DiaCare otherwise.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the encounter and alert database.
pub fn database_path() -> PathBuf {
    app_data_dir().join(DATABASE_FILE)
}

/// Filter used when `RUST_LOG` is unset. Clamping and unknown-test warnings
/// stay visible; per-rule decisions need `debug`.
pub fn default_log_filter() -> String {
    "info,diacare_lib=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_named_after_app() {
        assert!(app_data_dir().ends_with("DiaCare"));
        if let Some(home) = dirs::home_dir() {
            assert!(app_data_dir().starts_with(home));
        }
    }

    #[test]
    fn database_lives_in_app_data() {
        let db = database_path();
        assert!(db.starts_with(app_data_dir()));
        assert!(db.ends_with("diacare.db"));
    }

    #[test]
    fn default_filter_parses() {
        let filter = default_log_filter();
        assert!(tracing_subscriber::EnvFilter::try_new(&filter).is_ok());
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
