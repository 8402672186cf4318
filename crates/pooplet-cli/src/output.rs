//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use pooplet_core::error::AppError;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a single item in the selected format
pub fn print_item<T: Serialize + Tabled>(
    item: &T,
    format: OutputFormat,
) -> Result<(), AppError> {
    let rendered = render_item(item, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_item<T: Serialize + Tabled>(
    item: &T,
    format: OutputFormat,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Table => Ok(Table::new(std::slice::from_ref(item)).to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(item)?),
    }
}

/// Print a bare value, such as a token or hash, for piping
pub fn print_value(value: &str) {
    println!("{value}");
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    eprintln!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pooplet_core::error::ErrorKind;

    fn refuse<T, S: serde::Serializer>(_: &T, _: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("value cannot be written"))
    }

    #[derive(Serialize, Tabled)]
    struct Row {
        #[tabled(rename = "Name")]
        name: String,
    }

    #[derive(Serialize, Tabled)]
    struct Unwritable {
        #[serde(serialize_with = "refuse")]
        #[tabled(rename = "Name")]
        name: String,
    }

    #[test]
    fn test_render_json() {
        let row = Row {
            name: "alice".to_string(),
        };
        let json = render_item(&row, OutputFormat::Json).unwrap();
        assert!(json.contains("\"name\": \"alice\""));
        assert!(render_item(&row, OutputFormat::Table).unwrap().contains("alice"));
    }

    #[test]
    fn test_json_failure_is_a_serialization_error() {
        let item = Unwritable {
            name: "alice".to_string(),
        };
        let err = render_item(&item, OutputFormat::Json).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Serialization);
        assert_eq!(err.status_code(), 500);
        assert!(err.message.contains("value cannot be written"));
        assert!(print_item(&item, OutputFormat::Json).is_err());
    }
}
