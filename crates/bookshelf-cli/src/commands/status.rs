//! Status command handler

use anyhow::Result;

use bookshelf_core::Store;

use crate::output::{Output, OutputFormat};

/// Show where the collection lives and what it holds
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let stats = store.stats();

    match output.format {
        OutputFormat::Json => {
            println!("{}", status_json(store));
        }
        OutputFormat::Quiet => {
            println!("{}", stats.total);
        }
        OutputFormat::Human => {
            println!("Bookshelf Status");
            println!("================");
            println!();
            println!("Storage:");
            println!("  Location: {}", store.path().display());
            println!("  Size:     {}", stats.file_size_human());
            println!();
            println!("Contents:");
            println!("  Books:  {}", stats.total);
            println!("  Read:   {}", stats.read);
            println!("  Unread: {}", stats.unread);
        }
    }

    Ok(())
}

/// Status as a JSON value
fn status_json(store: &Store) -> serde_json::Value {
    let stats = store.stats();
    serde_json::json!({
        "data_file": store.path(),
        "file_size": stats.file_size,
        "load_warning": store.load_warning().map(|w| w.to_string()),
        "counts": {
            "total": stats.total,
            "read": stats.read,
            "unread": stats.unread
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_show_in_every_format() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = Store::open_at(temp_dir.path().join("data.json")).unwrap();
        store.add("Dune", "Frank Herbert", 1965).unwrap();

        for format in [OutputFormat::Human, OutputFormat::Json, OutputFormat::Quiet] {
            show(&store, &Output::new(format)).unwrap();
        }
    }

    #[test]
    fn test_status_json_counts() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        let mut store = Store::open_at(&path).unwrap();
        store.add("Dune", "Frank Herbert", 1965).unwrap();
        store.add("1984", "George Orwell", 1949).unwrap();
        store.add("Emma", "Jane Austen", 1815).unwrap();
        store.mark_read("dune").unwrap();

        let status = status_json(&store);
        assert_eq!(status["counts"]["total"], 3);
        assert_eq!(status["counts"]["read"], 1);
        assert_eq!(status["counts"]["unread"], 2);
        assert_eq!(status["data_file"], path.to_string_lossy().as_ref());
        assert_eq!(
            status["file_size"],
            std::fs::metadata(&path).unwrap().len()
        );
        assert!(status["load_warning"].is_null());
    }

    #[test]
    fn test_status_json_reports_load_warning() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        std::fs::write(&path, "not json").unwrap();

        let store = Store::open_at(&path).unwrap();
        let status = status_json(&store);
        assert_eq!(status["counts"]["total"], 0);
        assert!(status["load_warning"]
            .as_str()
            .unwrap()
            .contains("corrupted"));
    }
}
