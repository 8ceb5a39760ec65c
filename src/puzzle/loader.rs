use anyhow::{Context, Result};
use std::path::Path;

use super::types::CatalogFile;

pub fn parse_catalog(content: &str) -> Result<CatalogFile> {
    let file: CatalogFile = toml::from_str(content)?;
    Ok(file)
}

pub fn load_catalog_file(path: &Path) -> Result<CatalogFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    parse_catalog(&content).with_context(|| format!("parsing catalog {}", path.display()))
}

/// Loads every `*.toml` in `dir` and concatenates them.
pub fn load_catalog_dir(dir: &Path) -> Result<CatalogFile> {
    let pattern = dir.join("*.toml");
    let mut paths: Vec<_> = glob::glob(&pattern.to_string_lossy())?
        .filter_map(|p| p.ok())
        .collect();

    // Sort by filename so 01_europe, 02_asia, ... keep map order
    paths.sort();

    let mut merged = CatalogFile::default();
    for path in paths {
        let file = load_catalog_file(&path)?;
        merged.continents.extend(file.continents);
        merged.puzzles.extend(file.puzzles);
    }

    Ok(merged)
}

pub fn load_catalog_path(path: &Path) -> Result<CatalogFile> {
    if path.is_dir() {
        load_catalog_dir(path)
    } else {
        load_catalog_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::types::AnswerKind;

    const ONE_CONTINENT: &str = r#"
[[continent]]
id = "oceania"
name = "Océanie"
icon = "🐨"
position = { x = 80, y = 70 }

[[puzzle]]
id = "oceania"
continent = "Océanie"
kind = "clock"
question = "Quelle heure est-il à Sydney quand il est midi à Paris ?"
clues = ["Huit heures d'avance"]
answer = "20:00"
"#;

    #[test]
    fn parses_continents_and_puzzles() {
        let file = parse_catalog(ONE_CONTINENT).unwrap();
        assert_eq!(file.continents.len(), 1);
        assert_eq!(file.continents[0].position.x, 80);
        assert!(!file.continents[0].filler);
        assert_eq!(file.puzzles[0].kind, AnswerKind::Clock);
        assert!(file.puzzles[0].decoy.is_none());
        assert!(file.puzzles[0].cultural_facts.is_empty());
    }

    #[test]
    fn rejects_unknown_answer_kind() {
        let bad = ONE_CONTINENT.replace("\"clock\"", "\"riddle\"");
        assert!(parse_catalog(&bad).is_err());
    }

    #[test]
    fn directory_is_merged_in_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let second = ONE_CONTINENT.replace("oceania", "antarctica");
        std::fs::write(dir.path().join("02_antarctica.toml"), second).unwrap();
        std::fs::write(dir.path().join("01_oceania.toml"), ONE_CONTINENT).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let merged = load_catalog_path(dir.path()).unwrap();
        let ids: Vec<_> = merged.continents.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["oceania", "antarctica"]);
        assert_eq!(merged.puzzles.len(), 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_catalog_path(&dir.path().join("nope.toml")).is_err());
    }
}
