use anyhow::{bail, ensure, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::loader::{load_catalog_path, parse_catalog};
use super::types::{CatalogFile, ContinentSpec, PuzzleDefinition};

const BUILTIN_CATALOG: &str = include_str!("../../puzzles/atlas.toml");

/// Read-only puzzle lookup keyed by continent id, plus the map order.
#[derive(Debug, Clone)]
pub struct Catalog {
    continents: Vec<ContinentSpec>,
    puzzles: HashMap<String, PuzzleDefinition>,
}

impl Catalog {
    pub fn builtin() -> Result<Self> {
        Self::from_file(parse_catalog(BUILTIN_CATALOG)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_file(load_catalog_path(path)?)
    }

    pub fn from_file(file: CatalogFile) -> Result<Self> {
        validate(&file)?;
        let puzzles = file
            .puzzles
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        Ok(Catalog {
            continents: file.continents,
            puzzles,
        })
    }

    pub fn lookup(&self, continent_id: &str) -> Option<&PuzzleDefinition> {
        self.puzzles.get(continent_id)
    }

    pub fn continents(&self) -> &[ContinentSpec] {
        &self.continents
    }

    /// Continents that actually gate a puzzle.
    pub fn playable_count(&self) -> usize {
        self.continents.iter().filter(|c| !c.filler).count()
    }
}

fn validate(file: &CatalogFile) -> Result<()> {
    ensure!(!file.continents.is_empty(), "catalog declares no continents");

    let mut continent_ids = HashSet::new();
    for continent in &file.continents {
        ensure!(
            continent_ids.insert(continent.id.as_str()),
            "duplicate continent id `{}`",
            continent.id
        );
    }

    let mut puzzle_ids = HashSet::new();
    for puzzle in &file.puzzles {
        ensure!(
            puzzle_ids.insert(puzzle.id.as_str()),
            "duplicate puzzle id `{}`",
            puzzle.id
        );
        ensure!(
            continent_ids.contains(puzzle.id.as_str()),
            "puzzle `{}` has no matching continent",
            puzzle.id
        );
        ensure!(
            !puzzle.question.trim().is_empty(),
            "puzzle `{}` has an empty question",
            puzzle.id
        );
        ensure!(
            !puzzle.answer.is_empty(),
            "puzzle `{}` has an empty answer",
            puzzle.id
        );
        ensure!(!puzzle.clues.is_empty(), "puzzle `{}` has no clues", puzzle.id);
    }

    for continent in &file.continents {
        match (continent.filler, puzzle_ids.contains(continent.id.as_str())) {
            (false, false) => bail!("continent `{}` has no puzzle", continent.id),
            (true, true) => bail!("filler continent `{}` has a puzzle", continent.id),
            _ => {}
        }
    }

    Ok(())
}
