use serde::Deserialize;

/// One catalog file: continents in display order plus the puzzles gating them.
#[derive(Debug, Deserialize, Default)]
pub struct CatalogFile {
    #[serde(default, rename = "continent")]
    pub continents: Vec<ContinentSpec>,
    #[serde(default, rename = "puzzle")]
    pub puzzles: Vec<PuzzleDefinition>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ContinentSpec {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub position: Position,
    /// Drawn on the map but has no puzzle behind it.
    #[serde(default)]
    pub filler: bool,
}

/// Layout position in percent of the map area.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PuzzleDefinition {
    pub id: String,
    pub continent: String,
    pub kind: AnswerKind,
    pub question: String,
    pub clues: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub decoy: Option<String>,
    #[serde(default)]
    pub cultural_facts: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKind {
    Word,
    Number,
    Directions,
    Clock,
}

impl AnswerKind {
    pub fn label(self) -> &'static str {
        match self {
            AnswerKind::Word => "Entrez le mot",
            AnswerKind::Number => "Entrez les chiffres",
            AnswerKind::Directions => "Entrez la séquence (↑↓←→)",
            AnswerKind::Clock => "Entrez l'heure (HH:MM)",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            AnswerKind::Word => "XXXXX",
            AnswerKind::Number => "1234",
            AnswerKind::Directions => "↑↓←→",
            AnswerKind::Clock => "12:00",
        }
    }
}
