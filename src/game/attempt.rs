use crate::puzzle::PuzzleDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
}

/// Per-visit puzzle state. Dropped whenever the puzzle screen is left.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleAttempt {
    pub continent_id: String,
    pub input: String,
    pub clues_revealed: bool,
    pub feedback: Option<Feedback>,
    /// Fragment waiting to be committed once the "correct" banner has shown.
    pub pending_fragment: Option<char>,
}

impl PuzzleAttempt {
    pub fn new(continent_id: &str) -> Self {
        PuzzleAttempt {
            continent_id: continent_id.to_string(),
            input: String::new(),
            clues_revealed: false,
            feedback: None,
            pending_fragment: None,
        }
    }

    pub fn is_settling(&self) -> bool {
        self.pending_fragment.is_some()
    }

    /// Clues shown when the clue panel is open: the first `hints_used`,
    /// where `hints_used` is the session-wide count.
    pub fn visible_clues<'p>(&self, puzzle: &'p PuzzleDefinition, hints_used: u32) -> &'p [String] {
        if !self.clues_revealed {
            return &[];
        }
        let n = (hints_used as usize).min(puzzle.clues.len());
        &puzzle.clues[..n]
    }
}
