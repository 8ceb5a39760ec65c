use crate::puzzle::PuzzleDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Accepted { fragment: char },
    Rejected,
}

impl Evaluation {
    #[allow(dead_code)]
    pub fn accepted(&self) -> bool {
        matches!(self, Evaluation::Accepted { .. })
    }

    pub fn fragment(&self) -> Option<char> {
        match self {
            Evaluation::Accepted { fragment } => Some(*fragment),
            Evaluation::Rejected => None,
        }
    }
}

/// Checks a submission against the canonical answer.
///
/// Both sides are uppercased and compared as-is: no trimming, so stray
/// whitespace makes an answer wrong. The fragment always comes from the
/// canonical answer, never from what was typed.
pub fn evaluate(puzzle: &PuzzleDefinition, submitted: &str) -> Evaluation {
    if submitted.to_uppercase() != puzzle.answer.to_uppercase() {
        return Evaluation::Rejected;
    }

    match fragment_of(&puzzle.answer) {
        Some(fragment) => Evaluation::Accepted { fragment },
        None => Evaluation::Rejected,
    }
}

fn fragment_of(answer: &str) -> Option<char> {
    // Some characters uppercase to several; the fragment is the first one
    answer.chars().next()?.to_uppercase().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Catalog;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn europe_accepts_lowercase() {
        let catalog = catalog();
        let europe = catalog.lookup("europe").unwrap();
        assert_eq!(
            evaluate(europe, "allemagne"),
            Evaluation::Accepted { fragment: 'A' }
        );
    }

    #[test]
    fn every_builtin_puzzle_accepts_its_answer_in_any_case() {
        let catalog = catalog();
        for spec in catalog.continents().iter().filter(|c| !c.filler) {
            let puzzle = catalog.lookup(&spec.id).unwrap();
            let expected = puzzle.answer.chars().next().unwrap().to_uppercase().next();
            for candidate in [
                puzzle.answer.clone(),
                puzzle.answer.to_lowercase(),
                puzzle.answer.to_uppercase(),
            ] {
                let result = evaluate(puzzle, &candidate);
                assert!(result.accepted(), "{} rejected {candidate}", puzzle.id);
                assert_eq!(result.fragment(), expected);
            }
        }
    }

    #[test]
    fn accented_answer_folds_case() {
        let catalog = catalog();
        let africa = catalog.lookup("africa").unwrap();
        assert_eq!(evaluate(africa, "djembé").fragment(), Some('D'));
        assert!(!evaluate(africa, "djembe").accepted());
    }

    #[test]
    fn whitespace_is_not_trimmed() {
        let catalog = catalog();
        let asia = catalog.lookup("asia").unwrap();
        assert!(!evaluate(asia, " 1").accepted());
        assert!(!evaluate(asia, "1 ").accepted());
    }

    #[test]
    fn wrong_and_empty_answers_are_rejected_repeatedly() {
        let catalog = catalog();
        let europe = catalog.lookup("europe").unwrap();
        for _ in 0..3 {
            assert_eq!(evaluate(europe, "AUTRICHE"), Evaluation::Rejected);
            assert_eq!(evaluate(europe, "").fragment(), None);
        }
        assert!(evaluate(europe, "Allemagne").accepted());
    }

    #[test]
    fn fragment_comes_from_canonical_answer() {
        let mut puzzle = catalog().lookup("europe").unwrap().clone();
        puzzle.answer = "ßerlin".into();
        // 'ß' uppercases to "SS"
        assert_eq!(evaluate(&puzzle, "SSERLIN").fragment(), Some('S'));
    }
}
