use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Lobby,
    Map,
    Puzzle,
    Meta,
    Debrief,
}

impl Screen {
    /// Screens during which the countdown runs.
    pub fn is_active(self) -> bool {
        matches!(self, Screen::Map | Screen::Puzzle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebriefReason {
    KeySubmitted,
    TimeExpired,
}

pub const ROOM_CODE_PREFIX: &str = "ATLAS-";
pub const ROOM_CODE_MAX_TYPED: usize = 6;
const ROOM_CODE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Cosmetic room code. Nothing ever coordinates on it.
pub fn generate_room_code<R: Rng>(rng: &mut R) -> String {
    let token: String = (0..4)
        .map(|_| ROOM_CODE_ALPHABET[rng.gen_range(0..ROOM_CODE_ALPHABET.len())] as char)
        .collect();
    format!("{ROOM_CODE_PREFIX}{token}")
}

/// Uppercases a typed room code and caps its length.
pub fn normalize_room_code(typed: &str) -> String {
    typed.to_uppercase().chars().take(ROOM_CODE_MAX_TYPED).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub screen: Screen,
    pub player_name: String,
    pub room_code: String,
    pub time_remaining: u32,
    pub hints_used: u32,
    pub fragments: Vec<char>,
    pub final_key: Option<String>,
    pub debrief_reason: Option<DebriefReason>,
}

impl GameSession {
    pub fn new(time_limit: u32) -> Self {
        GameSession {
            screen: Screen::Welcome,
            player_name: String::new(),
            room_code: String::new(),
            time_remaining: time_limit,
            hints_used: 0,
            fragments: Vec::new(),
            final_key: None,
            debrief_reason: None,
        }
    }

    pub fn fragment_key(&self) -> String {
        self.fragments.iter().collect()
    }
}

/// `M:SS`, as shown in the header and debrief.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn room_code_has_prefix_and_four_token_chars() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let code = generate_room_code(&mut rng);
            let token = code.strip_prefix(ROOM_CODE_PREFIX).unwrap();
            assert_eq!(token.len(), 4);
            assert!(token
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn typed_room_code_is_uppercased_and_capped() {
        assert_eq!(normalize_room_code("abc"), "ABC");
        assert_eq!(normalize_room_code("atlas-1234"), "ATLAS-");
    }

    #[test]
    fn time_format() {
        assert_eq!(format_time(1500), "25:00");
        assert_eq!(format_time(61), "1:01");
        assert_eq!(format_time(0), "0:00");
    }

    #[test]
    fn only_map_and_puzzle_are_active() {
        let active: Vec<_> = [
            Screen::Welcome,
            Screen::Lobby,
            Screen::Map,
            Screen::Puzzle,
            Screen::Meta,
            Screen::Debrief,
        ]
        .into_iter()
        .filter(|s| s.is_active())
        .collect();
        assert_eq!(active, [Screen::Map, Screen::Puzzle]);
    }
}
