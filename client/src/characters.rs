use serde::{Deserialize, Serialize};

/// The four characters voters choose between.
///
/// A display convention only: the chain stores whatever id the client
/// encrypts, and ids outside 1-4 are accepted and stored verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Character {
    Goku = 1,
    Vegeta = 2,
    Gohan = 3,
    Frieza = 4,
}

impl Character {
    pub const ALL: [Character; 4] = [
        Character::Goku,
        Character::Vegeta,
        Character::Gohan,
        Character::Frieza,
    ];

    pub fn from_id(id: u32) -> Option<Character> {
        match id {
            1 => Some(Character::Goku),
            2 => Some(Character::Vegeta),
            3 => Some(Character::Gohan),
            4 => Some(Character::Frieza),
            _ => None,
        }
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Character::Goku => "Goku",
            Character::Vegeta => "Vegeta",
            Character::Gohan => "Gohan",
            Character::Frieza => "Frieza",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for character in Character::ALL {
            assert_eq!(Character::from_id(character.id()), Some(character));
        }
    }

    #[test]
    fn out_of_range_ids_have_no_character() {
        assert_eq!(Character::from_id(0), None);
        assert_eq!(Character::from_id(5), None);
        assert_eq!(Character::from_id(u32::MAX), None);
    }

    #[test]
    fn names_match_the_roster() {
        assert_eq!(Character::Goku.name(), "Goku");
        assert_eq!(Character::Frieza.name(), "Frieza");
    }
}
