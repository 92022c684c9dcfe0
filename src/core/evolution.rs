//! Demon evolution: the ability ladder unlocked by reactor level.

use serde::Serialize;

/// An ability on the evolution ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ability {
    pub name: &'static str,
    pub required_level: u32,
}

/// An ability paired with whether the current level has reached it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AbilityStatus {
    pub ability: Ability,
    pub unlocked: bool,
}

/// Ladder in unlock order.
pub const ABILITIES: [Ability; 5] = [
    Ability {
        name: "Sunlight Resistance",
        required_level: 2,
    },
    Ability {
        name: "Rage Burst Duration",
        required_level: 3,
    },
    Ability {
        name: "Blood Synthesis",
        required_level: 5,
    },
    Ability {
        name: "Shadow Merge",
        required_level: 7,
    },
    Ability {
        name: "Oni Ascension",
        required_level: 10,
    },
];

pub fn abilities(level: u32) -> Vec<AbilityStatus> {
    ABILITIES
        .iter()
        .map(|ability| AbilityStatus {
            ability: *ability,
            unlocked: level >= ability.required_level,
        })
        .collect()
}

/// The first ability still locked at `level`.
pub fn next_unlock(level: u32) -> Option<Ability> {
    ABILITIES
        .iter()
        .find(|ability| level < ability.required_level)
        .copied()
}

pub fn unlocked_count(level: u32) -> usize {
    ABILITIES
        .iter()
        .filter(|ability| level >= ability.required_level)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_level_unlocks() {
        let statuses = abilities(4);
        let unlocked: Vec<_> = statuses
            .iter()
            .filter(|s| s.unlocked)
            .map(|s| s.ability.name)
            .collect();
        assert_eq!(unlocked, vec!["Sunlight Resistance", "Rage Burst Duration"]);
        assert_eq!(unlocked_count(4), 2);
    }

    #[test]
    fn test_next_unlock() {
        assert_eq!(next_unlock(1).map(|a| a.required_level), Some(2));
        assert_eq!(next_unlock(4).map(|a| a.name), Some("Blood Synthesis"));
        assert_eq!(next_unlock(5).map(|a| a.name), Some("Shadow Merge"));
        assert_eq!(next_unlock(10), None);
    }

    #[test]
    fn test_everything_unlocked_at_ten() {
        assert!(abilities(10).iter().all(|s| s.unlocked));
        assert_eq!(unlocked_count(1), 0);
    }
}
