//! Static game data consumed by the engine.
//!
//! The catalog maps game names to quest thresholds, lists the bonus games that grant a
//! one-time unlock reward, and holds the trivia tiers and question pool. A built-in catalog
//! ships with the bot; a JSON file can replace it at startup.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Quiz difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parses a difficulty name, accepting the Czech names used by the commands.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "easy" | "lehka" | "lehká" => Some(Self::Easy),
            "medium" | "stredni" | "střední" => Some(Self::Medium),
            "hard" | "tezka" | "těžká" => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// A play-time milestone for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestThreshold {
    pub name: String,
    pub minutes: u64,
    pub xp_reward: u64,
}

impl QuestThreshold {
    pub fn new(name: &str, minutes: u64, xp_reward: u64) -> Self {
        Self {
            name: name.to_string(),
            minutes,
            xp_reward,
        }
    }
}

/// Presentation data of a bonus game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusGame {
    pub emoji: String,
    pub category: String,
}

/// Time limit and reward of one quiz difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaTier {
    pub time_limit_secs: u64,
    pub xp_reward: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaTiers {
    pub easy: TriviaTier,
    pub medium: TriviaTier,
    pub hard: TriviaTier,
}

impl Default for TriviaTiers {
    fn default() -> Self {
        Self {
            easy: TriviaTier {
                time_limit_secs: 30,
                xp_reward: 10,
            },
            medium: TriviaTier {
                time_limit_secs: 20,
                xp_reward: 25,
            },
            hard: TriviaTier {
                time_limit_secs: 15,
                xp_reward: 50,
            },
        }
    }
}

/// Options every trivia question must carry, one per answer button.
pub const TRIVIA_OPTION_COUNT: usize = 4;

/// A multiple-choice question from the trivia pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    /// Questions without a difficulty are served for every tier.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

impl TriviaQuestion {
    /// Exactly [`TRIVIA_OPTION_COUNT`] distinct options, one of them the answer.
    pub fn is_playable(&self) -> bool {
        let distinct: HashSet<&String> = self.options.iter().collect();

        self.options.len() == TRIVIA_OPTION_COUNT
            && distinct.len() == TRIVIA_OPTION_COUNT
            && self.options.contains(&self.answer)
    }
}

/// All catalog data the engine and the quiz minigame consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameCatalog {
    pub quests: HashMap<String, Vec<QuestThreshold>>,
    pub default_quests: Vec<QuestThreshold>,
    pub bonus_games: HashMap<String, BonusGame>,
    pub trivia: TriviaTiers,
    pub trivia_questions: Vec<TriviaQuestion>,
}

impl Default for GameCatalog {
    fn default() -> Self {
        let mut quests = HashMap::new();
        quests.insert(
            "Minecraft".to_string(),
            vec![
                QuestThreshold::new("First Night Survived", 60, 50),
                QuestThreshold::new("Diamond Hunter", 300, 150),
                QuestThreshold::new("Master Builder", 600, 300),
                QuestThreshold::new("Ender Slayer", 1200, 500),
            ],
        );
        quests.insert(
            "Counter-Strike 2".to_string(),
            vec![
                QuestThreshold::new("Recruit", 60, 40),
                QuestThreshold::new("Veteran", 300, 120),
                QuestThreshold::new("Global Elite", 900, 350),
            ],
        );

        let bonus_games = [
            ("Terraria", "🌳", "Sandbox"),
            ("Stardew Valley", "🌾", "Simulation"),
            ("Hollow Knight", "🦋", "Metroidvania"),
            ("Celeste", "🍓", "Platformer"),
            ("Among Us", "🚀", "Party"),
        ]
        .into_iter()
        .map(|(name, emoji, category)| {
            (
                name.to_string(),
                BonusGame {
                    emoji: emoji.to_string(),
                    category: category.to_string(),
                },
            )
        })
        .collect();

        Self {
            quests,
            default_quests: vec![
                QuestThreshold::new("Getting Started", 60, 25),
                QuestThreshold::new("Regular", 300, 75),
                QuestThreshold::new("Dedicated", 600, 150),
            ],
            bonus_games,
            trivia: TriviaTiers::default(),
            trivia_questions: Vec::new(),
        }
    }
}

impl GameCatalog {
    /// Parses a catalog from JSON.
    ///
    /// Missing sections fall back to the built-in values. Quest lists are sorted by their
    /// minute thresholds so that completion notifications come out in ascending order.
    /// Trivia questions that cannot fill the answer buttons are dropped.
    ///
    /// # Arguments
    /// - `json` - Catalog document
    ///
    /// # Returns
    /// - `Ok(GameCatalog)` - Parsed and normalized catalog
    /// - `Err(serde_json::Error)` - Malformed document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut catalog: Self = serde_json::from_str(json)?;
        catalog.normalize();
        Ok(catalog)
    }

    fn normalize(&mut self) {
        for thresholds in self.quests.values_mut() {
            thresholds.sort_by_key(|q| q.minutes);
        }
        self.default_quests.sort_by_key(|q| q.minutes);

        let before = self.trivia_questions.len();
        self.trivia_questions.retain(TriviaQuestion::is_playable);
        let skipped = before - self.trivia_questions.len();
        if skipped > 0 {
            tracing::warn!(
                "Skipped {} trivia questions without {} distinct options including the answer",
                skipped,
                TRIVIA_OPTION_COUNT
            );
        }
    }

    /// Quest thresholds of `game`, or the generic list for games without their own.
    pub fn quests_for(&self, game: &str) -> &[QuestThreshold] {
        self.quests
            .get(game)
            .map(Vec::as_slice)
            .unwrap_or(&self.default_quests)
    }

    pub fn bonus_game(&self, game: &str) -> Option<&BonusGame> {
        self.bonus_games.get(game)
    }

    pub fn trivia_tier(&self, difficulty: Difficulty) -> TriviaTier {
        match difficulty {
            Difficulty::Easy => self.trivia.easy,
            Difficulty::Medium => self.trivia.medium,
            Difficulty::Hard => self.trivia.hard,
        }
    }

    /// Trivia questions usable for `difficulty`.
    pub fn trivia_questions(&self, difficulty: Difficulty) -> Vec<&TriviaQuestion> {
        self.trivia_questions
            .iter()
            .filter(|q| q.difficulty.is_none_or(|d| d == difficulty))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_game_uses_default_quests() {
        let catalog = GameCatalog::default();

        assert_eq!(catalog.quests_for("Factorio"), catalog.default_quests.as_slice());
        assert_eq!(catalog.quests_for("Minecraft")[0].minutes, 60);
    }

    #[test]
    fn parses_partial_catalog_and_sorts_thresholds() {
        let catalog = GameCatalog::from_json(
            r#"{
                "quests": {
                    "Factorio": [
                        { "name": "Megabase", "minutes": 600, "xp_reward": 300 },
                        { "name": "Rocket", "minutes": 120, "xp_reward": 80 }
                    ]
                },
                "bonus_games": {
                    "Factorio": { "emoji": "⚙️", "category": "Automation" }
                }
            }"#,
        )
        .unwrap();

        let quests = catalog.quests_for("Factorio");
        assert_eq!(quests[0].name, "Rocket");
        assert_eq!(quests[1].name, "Megabase");
        assert_eq!(catalog.bonus_game("Factorio").unwrap().category, "Automation");
        // Sections missing from the document keep their built-in values
        assert_eq!(catalog.trivia_tier(Difficulty::Hard).xp_reward, 50);
        assert!(catalog.bonus_game("Terraria").is_none());
    }

    #[test]
    fn filters_trivia_by_difficulty() {
        let catalog = GameCatalog::from_json(
            r#"{
                "trivia_questions": [
                    { "question": "a", "options": ["1", "2", "3", "4"], "answer": "1", "difficulty": "easy" },
                    { "question": "b", "options": ["1", "2", "3", "4"], "answer": "2" },
                    { "question": "c", "options": ["1", "2", "3", "4"], "answer": "2", "difficulty": "hard" }
                ]
            }"#,
        )
        .unwrap();

        let easy: Vec<_> = catalog
            .trivia_questions(Difficulty::Easy)
            .into_iter()
            .map(|q| q.question.as_str())
            .collect();

        assert_eq!(easy, vec!["a", "b"]);
    }

    #[test]
    fn skips_unplayable_trivia() {
        let catalog = GameCatalog::from_json(
            r#"{
                "trivia_questions": [
                    { "question": "two", "options": ["1", "2"], "answer": "1" },
                    { "question": "five", "options": ["1", "2", "3", "4", "5"], "answer": "5" },
                    { "question": "missing", "options": ["1", "2", "3", "4"], "answer": "9" },
                    { "question": "repeated", "options": ["1", "1", "2", "3"], "answer": "1" },
                    { "question": "ok", "options": ["1", "2", "3", "4"], "answer": "4" }
                ]
            }"#,
        )
        .unwrap();

        let questions: Vec<_> = catalog
            .trivia_questions
            .iter()
            .map(|q| q.question.as_str())
            .collect();

        assert_eq!(questions, vec!["ok"]);
    }

    #[test]
    fn parses_czech_difficulty_names() {
        assert_eq!(Difficulty::parse("Těžká"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("medium"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("impossible"), None);
    }
}
