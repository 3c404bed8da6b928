use crate::error::Result;
use crate::paths;
use crate::store::Vault;
use serde::{Deserialize, Serialize};

const DEFAULT_NUM_QUIZ_QUESTIONS: usize = 10;

/// Configuration, stored as `_relearn/config.json` inside the vault.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelearnConfig {
    /// How many questions a quiz round asks for.
    #[serde(default = "default_num_quiz_questions")]
    pub num_quiz_questions: usize,
}

fn default_num_quiz_questions() -> usize {
    DEFAULT_NUM_QUIZ_QUESTIONS
}

impl Default for RelearnConfig {
    fn default() -> Self {
        Self {
            num_quiz_questions: DEFAULT_NUM_QUIZ_QUESTIONS,
        }
    }
}

impl RelearnConfig {
    /// Load from the vault, or return defaults if no config exists yet.
    pub fn load<V: Vault>(vault: &V) -> Result<Self> {
        if !vault.exists(paths::CONFIG_PATH) {
            return Ok(Self::default());
        }
        let content = vault.read(paths::CONFIG_PATH)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<V: Vault>(&self, vault: &mut V) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        vault.write(paths::CONFIG_PATH, &content)
    }
}
