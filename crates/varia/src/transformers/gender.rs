use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::types::MultiTokenSpec;

/// Grammatical gender, selecting branch 0, 1 or 2 of a gender token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Neuter,
}

impl Gender {
    pub fn index(self) -> usize {
        match self {
            Gender::Male => 0,
            Gender::Female => 1,
            Gender::Neuter => 2,
        }
    }
}

/// Resolves gender picks such as `` `he¦she¦it´ ``.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct GenderTransformer {
    gender: Gender,
    #[builder(default = MultiTokenSpec::gender())]
    token: MultiTokenSpec,
    #[builder(default)]
    strict: bool,
}

impl GenderTransformer {
    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn token(&self) -> &MultiTokenSpec {
        &self.token
    }

    pub fn strict(&self) -> bool {
        self.strict
    }
}
