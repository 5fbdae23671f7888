use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// One day's bottle and everything the detail view shows about it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bottle {
    pub day: u8,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Correct answer in the matching game, the day itself unless stated.
    #[serde(default)]
    pub answer: Option<u8>,
}

impl Bottle {
    pub fn id(&self) -> CardId {
        CardId::from(self.day)
    }

    pub fn answer(&self) -> u8 {
        self.answer.unwrap_or(self.day)
    }

    pub fn detail(&self) -> DetailFragment {
        DetailFragment {
            title: format!("Day {}", self.day),
            name: self.name.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            link: self.link.clone(),
        }
    }
}

/// Content handed to the detail view when a card is revealed or reopened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailFragment {
    pub title: String,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub link: Option<String>,
}

/// On-disk shape: a list of `[[bottle]]` tables.
#[derive(Clone, Debug, Deserialize)]
pub struct CatalogFile {
    #[serde(default, rename = "bottle")]
    pub bottles: Vec<Bottle>,
}

/// Validated, ordered set of bottles with unique days.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "CatalogFile")]
pub struct Catalog {
    bottles: Vec<Bottle>,
}

impl Catalog {
    pub fn new(bottles: Vec<Bottle>) -> Result<Self> {
        if bottles.is_empty() {
            return Err(ScratchError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for bottle in &bottles {
            if !seen.insert(bottle.day) {
                return Err(ScratchError::DuplicateCard(bottle.id()));
            }
        }
        Ok(Self { bottles })
    }

    pub fn bottles(&self) -> &[Bottle] {
        &self.bottles
    }

    pub fn get(&self, id: &CardId) -> Option<&Bottle> {
        self.bottles.iter().find(|bottle| &bottle.id() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.bottles.iter().map(Bottle::id)
    }

    pub fn answers(&self) -> impl Iterator<Item = (CardId, u8)> + '_ {
        self.bottles
            .iter()
            .map(|bottle| (bottle.id(), bottle.answer()))
    }
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = ScratchError;

    fn try_from(file: CatalogFile) -> Result<Self> {
        Self::new(file.bottles)
    }
}
