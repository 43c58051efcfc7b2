use anyhow::{Result, bail};

use crate::consts::DEFAULT_BREEDS;

/// Ordered list of breeds the text model picks from. The model answers with
/// a position in this list, so order is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreedCatalog {
    breeds: Vec<String>,
}

impl BreedCatalog {
    /// Build a catalog, trimming names and dropping blanks. Fails if nothing is left.
    pub fn new<I, S>(breeds: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let breeds: Vec<String> = breeds
            .into_iter()
            .map(|b| b.as_ref().trim().to_string())
            .filter(|b| !b.is_empty())
            .collect();

        if breeds.is_empty() {
            bail!("breed catalog must contain at least one breed");
        }

        Ok(Self { breeds })
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.breeds.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.breeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breeds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.breeds.iter().map(String::as_str)
    }

    /// One `"{index}. {name}"` line per breed, as shown to the model.
    pub fn numbered(&self) -> String {
        self.breeds
            .iter()
            .enumerate()
            .map(|(i, breed)| format!("{}. {}", i, breed))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for BreedCatalog {
    fn default() -> Self {
        Self {
            breeds: DEFAULT_BREEDS.iter().map(|b| b.to_string()).collect(),
        }
    }
}
