//! Cached category list.

use std::sync::Arc;

use crate::error::DeckError;
use crate::model::Category;
use crate::traits::CardStore;

/// Categories as last read from storage.
///
/// Every mutation refetches the full list, so ids always match what
/// storage assigned.
pub struct CategoryRegistry {
    store: Arc<dyn CardStore>,
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// Read the current category list from `store`.
    pub fn load(store: Arc<dyn CardStore>) -> anyhow::Result<Self> {
        let categories = store.get_all_categories()?;
        Ok(Self { store, categories })
    }

    /// Add a category by name.
    ///
    /// Returns `false` when the name already existed; duplicates are not an
    /// error. Blank names are rejected before storage is touched.
    pub fn add(&mut self, name: &str) -> anyhow::Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DeckError::EmptyCategoryName.into());
        }
        let inserted = self.store.add_category(name)?;
        if !inserted {
            tracing::warn!(name, "category already exists");
        }
        self.refresh()?;
        Ok(inserted)
    }

    /// Reread the list from storage.
    pub fn refresh(&mut self) -> anyhow::Result<()> {
        self.categories = self.store.get_all_categories()?;
        Ok(())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category names in storage order.
    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Category> {
        let name = name.trim();
        self.categories.iter().find(|c| c.name == name)
    }

    /// Like [`find_by_name`](Self::find_by_name), failing with
    /// [`DeckError::UnknownCategory`] when absent.
    pub fn require(&self, name: &str) -> Result<&Category, DeckError> {
        self.find_by_name(name)
            .ok_or_else(|| DeckError::UnknownCategory(name.trim().to_string()))
    }
}
