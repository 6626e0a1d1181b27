// Session module: the context object handed to every menu action. It owns
// the in-memory catalog together with the store it came from, and writes the
// full catalog back after each successful mutation so memory and disk agree.

use crate::catalog::{Book, BookPatch, Catalog, NewBook, ReadingProgress};
use crate::store::CatalogStore;
use anyhow::Result;
use log::info;

pub struct Session {
    catalog: Catalog,
    store: CatalogStore,
}

impl Session {
    /// Load the catalog from `store`. A missing or corrupt file starts an
    /// empty session.
    pub fn open(store: CatalogStore) -> Result<Self> {
        let books = store.load()?;
        Ok(Session {
            catalog: Catalog::from_books(books),
            store,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Append a book and persist.
    pub fn add(&mut self, fields: NewBook) -> Result<()> {
        self.catalog.add(fields);
        self.save()?;
        info!("event=book_added count={}", self.catalog.len());
        Ok(())
    }

    /// Remove the first title match and persist. Returns `None` without
    /// touching the file when nothing matched.
    pub fn remove(&mut self, title: &str) -> Result<Option<Book>> {
        let Some(removed) = self.catalog.remove(title) else {
            info!("event=book_removed status=not_found");
            return Ok(None);
        };
        self.save()?;
        info!("event=book_removed status=ok count={}", self.catalog.len());
        Ok(Some(removed))
    }

    /// Patch the first title match and persist. Returns `false` without
    /// touching the file when nothing matched.
    pub fn update(&mut self, title: &str, patch: BookPatch) -> Result<bool> {
        if self.catalog.update(title, patch).is_none() {
            info!("event=book_updated status=not_found");
            return Ok(false);
        }
        self.save()?;
        info!("event=book_updated status=ok");
        Ok(true)
    }

    pub fn find(&self, query: &str) -> Vec<&Book> {
        let found = self.catalog.find(query);
        info!("event=search matches={}", found.len());
        found
    }

    pub fn progress(&self) -> ReadingProgress {
        self.catalog.progress()
    }

    /// Write the whole catalog to disk.
    pub fn save(&self) -> Result<()> {
        self.store.persist(self.catalog.books())
    }
}
