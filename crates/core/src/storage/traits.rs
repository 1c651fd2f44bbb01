//! Storage traits
//!
//! `ProjectStore` is the durability seam the repository writes through; the
//! SQLite `Database` is the production implementation.

use crate::error::Result;
use crate::models::Project;

/// Durable home of the project collection
pub trait ProjectStore {
    /// Load the whole collection, recovering to seed data when the stored
    /// copy is absent or unusable
    fn load_all(&self) -> Result<Vec<Project>>;

    /// Overwrite the stored collection in full
    fn save_all(&self, projects: &[Project]) -> Result<()>;
}

impl<T: ProjectStore + ?Sized> ProjectStore for &T {
    fn load_all(&self) -> Result<Vec<Project>> {
        (**self).load_all()
    }

    fn save_all(&self, projects: &[Project]) -> Result<()> {
        (**self).save_all(projects)
    }
}
