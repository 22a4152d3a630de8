//! Project submission domain entities.

pub mod category;
pub mod draft;
pub mod model;
pub mod status;
pub mod validation;

pub use category::ProjectCategory;
pub use draft::{NewProject, ProjectDraft};
pub use model::{Project, ProjectFilter, ReviewPatch};
pub use status::ProjectStatus;
pub use validation::validate;
