/// Base path of the project collection.
pub const PROJECTS_PATH: &str = "/api/projects";
/// Read-only rendering of a stored project.
pub const VIEW_PATH: &str = "/view";
/// Where the editor goes after a save or a failed load.
pub const LISTING_PATH: &str = "/dashboard";
/// Entry URL query parameter selecting the project to edit.
pub const PROJECT_QUERY_PARAM: &str = "project_id";

pub const SYSTEM_TAG: &str = "System";
pub const PROJECTS_TAG: &str = "Projects";

pub const MAX_PROJECT_ID_LEN: usize = 64;
pub const MAX_PROJECT_NAME_LEN: usize = 120;

/// Shown by the host after any successful save.
pub const SAVED_MESSAGE: &str = "Project saved!";
pub const UPDATED_MESSAGE: &str = "Project updated!";
pub const DELETED_MESSAGE: &str = "Project deleted!";
pub const CONNECTION_FAILED_MESSAGE: &str = "Connection error while saving the project.";
pub const LOAD_FAILED_MESSAGE: &str = "Could not load the project for editing.";
pub const PROJECT_NOT_FOUND_MESSAGE: &str = "Project not found";
pub const NAME_REQUIRED_MESSAGE: &str = "Project name is required";
