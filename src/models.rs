//! Frontend Models
//!
//! Data structures matching the remote todo collection.

use serde::{Deserialize, Serialize};

/// Id reserved for the not-yet-persisted placeholder shown during creation.
pub const PLACEHOLDER_ID: u32 = 0;

/// Todo data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u32,
    #[serde(rename = "userId")]
    pub user_id: u32,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    /// Local stand-in rendered while a create request is in flight.
    pub fn placeholder(title: impl Into<String>, user_id: u32) -> Self {
        Self {
            id: PLACEHOLDER_ID,
            user_id,
            title: title.into(),
            completed: false,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == PLACEHOLDER_ID
    }
}

/// Body of `POST /todos`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTodo {
    pub title: String,
    #[serde(rename = "userId")]
    pub user_id: u32,
    pub completed: bool,
}

/// Body of `PATCH /todos/{id}`; absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), ..Default::default() }
    }

    pub fn completed(completed: bool) -> Self {
        Self { completed: Some(completed), ..Default::default() }
    }
}

/// Which slice of the list is displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    /// Hash route used by the filter links
    pub fn href(self) -> &'static str {
        match self {
            Filter::All => "#/",
            Filter::Active => "#/active",
            Filter::Completed => "#/completed",
        }
    }
}
