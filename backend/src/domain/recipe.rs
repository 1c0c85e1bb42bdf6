//! Recipe aggregate, drafts, and the change sets persisted by repositories.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::image::StoragePath;
use super::text::RecipeLines;
use super::user::UserId;

/// Validation errors for recipe identifiers and content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeValidationError {
    /// Identifier was zero or negative.
    #[error("recipe id must be a positive integer")]
    InvalidId,
    /// Title was empty or whitespace only.
    #[error("title must not be empty")]
    EmptyTitle,
    /// Ingredients were blank after normalisation.
    #[error("ingredients must contain at least one line")]
    EmptyIngredients,
    /// Steps were blank after normalisation.
    #[error("steps must contain at least one line")]
    EmptySteps,
}

/// Store-assigned recipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct RecipeId(i32);

impl RecipeId {
    /// Validate and construct a [`RecipeId`].
    pub fn new(id: i32) -> Result<Self, RecipeValidationError> {
        if id <= 0 {
            return Err(RecipeValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    pub(crate) const fn from_trusted(id: i32) -> Self {
        Self(id)
    }

    /// Raw database identifier.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RecipeId> for i32 {
    fn from(value: RecipeId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for RecipeId {
    type Error = RecipeValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Recipe title; unique across the store and compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipeTitle(String);

impl RecipeTitle {
    /// Validate a title. The text is kept verbatim, so uniqueness is an
    /// exact string comparison; only all-whitespace titles are refused.
    pub fn new(title: impl AsRef<str>) -> Result<Self, RecipeValidationError> {
        let title = title.as_ref();
        if title.trim().is_empty() {
            return Err(RecipeValidationError::EmptyTitle);
        }
        Ok(Self(title.to_owned()))
    }
}

impl AsRef<str> for RecipeTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RecipeTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Free-text recipe fields as submitted, before normalisation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeDraft {
    /// Title as typed.
    pub title: String,
    /// Ingredients, one per line.
    pub ingredients: String,
    /// Method steps, one per line.
    pub steps: String,
    /// Optional description.
    pub about: Option<String>,
}

/// Validated and normalised recipe text.
///
/// ## Invariants
/// - `title` is non-blank.
/// - `ingredients` and `steps` hold at least one line each and no blank or
///   `\r`-only entries.
/// - `about` is `None` rather than blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeContent {
    pub title: RecipeTitle,
    pub ingredients: RecipeLines,
    pub steps: RecipeLines,
    pub about: Option<String>,
}

impl RecipeContent {
    /// Validate a draft, normalising its multi-line fields.
    ///
    /// # Examples
    /// ```
    /// use galleta::domain::{RecipeContent, RecipeDraft};
    ///
    /// let content = RecipeContent::try_from_draft(RecipeDraft {
    ///     title: "Pancakes".into(),
    ///     ingredients: "flour\r\n\r\nmilk".into(),
    ///     steps: "mix\n\nfry".into(),
    ///     about: Some("  ".into()),
    /// })
    /// .unwrap();
    /// assert_eq!(content.ingredients.to_text(), "flour\nmilk");
    /// assert!(content.about.is_none());
    /// ```
    pub fn try_from_draft(draft: RecipeDraft) -> Result<Self, RecipeValidationError> {
        let title = RecipeTitle::new(&draft.title)?;
        let ingredients = RecipeLines::parse(&draft.ingredients);
        if ingredients.is_empty() {
            return Err(RecipeValidationError::EmptyIngredients);
        }
        let steps = RecipeLines::parse(&draft.steps);
        if steps.is_empty() {
            return Err(RecipeValidationError::EmptySteps);
        }
        let about = draft.about.filter(|text| !text.trim().is_empty());

        Ok(Self {
            title,
            ingredients,
            steps,
            about,
        })
    }
}

/// Row handed to the repository on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    /// Validated text fields.
    pub content: RecipeContent,
    /// Where the photo was written.
    pub photo: StoragePath,
    /// The creating user.
    pub owner: UserId,
}

/// Full replacement of a recipe's editable fields.
///
/// `photo: None` keeps the stored photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeChanges {
    /// Replacement text fields.
    pub content: RecipeContent,
    /// Replacement photo, if one was uploaded.
    pub photo: Option<StoragePath>,
}

/// Persisted recipe.
///
/// Serialised as camelCase JSON with `ingredients` and `steps` rendered as
/// arrays of lines and `owner` as the numeric user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(into = "RecipeDto")]
pub struct Recipe {
    #[schema(value_type = i32, example = 4)]
    id: RecipeId,
    #[schema(value_type = String, example = "Chocolate cake")]
    title: RecipeTitle,
    #[schema(value_type = Vec<String>)]
    ingredients: RecipeLines,
    #[schema(value_type = Vec<String>)]
    steps: RecipeLines,
    #[schema(value_type = Option<String>, example = "static/img/uploads/cake.jpg")]
    photo: Option<StoragePath>,
    about: Option<String>,
    #[schema(value_type = i32, example = 2)]
    owner: UserId,
}

impl Recipe {
    /// Assemble a recipe from stored parts.
    pub fn new(
        id: RecipeId,
        content: RecipeContent,
        photo: Option<StoragePath>,
        owner: UserId,
    ) -> Self {
        let RecipeContent {
            title,
            ingredients,
            steps,
            about,
        } = content;
        Self {
            id,
            title,
            ingredients,
            steps,
            photo,
            about,
            owner,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> RecipeId {
        self.id
    }

    /// Unique title.
    pub fn title(&self) -> &RecipeTitle {
        &self.title
    }

    /// Normalised ingredient lines.
    pub fn ingredients(&self) -> &RecipeLines {
        &self.ingredients
    }

    /// Normalised step lines.
    pub fn steps(&self) -> &RecipeLines {
        &self.steps
    }

    /// Stored photo path, if any.
    pub fn photo(&self) -> Option<&StoragePath> {
        self.photo.as_ref()
    }

    /// Free-text description, if any.
    pub fn about(&self) -> Option<&str> {
        self.about.as_deref()
    }

    /// Identifier of the owning user.
    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// True when `query` occurs in the title or the description.
    ///
    /// Matching is a case-sensitive substring test.
    pub fn matches(&self, query: &str) -> bool {
        self.title.as_ref().contains(query)
            || self.about.as_deref().is_some_and(|about| about.contains(query))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecipeDto {
    id: i32,
    title: String,
    ingredients: Vec<String>,
    steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    about: Option<String>,
    owner: i32,
}

impl From<Recipe> for RecipeDto {
    fn from(value: Recipe) -> Self {
        Self {
            id: value.id.get(),
            title: value.title.0,
            ingredients: value.ingredients.as_slice().to_vec(),
            steps: value.steps.as_slice().to_vec(),
            photo: value.photo.map(String::from),
            about: value.about,
            owner: value.owner.get(),
        }
    }
}
