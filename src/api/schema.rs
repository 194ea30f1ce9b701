// ABOUTME: Field table for the Query and Mutation root types
// ABOUTME: Names, accepted arguments, auth requirements, and output shape of every top-level field

use super::document::OperationType;
use super::output::Shape;

/// Top-level read fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    /// `ingredient(id)`
    Ingredient,
    /// `allIngredients(name?)`
    AllIngredients,
    /// `recipe(id)`
    Recipe,
    /// `allRecipes(name?)`
    AllRecipes,
}

/// Top-level write and token fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationField {
    /// `createIngredient(name, quantity?)`
    CreateIngredient,
    /// `updateIngredient(id, name?, quantity?)`
    UpdateIngredient,
    /// `deleteIngredient(id)`
    DeleteIngredient,
    /// `createRecipe(name, ingredientIds)`
    CreateRecipe,
    /// `addIngredientToRecipe(recipeId, ingredientId)`
    AddIngredientToRecipe,
    /// `removeIngredientFromRecipe(recipeId, ingredientId)`
    RemoveIngredientFromRecipe,
    /// `tokenAuth(username, password)`
    TokenAuth,
    /// `verifyToken(token)`
    VerifyToken,
    /// `refreshToken(token)`
    RefreshToken,
}

/// A resolved top-level field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Field on `Query`
    Query(QueryField),
    /// Field on `Mutation`
    Mutation(MutationField),
}

impl QueryField {
    const ALL: [Self; 4] = [
        Self::Ingredient,
        Self::AllIngredients,
        Self::Recipe,
        Self::AllRecipes,
    ];

    /// Wire name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ingredient => "ingredient",
            Self::AllIngredients => "allIngredients",
            Self::Recipe => "recipe",
            Self::AllRecipes => "allRecipes",
        }
    }

    const fn arguments(self) -> &'static [&'static str] {
        match self {
            Self::Ingredient | Self::Recipe => &["id"],
            Self::AllIngredients | Self::AllRecipes => &["name"],
        }
    }

    const fn shape(self) -> Shape {
        match self {
            Self::Ingredient | Self::AllIngredients => Shape::Ingredient,
            Self::Recipe | Self::AllRecipes => Shape::Recipe,
        }
    }
}

impl MutationField {
    const ALL: [Self; 9] = [
        Self::CreateIngredient,
        Self::UpdateIngredient,
        Self::DeleteIngredient,
        Self::CreateRecipe,
        Self::AddIngredientToRecipe,
        Self::RemoveIngredientFromRecipe,
        Self::TokenAuth,
        Self::VerifyToken,
        Self::RefreshToken,
    ];

    /// Wire name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateIngredient => "createIngredient",
            Self::UpdateIngredient => "updateIngredient",
            Self::DeleteIngredient => "deleteIngredient",
            Self::CreateRecipe => "createRecipe",
            Self::AddIngredientToRecipe => "addIngredientToRecipe",
            Self::RemoveIngredientFromRecipe => "removeIngredientFromRecipe",
            Self::TokenAuth => "tokenAuth",
            Self::VerifyToken => "verifyToken",
            Self::RefreshToken => "refreshToken",
        }
    }

    /// Whether a valid token must accompany the request
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        !matches!(self, Self::TokenAuth | Self::VerifyToken | Self::RefreshToken)
    }

    const fn arguments(self) -> &'static [&'static str] {
        match self {
            Self::CreateIngredient => &["name", "quantity"],
            Self::UpdateIngredient => &["id", "name", "quantity"],
            Self::DeleteIngredient => &["id"],
            Self::CreateRecipe => &["name", "ingredientIds"],
            Self::AddIngredientToRecipe | Self::RemoveIngredientFromRecipe => {
                &["recipeId", "ingredientId"]
            }
            Self::TokenAuth => &["username", "password"],
            Self::VerifyToken | Self::RefreshToken => &["token"],
        }
    }

    const fn shape(self) -> Shape {
        match self {
            Self::CreateIngredient | Self::UpdateIngredient => Shape::IngredientPayload,
            Self::CreateRecipe | Self::AddIngredientToRecipe | Self::RemoveIngredientFromRecipe => {
                Shape::RecipePayload
            }
            Self::DeleteIngredient => Shape::Object(&["ok"]),
            Self::TokenAuth | Self::RefreshToken => {
                Shape::Object(&["token", "payload", "refreshExpiresIn"])
            }
            Self::VerifyToken => Shape::Object(&["payload"]),
        }
    }
}

impl Field {
    /// Look a field up on the given root type
    #[must_use]
    pub fn lookup(operation: OperationType, name: &str) -> Option<Self> {
        match operation {
            OperationType::Query => QueryField::ALL
                .into_iter()
                .find(|f| f.name() == name)
                .map(Self::Query),
            OperationType::Mutation => MutationField::ALL
                .into_iter()
                .find(|f| f.name() == name)
                .map(Self::Mutation),
        }
    }

    /// Wire name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Query(f) => f.name(),
            Self::Mutation(f) => f.name(),
        }
    }

    /// Accepted argument names
    #[must_use]
    pub const fn arguments(self) -> &'static [&'static str] {
        match self {
            Self::Query(f) => f.arguments(),
            Self::Mutation(f) => f.arguments(),
        }
    }

    /// Output shape used to check and apply a selection
    #[must_use]
    pub const fn shape(self) -> Shape {
        match self {
            Self::Query(f) => f.shape(),
            Self::Mutation(f) => f.shape(),
        }
    }

    /// Whether a valid token must accompany the request
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        match self {
            Self::Query(_) => false,
            Self::Mutation(f) => f.requires_auth(),
        }
    }
}
