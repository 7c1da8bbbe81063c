//! Entity records mapping 1:1 to the remote tables
//!
//! Records come back from PostgREST with the server-assigned id and
//! timestamps filled in. The `New*` payloads are what gets inserted: they
//! omit every server-generated column so database defaults apply.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Role of a user within a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Member,
}

/// A household group, table `groups`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub invite_code: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `groups`
#[derive(Debug, Clone, Serialize)]
pub struct NewGroup {
    pub name: String,
    pub created_by: String,
}

/// Membership of a user in a group, table `group_members`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: String,
    pub group_id: String,
    pub user_id: String,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

/// Insert payload for `group_members`
#[derive(Debug, Clone, Serialize)]
pub struct NewGroupMember {
    pub group_id: String,
    pub user_id: String,
    pub role: MemberRole,
}

/// A recipe, table `recipes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub group_id: Option<String>,
    pub created_by: String,
    pub title: String,
    pub description: Option<String>,
    pub servings: Option<i32>,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub instructions: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for `recipes`
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewRecipe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub created_by: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cook_time_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One ingredient line of a recipe, table `recipe_ingredients`
///
/// `sort_order` positions the line in the displayed list; positions need not
/// be contiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub id: String,
    pub recipe_id: String,
    pub name: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub sort_order: i32,
}

/// Insert payload for `recipe_ingredients`
#[derive(Debug, Clone, Serialize)]
pub struct NewRecipeIngredient {
    pub recipe_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub sort_order: i32,
}

/// A planned meal, table `meal_plans`
///
/// Either references a recipe or stands alone with a custom title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanEntry {
    pub id: String,
    pub group_id: Option<String>,
    pub created_by: String,
    pub recipe_id: Option<String>,
    pub meal_date: NaiveDate,
    pub meal_type: String,
    pub custom_title: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `meal_plans`
#[derive(Debug, Clone, Serialize)]
pub struct NewMealPlanEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
    pub meal_date: NaiveDate,
    pub meal_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A shopping list item, table `shopping_list`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: String,
    pub created_by: String,
    pub group_id: Option<String>,
    pub name: String,
    pub quantity: Option<String>,
    pub is_checked: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `shopping_list`
#[derive(Debug, Clone, Serialize)]
pub struct NewShoppingListItem {
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

/// A todo, table `todos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub group_id: Option<String>,
    pub created_by: String,
    pub title: String,
    pub is_completed: bool,
    pub priority: i32,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `todos`
#[derive(Debug, Clone, Serialize)]
pub struct NewTodoItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub created_by: String,
    pub title: String,
    pub priority: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}
