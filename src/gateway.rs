//! The data access gateway: typed CRUD methods, one remote call each
//!
//! Every method builds its filter and ordering, issues a single PostgREST
//! request and unwraps the returned rows. Access control lives remotely in
//! row-level security policies; nothing is enforced or cached here, so reads
//! always reflect the remote store.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::auth::{Session, User};
use crate::error::Error;
use crate::models::*;
use crate::Client;

const GROUPS: &str = "groups";
const GROUP_MEMBERS: &str = "group_members";
const RECIPES: &str = "recipes";
const RECIPE_INGREDIENTS: &str = "recipe_ingredients";
const MEAL_PLANS: &str = "meal_plans";
const SHOPPING_LIST: &str = "shopping_list";
const TODOS: &str = "todos";

/// Gateway to the household data behind Supabase
pub struct HouseholdGateway {
    client: Client,
}

impl HouseholdGateway {
    /// Create a gateway over an initialized client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// The underlying Supabase client
    pub fn client(&self) -> &Client {
        &self.client
    }

    fn creator_id(&self) -> String {
        self.client
            .auth()
            .current_user()
            .map(|user| user.id)
            .unwrap_or_default()
    }

    // ── Session ───────────────────────────────────────────────────────────

    /// Sign in with email and password; `None` when the remote rejects them
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Option<Session>, Error> {
        self.client.auth().sign_in(email, password).await
    }

    /// Sign up with email and password; `None` when no session was issued
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, Error> {
        self.client.auth().sign_up(email, password).await
    }

    /// Sign out and clear the stored session
    pub async fn sign_out(&self) -> Result<(), Error> {
        self.client.auth().sign_out().await
    }

    /// The last-known signed-in user
    pub fn current_user(&self) -> Option<User> {
        self.client.auth().current_user()
    }

    /// The last-known session
    pub fn current_session(&self) -> Option<Session> {
        self.client.auth().current_session()
    }

    /// Whether a user is currently signed in
    pub fn is_authenticated(&self) -> bool {
        self.client.auth().is_authenticated()
    }

    // ── Groups ────────────────────────────────────────────────────────────

    /// List the groups visible to the caller
    pub async fn my_groups(&self) -> Result<Vec<Group>, Error> {
        self.client.from(GROUPS).select("*").execute().await
    }

    /// Create a group and add the creator as its owner
    ///
    /// Two sequential inserts with no transaction: when the membership
    /// insert fails the group still exists remotely without an owner row.
    pub async fn create_group(&self, name: &str) -> Result<Group, Error> {
        let group = NewGroup {
            name: name.trim().to_string(),
            created_by: self.creator_id(),
        };
        let created: Group = self.client.from(GROUPS).insert(&group).execute_one().await?;

        let owner = NewGroupMember {
            group_id: created.id.clone(),
            user_id: self.creator_id(),
            role: MemberRole::Owner,
        };
        self.client
            .from(GROUP_MEMBERS)
            .insert(&owner)
            .execute_one::<GroupMember>()
            .await?;

        info!(group_id = %created.id, "created group");
        Ok(created)
    }

    /// Join a group by invite code
    ///
    /// Returns `Ok(None)` without inserting anything when no group matches.
    pub async fn join_group(&self, invite_code: &str) -> Result<Option<Group>, Error> {
        let group: Option<Group> = self
            .client
            .from(GROUPS)
            .select("*")
            .eq("invite_code", invite_code.trim())
            .execute_one()
            .await?;

        let group = match group {
            Some(group) => group,
            None => return Ok(None),
        };

        let member = NewGroupMember {
            group_id: group.id.clone(),
            user_id: self.creator_id(),
            role: MemberRole::Member,
        };
        self.client
            .from(GROUP_MEMBERS)
            .insert(&member)
            .execute_one::<GroupMember>()
            .await?;

        info!(group_id = %group.id, "joined group");
        Ok(Some(group))
    }

    /// List the members of a group
    pub async fn group_members(&self, group_id: &str) -> Result<Vec<GroupMember>, Error> {
        self.client
            .from(GROUP_MEMBERS)
            .select("*")
            .eq("group_id", group_id)
            .execute()
            .await
    }

    // ── Shopping list ─────────────────────────────────────────────────────

    /// List shopping items, oldest first
    pub async fn shopping_list(&self) -> Result<Vec<ShoppingListItem>, Error> {
        self.client
            .from(SHOPPING_LIST)
            .select("*")
            .order("created_at", true)
            .execute()
            .await
    }

    /// Add a shopping item
    ///
    /// The name is trimmed; a blank or whitespace-only quantity is stored as
    /// absent rather than as an empty string.
    pub async fn add_item(
        &self,
        name: &str,
        quantity: Option<&str>,
        group_id: Option<&str>,
    ) -> Result<ShoppingListItem, Error> {
        let item = NewShoppingListItem {
            created_by: self.creator_id(),
            group_id: group_id.map(str::to_string),
            name: name.trim().to_string(),
            quantity: normalize_optional(quantity),
        };
        self.client
            .from(SHOPPING_LIST)
            .insert(&item)
            .execute_one()
            .await
    }

    /// Flip a shopping item's checked flag and push the full record
    pub async fn toggle_item(&self, item: &ShoppingListItem) -> Result<ShoppingListItem, Error> {
        let mut updated = item.clone();
        updated.is_checked = !item.is_checked;
        self.client
            .from(SHOPPING_LIST)
            .update(&updated)
            .eq("id", &item.id)
            .execute_one()
            .await
    }

    /// Delete a shopping item
    pub async fn delete_item(&self, item: &ShoppingListItem) -> Result<(), Error> {
        self.client
            .from(SHOPPING_LIST)
            .delete()
            .eq("id", &item.id)
            .execute()
            .await
    }

    // ── Recipes ───────────────────────────────────────────────────────────

    /// List recipes, newest first
    pub async fn recipes(&self) -> Result<Vec<Recipe>, Error> {
        self.client
            .from(RECIPES)
            .select("*")
            .order("created_at", false)
            .execute()
            .await
    }

    /// Look up a recipe by id
    pub async fn recipe(&self, id: &str) -> Result<Option<Recipe>, Error> {
        self.client
            .from(RECIPES)
            .select("*")
            .eq("id", id)
            .execute_one()
            .await
    }

    /// Insert a recipe, stamping the current user as creator
    pub async fn add_recipe(&self, mut recipe: NewRecipe) -> Result<Recipe, Error> {
        recipe.created_by = self.creator_id();
        self.client.from(RECIPES).insert(&recipe).execute_one().await
    }

    /// Push a full recipe record with a fresh update timestamp
    pub async fn update_recipe(&self, recipe: &Recipe) -> Result<Recipe, Error> {
        let mut updated = recipe.clone();
        updated.updated_at = Utc::now();
        self.client
            .from(RECIPES)
            .update(&updated)
            .eq("id", &recipe.id)
            .execute_one()
            .await
    }

    /// Delete a recipe
    pub async fn delete_recipe(&self, recipe: &Recipe) -> Result<(), Error> {
        self.client
            .from(RECIPES)
            .delete()
            .eq("id", &recipe.id)
            .execute()
            .await
    }

    // ── Recipe ingredients ────────────────────────────────────────────────

    /// List a recipe's ingredients in display order
    pub async fn recipe_ingredients(
        &self,
        recipe_id: &str,
    ) -> Result<Vec<RecipeIngredient>, Error> {
        self.client
            .from(RECIPE_INGREDIENTS)
            .select("*")
            .eq("recipe_id", recipe_id)
            .order("sort_order", true)
            .execute()
            .await
    }

    /// Insert an ingredient line
    pub async fn add_ingredient(
        &self,
        ingredient: NewRecipeIngredient,
    ) -> Result<RecipeIngredient, Error> {
        self.client
            .from(RECIPE_INGREDIENTS)
            .insert(&ingredient)
            .execute_one()
            .await
    }

    /// Delete an ingredient line
    pub async fn delete_ingredient(&self, ingredient: &RecipeIngredient) -> Result<(), Error> {
        self.client
            .from(RECIPE_INGREDIENTS)
            .delete()
            .eq("id", &ingredient.id)
            .execute()
            .await
    }

    // ── Meal plan ─────────────────────────────────────────────────────────

    /// List meal plan entries with dates in `[week_start, week_end]`, ascending
    pub async fn meal_plan(
        &self,
        week_start: NaiveDate,
        week_end: NaiveDate,
    ) -> Result<Vec<MealPlanEntry>, Error> {
        self.client
            .from(MEAL_PLANS)
            .select("*")
            .gte("meal_date", week_start.format("%Y-%m-%d"))
            .lte("meal_date", week_end.format("%Y-%m-%d"))
            .order("meal_date", true)
            .execute()
            .await
    }

    /// Insert a meal plan entry, stamping the current user as creator
    pub async fn add_meal_plan_entry(
        &self,
        mut entry: NewMealPlanEntry,
    ) -> Result<MealPlanEntry, Error> {
        entry.created_by = self.creator_id();
        self.client
            .from(MEAL_PLANS)
            .insert(&entry)
            .execute_one()
            .await
    }

    /// Delete a meal plan entry
    pub async fn delete_meal_plan_entry(&self, entry: &MealPlanEntry) -> Result<(), Error> {
        self.client
            .from(MEAL_PLANS)
            .delete()
            .eq("id", &entry.id)
            .execute()
            .await
    }

    // ── Todos ─────────────────────────────────────────────────────────────

    /// List todos: incomplete first, then by priority, then newest first
    pub async fn todos(&self) -> Result<Vec<TodoItem>, Error> {
        self.client
            .from(TODOS)
            .select("*")
            .order("is_completed", true)
            .order("priority", false)
            .order("created_at", false)
            .execute()
            .await
    }

    /// Add a todo with a trimmed title
    pub async fn add_todo(
        &self,
        title: &str,
        priority: i32,
        due_date: Option<DateTime<Utc>>,
        group_id: Option<&str>,
    ) -> Result<TodoItem, Error> {
        let item = NewTodoItem {
            group_id: group_id.map(str::to_string),
            created_by: self.creator_id(),
            title: title.trim().to_string(),
            priority,
            due_date,
        };
        self.client.from(TODOS).insert(&item).execute_one().await
    }

    /// Flip a todo's completion flag and push the full record
    pub async fn toggle_todo(&self, item: &TodoItem) -> Result<TodoItem, Error> {
        let mut updated = item.clone();
        updated.is_completed = !item.is_completed;
        self.client
            .from(TODOS)
            .update(&updated)
            .eq("id", &item.id)
            .execute_one()
            .await
    }

    /// Delete a todo
    pub async fn delete_todo(&self, item: &TodoItem) -> Result<(), Error> {
        self.client
            .from(TODOS)
            .delete()
            .eq("id", &item.id)
            .execute()
            .await
    }
}

/// Trim an optional string, mapping blank input to `None`
fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
