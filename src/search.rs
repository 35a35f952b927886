// ABOUTME: Search coordinator merging concurrent catalog and recipe result streams
// ABOUTME: Owns query, tab, add/remove/replace transitions, and ranking of recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

//! Search coordinator
//!
//! Runs the two source searches concurrently and fans their batch streams
//! into one accumulated result list, republishing the combined list
//! (`general_results` + `added_items`) to the [`SelectionStore`] on every
//! merge step. Also owns the transitions between the "found" and "selected"
//! sets: adding an id already selected replaces the earlier entry, removing
//! moves it back into the results.
//!
//! A new `search()` does not cancel a previous one; a late batch from a
//! superseded query can still land and be merged. That matches the observed
//! behavior of the design this engine implements and callers wanting
//! "most recent query wins" semantics must layer that on themselves.

use crate::errors::AppResult;
use crate::meals::MealAggregator;
use crate::models::{DayTime, FoodItem, Meal, Recipe};
use crate::selection::SelectionStore;
use crate::sources::{FoodCatalogSource, RecipeStore};
use chrono::NaiveDate;
use futures_util::{stream, StreamExt};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

/// Which result view is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchTab {
    /// Merged catalog + recipe results
    #[default]
    All,
    /// The user's own recipes, filtered by the query
    OwnedRecipes,
}

/// Lifecycle of the current search operation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// No search dispatched yet
    #[default]
    Idle,
    /// At least one source stream is still running
    Loading,
    /// Both source streams completed without error
    Ready,
    /// A source emitted an error batch; carries the source's message.
    /// Batches merged before the failure are kept.
    Failed(String),
}

/// Observable state of the coordinator
#[derive(Debug, Clone, Default)]
pub struct SearchSnapshot {
    /// Current query text
    pub query: String,
    /// Active result view
    pub tab: SearchTab,
    /// Accumulated merged results from both sources
    pub general_results: Vec<FoodItem>,
    /// Own recipes filtered and ranked by the query
    pub owned_recipe_results: Vec<Recipe>,
    /// Items the user has selected for the meal
    pub added_items: Vec<FoodItem>,
    /// Whether a search was dispatched this session
    pub has_searched: bool,
    /// Query text of the most recent dispatch
    pub last_searched_query: Option<String>,
    /// Lifecycle of the current search
    pub status: SearchStatus,
}

impl SearchSnapshot {
    /// The combined list: results plus selected items, disjoint by id
    #[must_use]
    pub fn combined(&self) -> Vec<FoodItem> {
        let mut combined = self.general_results.clone();
        combined.extend(self.added_items.iter().cloned());
        combined
    }
}

struct SearchState {
    snapshot: SearchSnapshot,
    /// Last full owned-recipes list seen from the store subscription
    owned_all: Vec<Recipe>,
}

/// Coordinates query text, tab selection, concurrent search streams, and the
/// selected-item set for one compose session
pub struct SearchCoordinator {
    catalog: Arc<dyn FoodCatalogSource>,
    recipes: Arc<dyn RecipeStore>,
    aggregator: MealAggregator,
    selection: SelectionStore,
    language: String,
    target_meal_id: Option<String>,
    inner: Arc<Mutex<SearchState>>,
    tx: Arc<watch::Sender<SearchSnapshot>>,
    owned_task: Mutex<Option<JoinHandle<()>>>,
}

impl SearchCoordinator {
    /// Create a coordinator for a fresh compose session
    #[must_use]
    pub fn new(
        catalog: Arc<dyn FoodCatalogSource>,
        recipes: Arc<dyn RecipeStore>,
        aggregator: MealAggregator,
        selection: SelectionStore,
    ) -> Self {
        let (tx, _rx) = watch::channel(SearchSnapshot::default());
        Self {
            catalog,
            recipes,
            aggregator,
            selection,
            language: "en".to_owned(),
            target_meal_id: None,
            inner: Arc::new(Mutex::new(SearchState {
                snapshot: SearchSnapshot::default(),
                owned_all: Vec::new(),
            })),
            tx: Arc::new(tx),
            owned_task: Mutex::new(None),
        }
    }

    /// Set the catalog search language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Target an existing meal: `submit` will append to it instead of
    /// creating a new one
    #[must_use]
    pub fn for_meal(mut self, meal_id: impl Into<String>) -> Self {
        self.target_meal_id = Some(meal_id.into());
        self
    }

    /// Subscribe to coordinator state; sees the current snapshot immediately
    #[must_use]
    pub fn observe(&self) -> watch::Receiver<SearchSnapshot> {
        self.tx.subscribe()
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> SearchSnapshot {
        self.inner.lock().await.snapshot.clone()
    }

    /// Update the query text; does not dispatch a search by itself
    ///
    /// While the owned-recipes tab is active the ranked view re-filters
    /// continuously against the new text.
    pub async fn change_query(&self, text: impl Into<String> + Send) {
        let mut state = self.inner.lock().await;
        state.snapshot.query = text.into();
        if state.snapshot.tab == SearchTab::OwnedRecipes {
            state.snapshot.owned_recipe_results =
                filter_and_sort(&state.owned_all, &state.snapshot.query);
        }
        publish(&state.snapshot, &self.tx, &self.selection);
    }

    /// Dispatch both source searches and merge their batch streams
    ///
    /// No-op if the query is blank. The merge accumulates: every successful
    /// batch grows `general_results` and republishes the combined list; an
    /// error batch flips the status to [`SearchStatus::Failed`] without
    /// discarding batches already merged. The operation stays
    /// [`SearchStatus::Loading`] until both streams finish.
    pub async fn search(&self) {
        let query = {
            let mut state = self.inner.lock().await;
            let query = state.snapshot.query.trim().to_owned();
            if query.is_empty() {
                return;
            }
            state.snapshot.has_searched = true;
            state.snapshot.last_searched_query = Some(query.clone());
            state.snapshot.general_results.clear();
            state.snapshot.status = SearchStatus::Loading;
            publish(&state.snapshot, &self.tx, &self.selection);
            query
        };

        tracing::info!(%query, "dispatching concurrent catalog and recipe search");
        let catalog_stream = self.catalog.search(&query, &self.language).await;
        let recipe_stream = self.recipes.search(&query).await;

        let inner = Arc::clone(&self.inner);
        let tx = Arc::clone(&self.tx);
        let selection = self.selection.clone();
        tokio::spawn(async move {
            let catalog = catalog_stream.map(|batch| {
                batch.map(|products| {
                    products
                        .into_iter()
                        .map(FoodItem::Product)
                        .collect::<Vec<_>>()
                })
            });
            let recipes = recipe_stream.map(|batch| {
                batch.map(|found| found.into_iter().map(FoodItem::Recipe).collect::<Vec<_>>())
            });
            let mut merged = stream::select(catalog, recipes);

            let mut failed = false;
            while let Some(batch) = merged.next().await {
                let mut state = inner.lock().await;
                match batch {
                    Ok(items) => {
                        merge_batch(&mut state.snapshot, items);
                    }
                    Err(error) => {
                        tracing::warn!(%error, "search source emitted an error batch");
                        failed = true;
                        state.snapshot.status = SearchStatus::Failed(error.message);
                    }
                }
                publish(&state.snapshot, &tx, &selection);
            }

            let mut state = inner.lock().await;
            if !failed {
                state.snapshot.status = SearchStatus::Ready;
            }
            tracing::debug!(
                results = state.snapshot.general_results.len(),
                failed,
                "search streams completed"
            );
            publish(&state.snapshot, &tx, &selection);
        });
    }

    /// Switch between the merged view and the owned-recipes view
    ///
    /// Selecting the owned-recipes tab opens a live subscription to the
    /// recipe store so the ranked view keeps following collection changes,
    /// independent of whether `search()` was ever dispatched. The previous
    /// subscription, if any, is dropped.
    pub async fn select_tab(&self, tab: SearchTab) {
        {
            let mut state = self.inner.lock().await;
            state.snapshot.tab = tab;
            publish(&state.snapshot, &self.tx, &self.selection);
        }

        let mut guard = self.owned_task.lock().await;
        if let Some(handle) = guard.take() {
            handle.abort();
        }
        if tab == SearchTab::OwnedRecipes {
            let mut owned_stream = self.recipes.observe_owned().await;
            let inner = Arc::clone(&self.inner);
            let tx = Arc::clone(&self.tx);
            let selection = self.selection.clone();
            *guard = Some(tokio::spawn(async move {
                while let Some(list) = owned_stream.next().await {
                    let mut state = inner.lock().await;
                    state.snapshot.owned_recipe_results =
                        filter_and_sort(&list, &state.snapshot.query);
                    state.owned_all = list;
                    publish(&state.snapshot, &tx, &selection);
                }
            }));
        }
    }

    /// Select an item: moves it from the results into the selected set
    ///
    /// If the id is already selected the earlier entry is replaced by this
    /// one, never duplicated.
    pub async fn add_item(&self, item: FoodItem) {
        let mut state = self.inner.lock().await;
        let id = item.id().to_owned();
        state.snapshot.general_results.retain(|e| e.id() != id);
        state.snapshot.added_items.retain(|e| e.id() != id);
        state.snapshot.added_items.push(item);
        tracing::debug!(%id, "item added to selection");
        publish(&state.snapshot, &self.tx, &self.selection);
    }

    /// Deselect an item: moves it from the selected set back into the results
    pub async fn remove_item(&self, item: &FoodItem) {
        let mut state = self.inner.lock().await;
        let before = state.snapshot.added_items.len();
        state.snapshot.added_items.retain(|e| e.id() != item.id());
        let was_selected = state.snapshot.added_items.len() != before;
        if was_selected
            && !state
                .snapshot
                .general_results
                .iter()
                .any(|e| e.id() == item.id())
        {
            state.snapshot.general_results.push(item.clone());
        }
        tracing::debug!(id = item.id(), "item removed from selection");
        publish(&state.snapshot, &self.tx, &self.selection);
    }

    /// Reset query, results, selection, and search flags to initial
    pub async fn clear(&self) {
        let mut state = self.inner.lock().await;
        state.snapshot.query.clear();
        state.snapshot.general_results.clear();
        state.snapshot.added_items.clear();
        state.snapshot.owned_recipe_results = filter_and_sort(&state.owned_all, "");
        state.snapshot.has_searched = false;
        state.snapshot.last_searched_query = None;
        state.snapshot.status = SearchStatus::Idle;
        publish(&state.snapshot, &self.tx, &self.selection);
    }

    /// Persist the current selection as a meal for the given date
    ///
    /// Delegates to the [`MealAggregator`]; on success the session is
    /// cleared. On failure the selection is left untouched so the user can
    /// retry.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `day_time` is absent or nothing is
    /// selected, and a storage error if persisting fails.
    pub async fn submit(&self, day_time: Option<DayTime>, date: NaiveDate) -> AppResult<Meal> {
        let added = self.inner.lock().await.snapshot.added_items.clone();
        let meal = self
            .aggregator
            .submit(&added, day_time, self.target_meal_id.as_deref(), date)
            .await?;
        self.clear().await;
        Ok(meal)
    }
}

/// Append a successful batch, keeping ids unique across both sets
fn merge_batch(snapshot: &mut SearchSnapshot, items: Vec<FoodItem>) {
    let mut appended = 0usize;
    for item in items {
        let id_taken = snapshot.general_results.iter().any(|e| e.id() == item.id())
            || snapshot.added_items.iter().any(|e| e.id() == item.id());
        if !id_taken {
            snapshot.general_results.push(item);
            appended += 1;
        }
    }
    tracing::debug!(
        appended,
        total = snapshot.general_results.len(),
        "merged search batch"
    );
}

fn publish(
    snapshot: &SearchSnapshot,
    tx: &watch::Sender<SearchSnapshot>,
    selection: &SelectionStore,
) {
    selection.update(snapshot.combined());
    tx.send_replace(snapshot.clone());
}

/// Lowercase, trim, and collapse internal whitespace
fn normalize(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Filter recipes by the query and sort by match relevance
///
/// A blank query sorts alphabetically by normalized name. Otherwise each
/// recipe gets a `(rank, position, name)` tuple: rank 0 for a match at the
/// start of the name, rank 1 right after a whitespace boundary, rank 2 for
/// any other occurrence; recipes without a match are excluded. Sorting is
/// ascending by the tuple.
#[must_use]
pub fn filter_and_sort(recipes: &[Recipe], query: &str) -> Vec<Recipe> {
    let query = normalize(query);
    if query.is_empty() {
        let mut sorted = recipes.to_vec();
        sorted.sort_by_key(|r| normalize(&r.name));
        return sorted;
    }

    let mut ranked: Vec<(u8, usize, String, Recipe)> = recipes
        .iter()
        .filter_map(|recipe| {
            let name = normalize(&recipe.name);
            name.find(&query).map(|position| {
                let rank = if position == 0 {
                    0
                } else if name.as_bytes()[position - 1] == b' ' {
                    1
                } else {
                    2
                };
                (rank, position, name, recipe.clone())
            })
        })
        .collect();

    ranked.sort_by(|a, b| (a.0, a.1, &a.2).cmp(&(b.0, b.1, &b.2)));
    ranked.into_iter().map(|(_, _, _, recipe)| recipe).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ServingSizeUnit, Visibility};

    fn recipe(name: &str) -> Recipe {
        Recipe {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.to_owned(),
            calories_per_100: 100.0,
            carbs_per_100: 10.0,
            protein_per_100: 10.0,
            fat_per_100: 10.0,
            servings: 1.0,
            serving_size_unit: ServingSizeUnit::HundredGrams,
            ingredients: Vec::new(),
            description: String::new(),
            visibility: Visibility::Owned,
        }
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Pasta   Pesto "), "pasta pesto");
    }

    #[test]
    fn test_blank_query_sorts_alphabetically() {
        let recipes = vec![recipe("Pesto Sauce"), recipe("Green Pesto")];
        let sorted = filter_and_sort(&recipes, "   ");
        assert_eq!(sorted[0].name, "Green Pesto");
        assert_eq!(sorted[1].name, "Pesto Sauce");
    }

    #[test]
    fn test_ranking_by_tuple_rule() {
        let recipes = vec![
            recipe("Pasta Pesto"),
            recipe("Pesto Sauce"),
            recipe("Green Pesto"),
        ];
        let sorted = filter_and_sort(&recipes, "pesto");
        // Rank 0 for the position-0 match; the two rank-1 matches share
        // position 6 and fall back to the name tiebreak.
        let names: Vec<&str> = sorted.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Pesto Sauce", "Green Pesto", "Pasta Pesto"]);
    }

    #[test]
    fn test_non_matching_recipes_are_excluded() {
        let recipes = vec![recipe("Tomato Soup"), recipe("Pesto Sauce")];
        let sorted = filter_and_sort(&recipes, "pesto");
        assert_eq!(sorted.len(), 1);
        assert_eq!(sorted[0].name, "Pesto Sauce");
    }

    #[test]
    fn test_mid_word_match_ranks_last() {
        let recipes = vec![
            recipe("Supesto Mix"),
            recipe("Pesto Sauce"),
            recipe("Green Pesto"),
        ];
        let sorted = filter_and_sort(&recipes, "pesto");
        let names: Vec<&str> = sorted.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Pesto Sauce", "Green Pesto", "Supesto Mix"]);
    }
}
