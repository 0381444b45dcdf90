//! Tab List Reducer
//!
//! Handles adding, selecting, moving and removing tabs. Removing tabs also
//! drops every reference to them (selection, media, download owners) in the
//! same reduction, so no published state ever points at a removed tab.

use super::{clear_download_owners, clear_orphaned_media};
use crate::actions::TabListAction;
use crate::state::{BrowserState, TabId, TabSessionState};
use std::collections::HashSet;
use std::sync::Arc;

/// Reduce tab list state based on TabListAction
pub fn reduce_tab_list(mut state: Arc<BrowserState>, action: &TabListAction) -> Arc<BrowserState> {
    match action {
        TabListAction::AddTab { tab, select } => {
            if state.contains_session(&tab.id) {
                log::warn!("AddTab: tab {} already exists", tab.id);
                return state;
            }
            let s = Arc::make_mut(&mut state);
            insert_tab(s, tab.clone());
            if *select || s.selected_tab_id.is_none() {
                s.selected_tab_id = Some(tab.id.clone());
            }
        }

        TabListAction::AddMultipleTabs { tabs } => {
            let tabs = new_tabs(&state, tabs);
            let Some(first_id) = tabs.first().map(|tab| tab.id.clone()) else {
                return state;
            };
            let s = Arc::make_mut(&mut state);
            for tab in tabs {
                append_tab(s, tab);
            }
            if s.selected_tab_id.is_none() {
                s.selected_tab_id = Some(first_id);
            }
        }

        TabListAction::SelectTab { tab_id } => {
            if !state.contains_tab(tab_id) {
                log::warn!("SelectTab: tab {} not found", tab_id);
                return state;
            }
            if state.selected_tab_id.as_ref() != Some(tab_id) {
                Arc::make_mut(&mut state).selected_tab_id = Some(tab_id.clone());
            }
        }

        TabListAction::RemoveTab {
            tab_id,
            select_parent_if_exists,
        } => {
            return remove_tabs(state, std::slice::from_ref(tab_id), *select_parent_if_exists);
        }

        TabListAction::RemoveTabs { tab_ids } => {
            return remove_tabs(state, tab_ids, false);
        }

        TabListAction::RemoveAllTabs => {
            let ids = state.tab_order.clone();
            return remove_tabs(state, &ids, false);
        }

        TabListAction::RemoveAllNormalTabs => {
            let ids = tab_ids_matching(&state, |tab| !tab.is_private());
            return remove_tabs(state, &ids, false);
        }

        TabListAction::RemoveAllPrivateTabs => {
            let ids = tab_ids_matching(&state, |tab| tab.is_private());
            return remove_tabs(state, &ids, false);
        }

        TabListAction::MoveTabs {
            tab_ids,
            target_tab_id,
            place_after,
        } => {
            if !state.contains_tab(target_tab_id) || tab_ids.contains(target_tab_id) {
                return state;
            }
            // Keep the moved tabs in their current display order
            let moving: Vec<TabId> = state
                .tab_order
                .iter()
                .filter(|id| tab_ids.contains(id))
                .cloned()
                .collect();
            if moving.is_empty() {
                return state;
            }
            let s = Arc::make_mut(&mut state);
            s.tab_order.retain(|id| !tab_ids.contains(id));
            let Some(target_index) = s.tab_order.iter().position(|id| id == target_tab_id) else {
                return state;
            };
            let insert_at = if *place_after {
                target_index + 1
            } else {
                target_index
            };
            s.tab_order.splice(insert_at..insert_at, moving);
        }

        TabListAction::Restore {
            tabs,
            selected_tab_id,
        } => {
            let tabs = new_tabs(&state, tabs);
            let s = Arc::make_mut(&mut state);
            for tab in tabs {
                append_tab(s, tab);
            }
            if let Some(selected) = selected_tab_id {
                if s.tabs.contains_key(selected) {
                    s.selected_tab_id = Some(selected.clone());
                }
            }
            log::debug!("Restored tabs, {} tabs open", s.tab_order.len());
        }

        TabListAction::RestoreComplete => {
            if !state.flags.restore_complete {
                Arc::make_mut(&mut state).flags.restore_complete = true;
            }
        }
    }
    state
}

/// Tabs from `tabs` whose ids are neither in `state` nor repeated earlier in `tabs`
fn new_tabs(state: &BrowserState, tabs: &[TabSessionState]) -> Vec<TabSessionState> {
    let mut seen = HashSet::new();
    tabs.iter()
        .filter(|tab| !state.contains_session(&tab.id) && seen.insert(tab.id.clone()))
        .cloned()
        .collect()
}

fn tab_ids_matching(state: &BrowserState, predicate: impl Fn(&TabSessionState) -> bool) -> Vec<TabId> {
    state
        .tab_order
        .iter()
        .filter(|id| state.tabs.get(*id).is_some_and(|tab| predicate(tab.as_ref())))
        .cloned()
        .collect()
}

/// Insert right after the parent when the parent is open, else append
fn insert_tab(state: &mut BrowserState, tab: TabSessionState) {
    let parent_index = tab
        .parent_id
        .as_ref()
        .and_then(|parent| state.tab_order.iter().position(|id| id == parent));

    match parent_index {
        Some(index) => {
            state.tab_order.insert(index + 1, tab.id.clone());
            register_tab(state, Arc::new(tab));
        }
        None => append_tab(state, tab),
    }
}

fn append_tab(state: &mut BrowserState, tab: TabSessionState) {
    state.tab_order.push(tab.id.clone());
    register_tab(state, Arc::new(tab));
}

/// Insert a tab whose id is already in `tab_order`
pub(super) fn register_tab(state: &mut BrowserState, tab: Arc<TabSessionState>) {
    if tab.is_private() {
        state.flags.private_tabs_opened += 1;
    }
    state.tabs.insert(tab.id.clone(), tab);
}

fn remove_tabs(
    mut state: Arc<BrowserState>,
    tab_ids: &[TabId],
    select_parent_if_exists: bool,
) -> Arc<BrowserState> {
    let removed: HashSet<&TabId> = tab_ids
        .iter()
        .filter(|id| state.tabs.contains_key(*id))
        .collect();
    if removed.is_empty() {
        return state;
    }

    let selected_tab_id = match &state.selected_tab_id {
        Some(selected) if removed.contains(selected) => {
            find_new_selected_tab_id(&state, selected, &removed, select_parent_if_exists)
        }
        other => other.clone(),
    };

    let s = Arc::make_mut(&mut state);
    for id in &removed {
        s.tabs.remove(*id);
    }
    s.tab_order.retain(|id| !removed.contains(id));
    s.selected_tab_id = selected_tab_id;
    clear_orphaned_media(s);
    clear_download_owners(s);

    log::debug!("Removed {} tab(s), {} left", removed.len(), s.tab_order.len());
    state
}

/// Pick the tab to select after the selected tab `removed_id` goes away
///
/// Order of preference:
/// 1. the parent, when requested and still open
/// 2. the closest tab of the same privacy before it in display order
/// 3. the closest tab of the same privacy after it
/// 4. nothing
fn find_new_selected_tab_id(
    state: &BrowserState,
    removed_id: &TabId,
    removed: &HashSet<&TabId>,
    select_parent_if_exists: bool,
) -> Option<TabId> {
    let removed_tab = state.tabs.get(removed_id)?;

    if select_parent_if_exists {
        if let Some(parent) = &removed_tab.parent_id {
            if state.tabs.contains_key(parent) && !removed.contains(parent) {
                return Some(parent.clone());
            }
        }
    }

    let private = removed_tab.is_private();
    let index = state.tab_order.iter().position(|id| id == removed_id)?;
    let candidate = |id: &&TabId| {
        !removed.contains(*id)
            && state
                .tabs
                .get(*id)
                .is_some_and(|tab| tab.is_private() == private)
    };

    state.tab_order[..index]
        .iter()
        .rev()
        .find(&candidate)
        .or_else(|| state.tab_order[index + 1..].iter().find(&candidate))
        .cloned()
}
