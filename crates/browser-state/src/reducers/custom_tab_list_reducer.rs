//! Custom Tab List Reducer

use super::tab_list_reducer::register_tab;
use super::{clear_download_owners, clear_orphaned_media};
use crate::actions::CustomTabListAction;
use crate::state::BrowserState;
use std::sync::Arc;

/// Reduce custom tab state based on CustomTabListAction
pub fn reduce_custom_tab_list(
    mut state: Arc<BrowserState>,
    action: &CustomTabListAction,
) -> Arc<BrowserState> {
    match action {
        CustomTabListAction::AddCustomTab { tab } => {
            if state.contains_session(&tab.id) {
                log::warn!("Custom tab {} already exists", tab.id);
                return state;
            }
            let mut tab = tab.clone();
            tab.custom_tab_config.get_or_insert_with(Default::default);
            Arc::make_mut(&mut state).custom_tabs.push(Arc::new(tab));
            state
        }

        CustomTabListAction::RemoveCustomTab { tab_id } => {
            if !state.contains_custom_tab(tab_id) {
                return state;
            }
            let s = Arc::make_mut(&mut state);
            s.custom_tabs.retain(|tab| &tab.id != tab_id);
            clear_orphaned_media(s);
            clear_download_owners(s);
            state
        }

        CustomTabListAction::RemoveAllCustomTabs => {
            if state.custom_tabs.is_empty() {
                return state;
            }
            let s = Arc::make_mut(&mut state);
            s.custom_tabs.clear();
            clear_orphaned_media(s);
            clear_download_owners(s);
            state
        }

        CustomTabListAction::TurnCustomTabIntoNormalTab { tab_id } => {
            let Some(index) = state.custom_tabs.iter().position(|tab| &tab.id == tab_id) else {
                return state;
            };
            let s = Arc::make_mut(&mut state);
            let mut tab = s.custom_tabs.remove(index);
            Arc::make_mut(&mut tab).custom_tab_config = None;

            s.tab_order.push(tab.id.clone());
            if s.selected_tab_id.is_none() {
                s.selected_tab_id = Some(tab.id.clone());
            }
            register_tab(s, tab);
            state
        }
    }
}
