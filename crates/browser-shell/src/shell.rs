//! Shell session
//!
//! Translates [`Command`]s into store actions and renders the results as
//! text. Engine calls complete asynchronously, so navigation commands watch
//! the state until the engine reported the end of the load before their
//! output is produced.

use crate::commands::{Command, HELP};
use anyhow::{bail, Context, Result};
use browser_config::AppConfig;
use browser_engine::LoadUrlFlags;
use browser_state::selectors::{selected_tab, tabs_in_order};
use browser_state::{
    Action, BrowserState, ContentAction, EngineAction, FindResultState, Store, TabId,
    TabListAction, TabSessionState,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

/// Longest wait for the engine to finish a navigation
const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(2);

/// What the caller should do after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

pub struct Shell {
    store: Store,
    config: AppConfig,
}

impl Shell {
    pub fn new(store: Store, config: AppConfig) -> Self {
        Self { store, config }
    }

    pub async fn execute(&mut self, command: Command) -> Result<Outcome> {
        log::debug!("Shell: executing {:?}", command);
        let output = match command {
            Command::Open { url } => {
                let private = self.config.private_by_default;
                self.open(url, private).await?
            }
            Command::Private { url } => self.open(url, true).await?,
            Command::Load { url } => {
                let tab_id = self.selected_tab_id()?;
                self.load(tab_id, url).await;
                self.describe_selected()?
            }
            Command::Select { index } => {
                let tab_id = self.tab_id_at(index)?;
                self.store.dispatch(TabListAction::SelectTab { tab_id });
                self.store.wait_until_idle().await;
                self.describe_selected()?
            }
            Command::Close { index } => {
                let tab_id = match index {
                    Some(index) => self.tab_id_at(index)?,
                    None => self.selected_tab_id()?,
                };
                self.store.dispatch(TabListAction::RemoveTab {
                    tab_id,
                    select_parent_if_exists: self.config.select_parent_on_close,
                });
                self.store.wait_until_idle().await;
                self.list_tabs()
            }
            Command::Back => {
                let tab = self.selected_tab()?;
                if !tab.content.can_go_back {
                    bail!("Nothing to go back to");
                }
                let tab_id = tab.id.clone();
                self.navigate(tab_id.clone(), None, EngineAction::GoBack { tab_id })
                    .await;
                self.describe_selected()?
            }
            Command::Forward => {
                let tab = self.selected_tab()?;
                if !tab.content.can_go_forward {
                    bail!("Nothing to go forward to");
                }
                let tab_id = tab.id.clone();
                self.navigate(tab_id.clone(), None, EngineAction::GoForward { tab_id })
                    .await;
                self.describe_selected()?
            }
            Command::Reload => {
                let tab_id = self.selected_tab_id()?;
                let reload = EngineAction::Reload {
                    tab_id: tab_id.clone(),
                    flags: LoadUrlFlags::empty(),
                };
                self.navigate(tab_id, None, reload).await;
                self.describe_selected()?
            }
            Command::Find { active, total } => {
                let tab_id = self.selected_tab_id()?;
                self.store.dispatch(ContentAction::AddFindResult {
                    tab_id,
                    find_result: FindResultState::new(active, total, true),
                });
                self.store.wait_until_idle().await;
                format!("Match {} of {}", active, total)
            }
            Command::Tabs => self.list_tabs(),
            Command::State => serde_json::to_string_pretty(&state_json(&self.store.state()))
                .context("Failed to serialize state")?,
            Command::Help => help(),
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Continue(output))
    }

    async fn open(&mut self, url: Option<String>, private: bool) -> Result<String> {
        let url = url.unwrap_or_else(|| self.config.homepage.clone());
        let tab = if private {
            TabSessionState::private(url.clone())
        } else {
            TabSessionState::new(url.clone())
        }
        .with_tracking_protection(self.config.tracking_protection);
        let tab_id = tab.id.clone();

        self.store
            .dispatch(TabListAction::AddTab { tab, select: true });
        self.store.wait_until_idle().await;
        self.load(tab_id, url).await;
        self.describe_selected()
    }

    async fn load(&self, tab_id: TabId, url: String) {
        let load = EngineAction::LoadUrl {
            tab_id: tab_id.clone(),
            url: url.clone(),
            flags: LoadUrlFlags::empty(),
        };
        self.navigate(tab_id, Some(url), load).await;
    }

    /// Dispatch `action` and wait until the engine finished loading a page in
    /// `tab_id`, optionally `url`
    async fn navigate(&self, tab_id: TabId, url: Option<String>, action: impl Into<Action>) {
        let before = self.store.state().tabs.get(&tab_id).cloned();
        let mut states = self.store.watch();
        self.store.dispatch(action);

        let loaded = states.wait_for(|state| {
            state.tabs.get(&tab_id).is_some_and(|tab| {
                let changed = before.as_ref().map_or(true, |before| !Arc::ptr_eq(before, tab));
                changed
                    && !tab.content.loading
                    && tab.content.progress == 100
                    && url.as_ref().map_or(true, |url| tab.content.url == *url)
            })
        });
        match tokio::time::timeout(NAVIGATION_TIMEOUT, loaded).await {
            Ok(Ok(_)) => {}
            Ok(Err(_)) => log::warn!("Shell: store closed while tab {} was loading", tab_id),
            Err(_) => log::warn!(
                "Shell: tab {} did not finish loading within {:?}",
                tab_id,
                NAVIGATION_TIMEOUT
            ),
        }
        self.store.wait_until_idle().await;
    }

    fn selected_tab(&self) -> Result<Arc<TabSessionState>> {
        let state = self.store.state();
        state
            .selected_tab_id
            .as_ref()
            .and_then(|tab_id| state.tabs.get(tab_id))
            .cloned()
            .context("No tab selected")
    }

    fn selected_tab_id(&self) -> Result<TabId> {
        match &self.store.state().selected_tab_id {
            Some(tab_id) => Ok(tab_id.clone()),
            None => bail!("No tab selected"),
        }
    }

    fn tab_id_at(&self, index: usize) -> Result<TabId> {
        let state = self.store.state();
        let tab = index
            .checked_sub(1)
            .and_then(|position| tabs_in_order(&state).nth(position))
            .with_context(|| format!("No tab {}", index))?;
        Ok(tab.id.clone())
    }

    fn describe_selected(&self) -> Result<String> {
        let state = self.store.state();
        let tab = selected_tab(&state).context("No tab selected")?;
        Ok(describe_tab(tab))
    }

    fn list_tabs(&self) -> String {
        let state = self.store.state();
        if state.tab_order.is_empty() {
            return "No tabs".to_string();
        }
        tabs_in_order(&state)
            .enumerate()
            .map(|(i, tab)| {
                let marker = if state.selected_tab_id.as_ref() == Some(&tab.id) {
                    '*'
                } else {
                    ' '
                };
                format!("{} {}. {}", marker, i + 1, describe_tab(tab))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn describe_tab(tab: &TabSessionState) -> String {
    let mut flags = String::new();
    if tab.is_private() {
        flags.push_str("[private] ");
    }
    if tab.content.loading {
        flags.push_str("[loading] ");
    }
    if tab.engine_state.crashed {
        flags.push_str("[crashed] ");
    }
    let title = if tab.content.title.is_empty() {
        "(untitled)"
    } else {
        tab.content.title.as_str()
    };
    format!("{}{} - {}", flags, title, tab.content.url)
}

fn help() -> String {
    HELP.iter()
        .map(|(command, usage, description)| {
            format!("{:<24}{}", format!("{} {}", command, usage), description)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// JSON view of the parts of the state a user cares about
pub fn state_json(state: &BrowserState) -> Value {
    let tabs: Vec<Value> = tabs_in_order(state)
        .map(|tab| {
            json!({
                "id": tab.id.as_str(),
                "url": tab.content.url,
                "title": tab.content.title,
                "private": tab.is_private(),
                "loading": tab.content.loading,
                "progress": tab.content.progress,
                "can_go_back": tab.content.can_go_back,
                "can_go_forward": tab.content.can_go_forward,
                "find_results": tab.content.find_results.len(),
                "tracking_protection": tab.tracking_protection.enabled,
                "engine_session": tab.engine_state.engine_session.is_some(),
                "crashed": tab.engine_state.crashed,
                "last_access": tab.last_access,
            })
        })
        .collect();

    json!({
        "version": state.version,
        "selected_tab_id": state.selected_tab_id.as_ref().map(TabId::as_str),
        "tabs": tabs,
        "custom_tabs": state.custom_tabs.len(),
        "downloads": state.downloads.len(),
    })
}
