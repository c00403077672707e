//! # View Controller
//!
//! [`Controller`] turns user actions into store operations. It is the only
//! place that holds UI state, and that state is deliberately small:
//!
//! - which customer (if any) is being edited
//! - which customer (if any) is waiting for delete confirmation
//! - the current search term and status filter
//! - the current theme
//!
//! Every action calls at most one command and then re-renders the whole
//! filtered list through the [`View`]. There is no diffing.
//!
//! Presentation lives behind [`View`], so the same controller drives the
//! terminal client and the recording view used in tests.

use crate::commands::{self, list::CustomerFilter, CmdMessage, CmdResult, Export};
use crate::config::CrmConfig;
use crate::error::Result;
use crate::model::{Customer, CustomerFields, CustomerId, Theme};
use crate::records::RecordStore;
use crate::store::KeyValueStore;

/// Presentation collaborator driven by the [`Controller`].
pub trait View {
    /// Show the (already filtered) customers. `editing` marks the record in the form.
    fn render(&mut self, customers: &[Customer], editing: Option<CustomerId>);

    fn apply_theme(&mut self, theme: Theme);

    /// Success and info notifications.
    fn notify(&mut self, message: &CmdMessage);
}

pub struct Controller<S: KeyValueStore, V: View> {
    store: RecordStore<S>,
    view: V,
    config: CrmConfig,
    editing: Option<CustomerId>,
    pending_delete: Option<CustomerId>,
    filter: CustomerFilter,
    theme: Theme,
}

impl<S: KeyValueStore, V: View> Controller<S, V> {
    pub fn new(backend: S, view: V, config: CrmConfig) -> Self {
        Self {
            store: RecordStore::new(backend),
            view,
            config,
            editing: None,
            pending_delete: None,
            filter: CustomerFilter::default(),
            theme: Theme::default(),
        }
    }

    /// Loads the store, applies the saved theme and renders once.
    pub fn start(&mut self) -> Result<()> {
        self.store.load()?;
        self.theme = self.store.theme()?;
        self.view.apply_theme(self.theme);
        self.refresh()
    }

    /// Form submission: updates the record being edited, or adds a new one.
    pub fn submit(&mut self, mut fields: CustomerFields) -> Result<()> {
        let result = match self.editing.take() {
            Some(id) => commands::update::run(&mut self.store, id, fields.into())?,
            None => {
                if fields.status.is_empty() {
                    fields.status = self.config.default_status.clone();
                }
                commands::add::run(&mut self.store, fields)?
            }
        };
        self.finish(result)
    }

    /// Starts editing `id`. Returns the record so the form can be filled in.
    pub fn begin_edit(&mut self, id: CustomerId) -> Result<Option<Customer>> {
        let Some(customer) = self.store.get(id).cloned() else {
            return Ok(None);
        };
        self.editing = Some(id);
        self.refresh()?;
        Ok(Some(customer))
    }

    pub fn cancel_edit(&mut self) -> Result<()> {
        self.editing = None;
        self.refresh()
    }

    /// First step of a delete: remembers `id` and returns the record to confirm.
    pub fn request_delete(&mut self, id: CustomerId) -> Option<Customer> {
        let customer = self.store.get(id).cloned()?;
        self.pending_delete = Some(id);
        Some(customer)
    }

    /// Second step of a delete. Does nothing without a pending request.
    pub fn confirm_delete(&mut self) -> Result<()> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(());
        };
        if self.editing == Some(id) {
            self.editing = None;
        }
        let result = commands::delete::run(&mut self.store, id)?;
        self.finish(result)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn set_search(&mut self, query: impl Into<String>) -> Result<()> {
        self.filter.search = Some(query.into());
        self.refresh()
    }

    /// `None` or an empty status shows every status.
    pub fn set_status_filter(&mut self, status: Option<String>) -> Result<()> {
        self.filter.status = status;
        self.refresh()
    }

    pub fn toggle_theme(&mut self) -> Result<()> {
        let next = self.theme.toggle();
        self.set_theme(next)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        let result = commands::theme::set(&mut self.store, theme)?;
        self.theme = theme;
        self.view.apply_theme(theme);
        self.notify_all(&result);
        Ok(())
    }

    /// Replaces every record with the contents of an imported file.
    pub fn import(&mut self, raw: &str) -> Result<()> {
        self.editing = None;
        self.pending_delete = None;
        let result = commands::import::run(&mut self.store, raw)?;
        self.finish(result)
    }

    /// Exports under `target`, or the configured export filename when `None`.
    pub fn export(&mut self, target: Option<&str>) -> Result<Export> {
        let filename = target.unwrap_or(&self.config.export_filename).to_string();
        let result = commands::export::run(&self.store, &filename)?;
        self.notify_all(&result);
        Ok(result.export.unwrap_or(Export {
            filename,
            contents: Vec::new(),
        }))
    }

    /// Re-renders the current filtered view.
    pub fn refresh(&mut self) -> Result<()> {
        let listed = commands::list::run(&self.store, &self.filter)?.listed_customers;
        self.view.render(&listed, self.editing);
        Ok(())
    }

    pub fn editing(&self) -> Option<CustomerId> {
        self.editing
    }

    pub fn pending_delete(&self) -> Option<CustomerId> {
        self.pending_delete
    }

    pub fn filter(&self) -> &CustomerFilter {
        &self.filter
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn config(&self) -> &CrmConfig {
        &self.config
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn finish(&mut self, result: CmdResult) -> Result<()> {
        self.notify_all(&result);
        self.refresh()
    }

    fn notify_all(&mut self, result: &CmdResult) {
        for message in &result.messages {
            self.view.notify(message);
        }
    }
}
