//! Command dispatch over the directory service and preference stores.

use std::io::Write;
use std::sync::Arc;

use tracing::{info, warn};

use super::error::CliError;
use super::render::{render_favorites, render_listing, render_theme, render_user_detail};
use super::{Command, FavoritesCommand, ListArgs, ShowArgs, ThemeCommand};
use crate::domain::ports::{
    ColorSchemeSignal, PreferenceStorage, UserDirectorySource, UserListRequest,
};
use crate::domain::{
    FavoritesStore, FetchSlot, ListingState, LoadState, Persisted, ThemeStore, User,
    UserDirectoryService, UserId,
};

/// Wires the service and stores to the terminal.
pub struct App<S, P> {
    directory: UserDirectoryService<S>,
    favorites: FavoritesStore<P>,
    theme: ThemeStore<P>,
}

impl<S, P> App<S, P>
where
    S: UserDirectorySource,
    P: PreferenceStorage + Clone,
{
    /// Load preferences from `storage` and prepare the directory client.
    pub fn new(source: Arc<S>, storage: P, color_scheme: &dyn ColorSchemeSignal) -> Self {
        Self {
            directory: UserDirectoryService::new(source),
            favorites: FavoritesStore::load(storage.clone()),
            theme: ThemeStore::load(storage, color_scheme),
        }
    }

    /// Run `command`, writing its output to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] when a fetch fails, an id is invalid or output
    /// cannot be written.
    pub async fn run(&mut self, command: Command, out: &mut impl Write) -> Result<(), CliError> {
        match command {
            Command::List(args) => self.list(args, out).await,
            Command::Show(args) => self.show(args, out).await,
            Command::Favorites(FavoritesCommand::List) => {
                render_favorites(out, self.favorites.get())?;
                Ok(())
            }
            Command::Favorites(FavoritesCommand::Toggle { id }) => self.toggle_favorite(&id, out),
            Command::Theme(command) => self.theme(command, out),
        }
    }

    async fn list(&self, args: ListArgs, out: &mut impl Write) -> Result<(), CliError> {
        let mut request = UserListRequest::default().with_limit(args.limit);
        if let Some(skip) = args.skip {
            request = request.with_skip(skip);
        }
        if let Some(remote_query) = args.remote_query {
            request = request.with_query(remote_query);
        }

        let mut slot = FetchSlot::default();
        let ticket = slot.begin();
        let result = self.directory.fetch_users(&request).await;
        slot.complete(ticket, result);
        let users = loaded(slot.take())?;

        let favorites = self.favorites.get();
        let candidates: Vec<&User> = users
            .iter()
            .filter(|user| !args.favorites_only || favorites.contains(user.id()))
            .collect();

        let mut state = ListingState::default();
        state.set_query(args.query);
        state.set_sort(args.sort);
        state.set_page(args.page);
        let page = state.derive(candidates);
        if page.number() != args.page {
            info!(
                requested = args.page.get(),
                "requested page is out of range; showing the first page"
            );
        }
        render_listing(out, &page, args.page, &state, favorites)?;
        Ok(())
    }

    async fn show(&self, args: ShowArgs, out: &mut impl Write) -> Result<(), CliError> {
        let mut slot = FetchSlot::default();
        let ticket = slot.begin();
        let result = self.directory.fetch_user_by_raw_id(&args.id).await;
        slot.complete(ticket, result);
        let user = loaded(slot.take())?;

        if args.json {
            serde_json::to_writer_pretty(&mut *out, &user)?;
            writeln!(out)?;
        } else {
            render_user_detail(out, &user, self.favorites.is_favorite(user.id()))?;
        }
        Ok(())
    }

    fn toggle_favorite(&mut self, raw_id: &str, out: &mut impl Write) -> Result<(), CliError> {
        let id: UserId = raw_id.parse()?;
        let toggle = self.favorites.toggle(id);
        let verb = if toggle.is_favorite { "added" } else { "removed" };
        writeln!(out, "{verb} {id}{}", unsaved_note(toggle.persisted))?;
        Ok(())
    }

    fn theme(&mut self, command: ThemeCommand, out: &mut impl Write) -> Result<(), CliError> {
        let persisted = match command {
            ThemeCommand::Show => None,
            ThemeCommand::Toggle => Some(self.theme.toggle()),
            ThemeCommand::Set { theme } => Some(self.theme.set(theme)),
        };
        render_theme(out, self.theme.current())?;
        if persisted == Some(Persisted::No) {
            writeln!(out, "{}", unsaved_note(Persisted::No).trim_start())?;
        }
        Ok(())
    }
}

fn loaded<T>(state: LoadState<T>) -> Result<T, CliError> {
    match state {
        LoadState::Loaded(value) => Ok(value),
        LoadState::Failed(message) => {
            warn!(%message, "fetch failed");
            Err(CliError::Fetch { message })
        }
        LoadState::Loading => Err(CliError::Fetch {
            message: "no response was recorded".to_owned(),
        }),
    }
}

const fn unsaved_note(persisted: Persisted) -> &'static str {
    match persisted {
        Persisted::Yes => "",
        Persisted::No => " (not saved)",
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
