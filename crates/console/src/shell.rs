//! Interactive command shell over the profile collection.
//!
//! Reads commands from stdin, renders through [`crate::view`], and
//! drives the form controller for add/edit. Every acknowledged write is
//! followed by a cache invalidation; the shell then waits for the
//! re-fetch so the next render shows the backend's state.

use std::io::Write as _;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use parokya_cache::ProfileCache;
use parokya_client::ProfilesApi;
use parokya_core::{FormPhase, Profile, ProfileForm, ProfileId, SubmitError};

/// A parsed shell command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Show(ProfileId),
    Add,
    Edit(ProfileId),
    Delete(ProfileId),
    Refresh,
    /// Re-submit the retained draft after a failed write.
    Retry,
    /// Discard the retained draft.
    Cancel,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Errors are user-facing strings.
    pub fn parse(line: &str) -> Result<Command, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(String::new());
        };
        let id_arg = |words: &mut std::str::SplitWhitespace<'_>| -> Result<ProfileId, String> {
            let raw = words
                .next()
                .ok_or_else(|| format!("usage: {verb} <id>"))?;
            raw.parse::<ProfileId>()
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| format!("'{raw}' is not a valid profile id"))
        };
        let command = match verb {
            "list" | "ls" => Command::List,
            "show" => Command::Show(id_arg(&mut words)?),
            "add" => Command::Add,
            "edit" => Command::Edit(id_arg(&mut words)?),
            "delete" | "rm" => Command::Delete(id_arg(&mut words)?),
            "refresh" => Command::Refresh,
            "retry" => Command::Retry,
            "cancel" => Command::Cancel,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(format!("unknown command '{other}' (try 'help')")),
        };
        Ok(command)
    }
}

const HELP: &str = "\
Commands:
  list            show all profiles
  show <id>       show one profile in full
  add             add a new profile
  edit <id>       edit an existing profile
  delete <id>     delete a profile
  refresh         re-fetch the collection
  retry           re-submit after a failed save
  cancel          discard a kept draft
  quit            leave";

/// The interactive session: API client + cache + one form controller.
pub struct AdminShell {
    store: Arc<ProfilesApi>,
    cache: Arc<ProfileCache>,
    form: ProfileForm,
}

impl AdminShell {
    pub fn new(store: Arc<ProfilesApi>, cache: Arc<ProfileCache>) -> Self {
        Self {
            store,
            cache,
            form: ProfileForm::new(),
        }
    }

    /// Run the command loop until `quit` or end of input.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!("parokya profile admin (type 'help' for commands)");
        loop {
            prompt("parokya> ")?;
            let Some(line) = lines.next_line().await.context("reading stdin")? else {
                break;
            };
            match Command::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.dispatch(command, &mut lines).await?,
                Err(message) if message.is_empty() => {}
                Err(message) => println!("{message}"),
            }
        }
        Ok(())
    }

    async fn dispatch(
        &mut self,
        command: Command,
        lines: &mut Lines<BufReader<Stdin>>,
    ) -> anyhow::Result<()> {
        match command {
            Command::List => self.show_list().await,
            Command::Show(id) => self.show_one(id).await,
            Command::Add => {
                self.form.open_new();
                self.fill_and_submit(lines).await?;
            }
            Command::Edit(id) => match self.find(id).await {
                Some(profile) => {
                    self.form.open(&profile);
                    self.fill_and_submit(lines).await?;
                }
                None => println!("no profile with id {id}"),
            },
            Command::Delete(id) => self.delete(id).await,
            Command::Refresh => self.refresh_and_render().await,
            Command::Retry => self.submit_once().await,
            Command::Cancel => {
                self.form.cancel();
                println!("draft discarded");
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => unreachable!("handled by the caller"),
        }
        Ok(())
    }

    /// Ensure the first fetch happened, then render the snapshot.
    async fn show_list(&self) {
        self.cache.ensure_loaded();
        if self.cache.snapshot().generation == 0 {
            let _ = self.cache.refreshed_after(0).await;
        }
        println!("{}", crate::view::render_list(&self.cache.snapshot()));
    }

    async fn show_one(&self, id: ProfileId) {
        match self.find(id).await {
            Some(profile) => {
                for line in crate::view::detail_lines(&profile) {
                    println!("  {line}");
                }
            }
            None => println!("no profile with id {id}"),
        }
    }

    async fn find(&self, id: ProfileId) -> Option<Profile> {
        self.cache.ensure_loaded();
        if self.cache.snapshot().generation == 0 {
            let _ = self.cache.refreshed_after(0).await;
        }
        self.cache
            .snapshot()
            .profiles
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    async fn delete(&self, id: ProfileId) {
        match self.store.delete_profile(id).await {
            Ok(()) => {
                // Ack received; now (and only now) drop the cached view.
                self.refresh_and_render().await;
            }
            Err(error) => println!("delete failed: {error}"),
        }
    }

    async fn refresh_and_render(&self) {
        let generation = self.cache.snapshot().generation;
        self.cache.invalidate();
        if let Some(entry) = self.cache.refreshed_after(generation).await {
            println!("{}", crate::view::render_list(&entry));
        }
    }

    /// Walk the form fields, then submit.
    async fn fill_and_submit(
        &mut self,
        lines: &mut Lines<BufReader<Stdin>>,
    ) -> anyhow::Result<()> {
        for (field, label, hint) in FORM_FIELDS {
            loop {
                let current = self.form.draft().get(field).unwrap_or_default().to_string();
                let shown = if current.is_empty() { "-" } else { current.as_str() };
                let suffix = if hint.is_empty() {
                    String::new()
                } else {
                    format!(" ({hint})")
                };
                prompt(&format!("  {label}{suffix} [{shown}]: "))?;
                let Some(input) = lines.next_line().await.context("reading stdin")? else {
                    self.form.cancel();
                    return Ok(());
                };
                let input = input.trim();
                if input.is_empty() {
                    // Keep the current value, but still surface its rule.
                    match self.form.set_field(field, &current) {
                        Some(error) => {
                            println!("  ! {}", error.message);
                            continue;
                        }
                        None => break,
                    }
                }
                let value = if input == "-" { "" } else { input };
                match self.form.set_field(field, value) {
                    Some(error) => println!("  ! {}", error.message),
                    None => break,
                }
            }
        }
        self.submit_once().await;
        Ok(())
    }

    /// One submission attempt; failures keep the draft for `retry`.
    async fn submit_once(&mut self) {
        if self.form.phase() == FormPhase::Idle {
            println!("nothing to submit");
            return;
        }
        match self.form.submit(self.store.as_ref()).await {
            Ok(profile) => {
                println!("saved profile {} ({})", profile.id, profile.full_name());
                self.refresh_and_render().await;
            }
            Err(SubmitError::Invalid(errors)) => {
                for error in errors {
                    println!("  ! {}: {}", error.field, error.message);
                }
            }
            Err(SubmitError::Remote(error)) => {
                println!("save failed: {error}");
                println!("your entries are kept; 'retry' to submit again, 'cancel' to discard");
            }
        }
    }
}

/// Form walk order: wire field, prompt label, input hint.
const FORM_FIELDS: &[(&str, &str, &str)] = &[
    ("first_name", "First name", ""),
    ("last_name", "Last name", ""),
    ("suffix", "Suffix", ""),
    ("birth_date", "Birth date", "YYYY-MM-DD"),
    ("gender", "Gender", "male/female"),
    ("marital_status", "Marital status", "single/married/separated/widowed"),
    ("email", "Email", ""),
    ("contact_number", "Contact number", "11 digits"),
    ("street", "Street", ""),
    ("unit_number", "Unit #", ""),
    ("purok", "Purok", ""),
    ("brgy", "Barangay", ""),
    ("municipality", "City/Municipality", ""),
    ("province", "Province", ""),
];

fn prompt(text: &str) -> anyhow::Result<()> {
    print!("{text}");
    std::io::stdout().flush().context("flushing prompt")?;
    Ok(())
}
