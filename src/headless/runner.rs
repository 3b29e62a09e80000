//! Headless mode runner - feeds a script through the store line by line

use hearth_core::prelude::*;
use hearth_core::{Avatar, Hearth, User};
use hearth_store::services::DEFAULT_HEARTH_IMAGE;
use hearth_store::{Action, InMemoryBackend, Store};

use super::HeadlessEvent;

/// Dispatch every action in `script`, writing events to `out`
///
/// Each line is fully settled (its effects finished and their outcomes
/// reduced) before the next one is read, so the output is deterministic for
/// a given backend. Unparseable lines are reported and skipped.
pub async fn run_headless<W: std::io::Write>(
    store: &Store,
    script: &str,
    out: &mut W,
) -> Result<()> {
    info!("Hearth store starting in HEADLESS mode");

    let mut dispatched = 0usize;
    for (index, raw) in script.lines().enumerate() {
        let line = index + 1;
        let raw = raw.trim();
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }

        let action = match Action::from_json(raw) {
            Ok(action) => action,
            Err(e) if e.is_recoverable() => {
                warn!("Script line {} rejected: {}", line, e);
                HeadlessEvent::rejected(line, &e).write_to(out)?;
                continue;
            }
            Err(e) => return Err(e),
        };

        HeadlessEvent::dispatched(line, action.kind().as_str()).write_to(out)?;
        store.dispatch(action);
        store.wait_idle().await;
        HeadlessEvent::snapshot(line, &store.state()).write_to(out)?;
        dispatched += 1;
    }

    info!("Headless run finished after {} actions", dispatched);
    Ok(())
}

/// Backend seeded with a small household for trying the store out
///
/// - `alice` / `alice` (admin of "Maison") and `bob` / `bob`
/// - avatars `owl`, `fox`, `cat`
pub fn demo_backend() -> InMemoryBackend {
    let mut maison = Hearth::new(1, "Maison");
    maison.image_name = Some(DEFAULT_HEARTH_IMAGE.to_string());
    maison.admin_user = Some(1);

    InMemoryBackend::new()
        .with_account(User::new(1, "alice").with_avatar("owl"), "alice")
        .with_account(User::new(2, "bob").with_avatar("cat"), "bob")
        .with_avatar(Avatar::new(1, "owl"))
        .with_avatar(Avatar::new(2, "fox"))
        .with_avatar(Avatar::new(3, "cat"))
        .with_hearth(maison, [1, 2])
}
