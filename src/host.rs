//! Host integration – HostAgent drives a session from a JSON-lines event stream.
//!
//! ## Role
//!
//! The game server's plugin shim forwards every lifecycle event as one JSON
//! line; the agent dispatches it into the shared [`ExecutesSession`] and writes
//! back whatever the session produced, also as one JSON line.
//!
//! ## Event contract (inbound)
//!
//! | `event`             | Payload keys                              | Effect                    |
//! |---------------------|-------------------------------------------|---------------------------|
//! | `map_start`         | map                                       | load spawns, rebuild      |
//! | `player_connect`    | player                                    | enqueue                   |
//! | `player_disconnect` | player                                    | drop                      |
//! | `player_team`       | player, team                              | record side               |
//! | `round_pre_start`   | *(empty)*                                 | pick scenario             |
//! | `round_start`       | *(empty)*                                 | assign spawns             |
//! | `round_end`         | *(empty)*                                 | –                         |
//! | `add_spawn`         | team, bombsite, position, angle, [name]   | add spawn                 |
//! | `stats`             | *(empty)*                                 | reply with `SessionStats` |
//!
//! ## Output contract
//!
//! One [`SessionOutput`] per line, tagged by `output`. Events with nothing to
//! report (connects, disconnects, failed picks …) produce no line.

use crate::protocol::{HostEvent, SessionOutput};
use crate::session::ExecutesSession;
use anyhow::{Context, Result};
use log::info;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Wraps an [`ExecutesSession`] and drives it from host events.
///
/// The session is shared behind a mutex so the agent can run on a
/// multi-threaded runtime; the lock is held for exactly one event.
pub struct HostAgent {
    session: Arc<Mutex<ExecutesSession>>,
}

impl HostAgent {
    pub fn new(session: Arc<Mutex<ExecutesSession>>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> Arc<Mutex<ExecutesSession>> {
        self.session.clone()
    }

    /// Parse and dispatch one line. Malformed input becomes an `error` output.
    pub fn handle_line(&self, line: &str) -> Option<SessionOutput> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match serde_json::from_str::<HostEvent>(line) {
            Ok(event) => self.session.lock().dispatch(event),
            Err(e) => {
                tracing::debug!(%line, "rejected host event");
                Some(SessionOutput::Error {
                    message: format!("Invalid event: {}", e),
                })
            }
        }
    }

    /// Process events until `reader` is exhausted.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("HostAgent active – waiting for host events");

        let mut lines = reader.lines();
        let mut handled = 0u64;
        while let Some(line) = lines.next_line().await.context("reading host event")? {
            handled += 1;
            if let Some(output) = self.handle_line(&line) {
                write_output(&mut writer, &output).await?;
            }
        }

        info!("HostAgent stream closed after {} line(s)", handled);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Output helper
// ---------------------------------------------------------------------------

/// Serialise `output` as one JSON line and flush it.
async fn write_output<W: AsyncWrite + Unpin>(
    writer: &mut W,
    output: &SessionOutput,
) -> Result<()> {
    let mut payload = serde_json::to_vec(output).context("serialising session output")?;
    payload.push(b'\n');
    writer
        .write_all(&payload)
        .await
        .context("writing session output")?;
    writer.flush().await.context("flushing session output")?;
    Ok(())
}
