// Per-connection session state: the accumulated command log and the most
// recent game-state snapshot, plus the rule for when a decision dispatch
// is due.
//
// The accumulation contract: nothing is ever cleared while the connection
// lives. Once a snapshot is held and at least one command has arrived,
// every further snapshot or command triggers another dispatch carrying the
// full (growing) command log. State is discarded only when the connection
// closes.

use uuid::Uuid;

use crate::protocol::{ClientMessage, GameState};

/// Observable session phase. `Closed` is represented by dropping the
/// session together with its connection task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Dispatch conditions not yet met.
    Idle,
    /// Snapshot held and command log non-empty; every message dispatches.
    AwaitingDispatch,
}

/// Borrowed view of the state that one decision call operates on.
#[derive(Debug, Clone, Copy)]
pub struct Dispatch<'a> {
    pub snapshot: &'a GameState,
    pub commands: &'a [String],
}

pub struct Session {
    id: Uuid,
    snapshot: Option<GameState>,
    commands: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Session {
            id: Uuid::new_v4(),
            snapshot: None,
            commands: Vec::new(),
        }
    }

    /// Connection-scoped identifier used for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> Phase {
        if self.pending().is_some() {
            Phase::AwaitingDispatch
        } else {
            Phase::Idle
        }
    }

    /// Fold one client message into the session. A new snapshot replaces
    /// the held one; a command appends to the log. Returns the dispatch
    /// that is now due, if any.
    pub fn receive(&mut self, message: ClientMessage) -> Option<Dispatch<'_>> {
        match message {
            ClientMessage::Gamestate(state) => {
                self.snapshot = Some(state);
            }
            ClientMessage::Command(payload) => {
                self.commands.push(payload.command);
            }
        }
        self.pending()
    }

    /// The dispatch that is due right now: present exactly when a snapshot
    /// is held and the command log is non-empty. Reading it does not
    /// consume anything; a failed decision call retries on the next
    /// triggering message with the same snapshot and a longer log.
    pub fn pending(&self) -> Option<Dispatch<'_>> {
        match &self.snapshot {
            Some(snapshot) if !self.commands.is_empty() => Some(Dispatch {
                snapshot,
                commands: &self.commands,
            }),
            _ => None,
        }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::CommandPayload;

    fn empty_state() -> ClientMessage {
        ClientMessage::Gamestate(GameState {
            units: Vec::new(),
            messages: Vec::new(),
        })
    }

    fn command(text: &str) -> ClientMessage {
        ClientMessage::Command(CommandPayload {
            command: text.into(),
        })
    }

    #[test]
    fn test_snapshot_alone_does_not_dispatch() {
        let mut session = Session::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.receive(empty_state()).is_none());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_command_alone_does_not_dispatch() {
        let mut session = Session::new();
        assert!(session.receive(command("hold")).is_none());
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.commands(), ["hold"]);
    }

    #[test]
    fn test_snapshot_then_command_dispatches() {
        let mut session = Session::new();
        assert!(session.receive(empty_state()).is_none());
        let dispatch = session.receive(command("hold")).expect("dispatch due");
        assert_eq!(dispatch.commands, ["hold"]);
        assert_eq!(session.phase(), Phase::AwaitingDispatch);
    }

    #[test]
    fn test_command_then_snapshot_dispatches() {
        let mut session = Session::new();
        assert!(session.receive(command("advance")).is_none());
        let dispatch = session.receive(empty_state()).expect("dispatch due");
        assert_eq!(dispatch.commands, ["advance"]);
    }

    #[test]
    fn test_every_further_message_dispatches_with_growing_log() {
        let mut session = Session::new();
        session.receive(empty_state());
        session.receive(command("first"));

        let dispatch = session.receive(command("second")).expect("dispatch due");
        assert_eq!(dispatch.commands, ["first", "second"]);

        // A replacement snapshot triggers again with the same log.
        let dispatch = session.receive(empty_state()).expect("dispatch due");
        assert_eq!(dispatch.commands, ["first", "second"]);

        let dispatch = session.receive(command("third")).expect("dispatch due");
        assert_eq!(dispatch.commands, ["first", "second", "third"]);
    }

    #[test]
    fn test_snapshot_replaces_previous() {
        let mut session = Session::new();
        session.receive(command("hold"));
        session.receive(ClientMessage::Gamestate(GameState {
            units: Vec::new(),
            messages: vec!["old report".into()],
        }));
        session.receive(ClientMessage::Gamestate(GameState {
            units: Vec::new(),
            messages: vec!["new report".into()],
        }));

        let dispatch = session.pending().expect("dispatch due");
        assert_eq!(dispatch.snapshot.messages, ["new report"]);
    }

    #[test]
    fn test_failed_dispatch_leaves_state_intact() {
        let mut session = Session::new();
        session.receive(empty_state());
        session.receive(command("hold"));

        // A decision failure never mutates the session: the same dispatch
        // is still pending and the log is untouched.
        assert!(session.pending().is_some());
        assert_eq!(session.phase(), Phase::AwaitingDispatch);
        assert_eq!(session.commands(), ["hold"]);
    }
}
