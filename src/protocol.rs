// Wire types shared by the WebSocket session protocol and the decision
// service: the inbound client envelope and the Orders structure that both
// the external decision endpoint and the client receive.

use serde::{Deserialize, Serialize};

// ── Inbound envelope ─────────────────────────────────────────────────

/// A message received from the game client over the WebSocket.
///
/// The client sends JSON text frames shaped `{ "type": ..., "data": ... }`.
/// Unknown `type` tags fail deserialization and terminate the session.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ClientMessage {
    /// A full game-state snapshot. Replaces any previously held snapshot.
    Gamestate(GameState),
    /// A free-text commander order.
    Command(CommandPayload),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandPayload {
    pub command: String,
}

/// The most recent full game state streamed by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct GameState {
    pub units: Vec<UnitState>,
    /// Free-text battlefield reports generated by the client-side simulation.
    pub messages: Vec<String>,
}

/// A zero-based Cartesian grid cell, owned by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

/// One unit as reported by the client. Field names follow the client's
/// JSON casing.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitState {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: UnitKind,
    pub target: GridPosition,
    pub location: GridPosition,
    pub health: i32,
    pub name: String,
    #[serde(rename = "moveSafely")]
    pub move_safely: bool,
}

/// Unit allegiance as reported by the client. Kinds the client has not
/// agreed on with us deserialize as `Unknown` rather than killing the
/// connection; the classifier treats them as hostile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Friendly,
    Enemy,
    #[serde(other)]
    Unknown,
}

// ── Orders (decision service output, relayed to the client) ──────────

/// The full order set produced by one decision call, relayed verbatim to
/// the client as `{ "orders": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orders {
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub unit: UnitId,
    pub target: Position,
    pub method: MovementMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitId {
    pub id: UnitRef,
}

/// An order addresses a unit either by its two-letter name or by the tile
/// it currently occupies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnitRef {
    Name(UnitName),
    Tile(Position),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitName {
    pub name: String,
}

/// A board position in the client-facing order notation: a capital letter
/// 'A'..'L' and a number 1..12.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub row: String,
    pub column: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementMethod {
    pub method: PathStyle,
}

/// Pathfinding preference: cover-seeking but slower, or direct but riskier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    Safe,
    Fast,
}
