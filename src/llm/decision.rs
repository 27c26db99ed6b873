// The order request layer: projects accumulated session state into the
// prose brief, sends it with the fixed rules prompt, and parses the
// structured completion back into orders.

use crate::engine::units::classify;
use crate::protocol::{GameState, Orders};

use super::client::LlmClient;
use super::DecisionError;

/// Game rules narrated to the decision service. The terrain layout block
/// must stay in lockstep with the table in `engine::terrain`; a test
/// cross-checks every tile.
pub const SYSTEM_PROMPT: &str = "
You are playing a game called Grid Tactics. The object of the game is to protect your base (located at position A1) from enemy attacks. You have a team of units that you can move around the grid to defend your base.
Enemies will spawn in the far end of the grid (position L12), however, friendly units must avoid that specific tile as they will die if an enemy spawns on top of them.
Each tile of the grid has a specific terrain type, which can affect the movement and combat abilities of your units. Hills, forest, and the base tiles provide good cover. Units engaged in fighting on those tiles will only take a tenth of the damage they would on open ground. However, movement in those tiles is random and there is a 50% risk that the unit will not move when located in such a tile.
Water is impassable and cannot be traversed at all. Neither can two units occupy the same tile. Rember that you can only choose columns A through L and rows 1 through 12.
Each unit has a certain amount of health and ammo. If a unit runs out of either, it will be unable to fight or move.
You can issue commands to your units to move them around the grid and engage in combat with enemy units.
When issued a command, a unit will run a path finding algorithm that either favors safe or fast terrain tiles, it will then move to the new tile and request new orders.
Fighting is engaged as soon as two units are in neighboring tiles.
You may issue one command each to your units.

Here follows the terrain layout.
              COL A\tCOL B\tCOL C\tCOL D\tCOL E\tCOL F\tCOL G\tCOL H\tCOL I\tCOL J\tCOL K\tCOL L
      ROW 1:  base\tground\tground\tground\tforest\tforest\tforest\tground\tground\twater\twater\tground
      ROW 2:  ground\tground\thill\tground\tforest\tforest\tforest\tground\tground\twater\twater\twater
      ROW 3:  ground\twater\twater\tground\tground\tforest\tground\tground\tground\tground\twater\twater
      ROW 4:  ground\twater\twater\twater\tground\tground\tground\thill\tground\tground\tground\tground
      ROW 5:  ground\tground\twater\twater\tground\tground\tground\tground\tforest\tforest\tforest\tground
      ROW 6:  ground\tground\tground\tground\thill\tground\tground\tground\tforest\tforest\tforest\tground
      Row 7:  ground\tforest\tforest\tground\tground\tground\twater\twater\tground\tground\tground\tground
      Row 8:  ground\tforest\tforest\tforest\tground\tground\twater\twater\twater\tground\thill\tground
      Row 9:  ground\tground\tforest\tforest\tground\tground\tground\twater\tground\tground\tground\tground
      Row 10: ground\tground\tground\tground\twater\twater\tground\tground\tground\tforest\tforest\tground
      Row 11: ground\thill\tground\tground\twater\twater\twater\tground\tground\tforest\tforest\tforest
      Row 12: ground\tground\tground\tground\tground\twater\tground\tground\tground\tground\tforest\tground
";

/// Appended to every brief so the completion comes back as the orders
/// schema rather than prose.
const ORDERS_FORMAT: &str = r#"Respond with a single JSON object and no other text:
{"orders": [{"unit": {"id": {"name": "<unit name, two capital letters>"}}, "target": {"row": "<A-L>", "column": <1-12>}, "method": {"method": "<safe or fast>"}}]}
A unit may also be addressed by the tile it occupies: {"unit": {"id": {"row": "<A-L>", "column": <1-12>}}}"#;

/// Project the held snapshot and command log into the prose brief. This is
/// the only game data the decision service ever sees.
pub fn build_brief(snapshot: &GameState, commands: &[String]) -> Result<String, DecisionError> {
    let units = classify(&snapshot.units)?;
    let friends = serde_json::to_string_pretty(&units.friends)?;
    let enemies = serde_json::to_string_pretty(&units.enemies)?;

    Ok(format!(
        "Your base is under attack! This is the order history from your commander, \
        fulfilling these orders is crucial. The orders are in chronological order, \
        so the most recent order is listed last. \n {commands}\n\n\
        There are {report_count} new reports from the battlefield:\n\n{reports}\n\n\n\
        You have {friend_count} units at your command.\
        Their names are: {names}. \
        Here's their current status:\n{friends}\n\n\
        Enemies spotted on the battlefield:\n{enemies}",
        commands = commands.join("\n"),
        report_count = snapshot.messages.len(),
        reports = snapshot.messages.join("\n\n"),
        friend_count = units.friends.len(),
        names = units.friend_names.join(", "),
    ))
}

/// Ask the decision service for orders for the current snapshot and
/// command log. Every failure surfaces as one skipped cycle; nothing here
/// touches session state.
pub async fn request_orders(
    client: &LlmClient,
    snapshot: &GameState,
    commands: &[String],
) -> Result<Orders, DecisionError> {
    let brief = build_brief(snapshot, commands)?;
    let user = format!("{brief}\n\n{ORDERS_FORMAT}");
    let completion = client.complete(SYSTEM_PROMPT, &user).await?;
    let orders: Orders = serde_json::from_str(extract_json(&completion)?)?;
    Ok(orders)
}

/// Extract the JSON object from a completion, tolerating surrounding prose
/// or markdown fences.
fn extract_json(completion: &str) -> Result<&str, DecisionError> {
    let start = completion.find('{').ok_or(DecisionError::NoJson)?;
    let end = completion.rfind('}').ok_or(DecisionError::NoJson)?;
    Ok(&completion[start..=end])
}
