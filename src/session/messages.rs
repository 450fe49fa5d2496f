use actix::prelude::*;
use serde::{Serialize, Deserialize};

use crate::game::display::GameSnapshot;
use crate::game::engine::SubscriptionId;
use crate::game::error::GameError;
use crate::game::state::ClickOutcome;
use crate::game::types::PointId;

/// Commands a front end can issue, one per player gesture.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "action", content = "data")]
pub enum ClientAction {
    SetPointCount(String),
    Play,
    Start(i64),
    Click(PointId),
    ToggleAutoPlay,
}

#[derive(Message)]
#[rtype(result = "Result<(), GameError>")]
pub struct ProcessClientMessage {
    pub msg: ClientAction,
}

#[derive(Message)]
#[rtype(result = "Result<(), GameError>")]
pub struct Start {
    pub count: i64,
}

#[derive(Message)]
#[rtype(result = "ClickOutcome")]
pub struct Click {
    pub id: PointId,
}

#[derive(Message)]
#[rtype(result = "GameSnapshot")]
pub struct GetSnapshot;

/// Register `recipient` for a [`GameStateUpdate`] after every mutation.
#[derive(Message)]
#[rtype(result = "SubscriptionId")]
pub struct Subscribe {
    pub recipient: Recipient<GameStateUpdate>,
}

#[derive(Message)]
#[rtype(result = "bool")]
pub struct Unsubscribe {
    pub id: SubscriptionId,
}

#[derive(Message, Clone, Serialize, Debug)]
#[rtype(result = "()")]
pub struct GameStateUpdate {
    pub snapshot: GameSnapshot,
}
