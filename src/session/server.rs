//! Game session actor.
//!
//! Runs one [`GameEngine`] on the actor's event loop. The engine's periodic
//! processes become `run_interval` handles on the actor context, so every
//! command and every tick is handled on the same single-threaded mailbox.

use actix::prelude::*;
use actix::MessageResult;
use log::{debug, info};
use uuid::Uuid;

#[cfg(test)]
use crate::config::engine::EngineConfig;
use crate::game::engine::GameEngine;
use crate::game::error::GameError;
use crate::game::scheduler::{Scheduler, TimerToken};
use crate::session::messages::{
    ClientAction, Click, GameStateUpdate, GetSnapshot, ProcessClientMessage, Start, Subscribe,
    Unsubscribe,
};

/// [`Scheduler`] backed by the session's actor context.
struct ContextScheduler<'a> {
    ctx: &'a mut Context<GameSession>,
}

impl Scheduler for ContextScheduler<'_> {
    type Handle = SpawnHandle;

    fn schedule(&mut self, token: TimerToken, period: std::time::Duration) -> SpawnHandle {
        self.ctx.run_interval(period, move |act, ctx| act.on_tick(token, ctx))
    }

    fn cancel(&mut self, handle: SpawnHandle) {
        self.ctx.cancel_future(handle);
    }
}

pub struct GameSession {
    pub session_id: Uuid,
    engine: GameEngine<SpawnHandle>,
}

impl Actor for GameSession {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("[GameSession] Session {} started", self.session_id);
    }

    fn stopped(&mut self, ctx: &mut Self::Context) {
        self.engine.shutdown(&mut ContextScheduler { ctx });
        info!("[GameSession] Session {} stopped", self.session_id);
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_engine(GameEngine::new())
    }

    #[cfg(test)]
    pub fn with_config(config: EngineConfig, seed: u64) -> Self {
        use rand::SeedableRng;
        Self::with_engine(GameEngine::with_config(config, rand::rngs::StdRng::seed_from_u64(seed)))
    }

    fn with_engine(engine: GameEngine<SpawnHandle>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            engine,
        }
    }

    fn on_tick(&mut self, token: TimerToken, ctx: &mut Context<Self>) {
        self.engine.fire(token, &mut ContextScheduler { ctx });
    }

    fn apply(&mut self, action: ClientAction, ctx: &mut Context<Self>) -> Result<(), GameError> {
        debug!("[GameSession] {} <- {:?}", self.session_id, action);
        let scheduler = &mut ContextScheduler { ctx };
        match action {
            ClientAction::SetPointCount(raw) => {
                self.engine.set_point_count(&raw);
            }
            ClientAction::Play => self.engine.play(scheduler)?,
            ClientAction::Start(count) => self.engine.start(count, scheduler)?,
            ClientAction::Click(id) => {
                self.engine.click(id, scheduler);
            }
            ClientAction::ToggleAutoPlay => {
                self.engine.toggle_auto_play(scheduler);
            }
        }
        Ok(())
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler<ProcessClientMessage> for GameSession {
    type Result = Result<(), GameError>;

    fn handle(&mut self, msg: ProcessClientMessage, ctx: &mut Context<Self>) -> Self::Result {
        self.apply(msg.msg, ctx)
    }
}

impl Handler<Start> for GameSession {
    type Result = Result<(), GameError>;

    fn handle(&mut self, msg: Start, ctx: &mut Context<Self>) -> Self::Result {
        self.engine.start(msg.count, &mut ContextScheduler { ctx })
    }
}

impl Handler<Click> for GameSession {
    type Result = MessageResult<Click>;

    fn handle(&mut self, msg: Click, ctx: &mut Context<Self>) -> Self::Result {
        MessageResult(self.engine.click(msg.id, &mut ContextScheduler { ctx }))
    }
}

impl Handler<GetSnapshot> for GameSession {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _: GetSnapshot, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.engine.snapshot())
    }
}

impl Handler<Subscribe> for GameSession {
    type Result = MessageResult<Subscribe>;

    fn handle(&mut self, msg: Subscribe, _: &mut Context<Self>) -> Self::Result {
        let recipient = msg.recipient;
        // Late subscribers get the current state straight away.
        recipient.do_send(GameStateUpdate { snapshot: self.engine.snapshot() });
        let id = self.engine.subscribe(move |snapshot| {
            recipient.do_send(GameStateUpdate { snapshot: snapshot.clone() });
        });
        debug!("[GameSession] Subscriber {} registered", id);
        MessageResult(id)
    }
}

impl Handler<Unsubscribe> for GameSession {
    type Result = MessageResult<Unsubscribe>;

    fn handle(&mut self, msg: Unsubscribe, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.engine.unsubscribe(msg.id))
    }
}
