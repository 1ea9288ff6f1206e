use log::debug;

use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::generator::generate_level_seeded;
use crate::model::{Color, LevelDefinition, Tube};
use crate::palette::Palette;
use crate::rules::{can_move, check_win, execute_move};
use crate::solver::{Hint, find_best_move};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    TubeSelected(usize),
    /// A pour has been applied and the caller is still showing it.
    AnimatingMove { from: usize, to: usize },
    LevelComplete,
    /// The last level has been completed.
    Finished,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionAction {
    Tap(usize),
    FinishAnimation,
    Undo,
    Redo,
    Restart,
    RequestHint,
    GrantHints,
    Advance,
    SelectLevel(u32),
}

/// What an action did, for the caller to drive sound and animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Ignored,
    Selected(usize),
    Deselected,
    Poured {
        from: usize,
        to: usize,
        color: Color,
        moved: usize,
    },
    /// An illegal pour was attempted; `selected` is the tube now selected, if any.
    Rejected {
        from: usize,
        to: usize,
        selected: Option<usize>,
    },
    Settled,
    LevelComplete(u32),
    Undone,
    Redone,
    LevelStarted(u32),
    HintShown(Hint),
    NoHintsLeft,
    Deadlocked,
    HintsGranted(u32),
    AllLevelsComplete,
}

/// Caller-side game state: the authoritative board snapshot, history, and
/// the interaction phase. Boards are replaced wholesale on every action.
pub struct GameSession {
    config: GameConfig,
    palette: Palette,
    seed: u64,
    level: LevelDefinition,
    tubes: Vec<Tube>,
    phase: Phase,
    undo_stack: Vec<Vec<Tube>>,
    redo_stack: Vec<Vec<Tube>>,
    hints_remaining: u32,
}

impl GameSession {
    pub fn new(config: GameConfig, palette: Palette, seed: u64, start_level: u32) -> Result<Self> {
        config.validate()?;
        check_level(&config, start_level)?;
        let level = generate_level_seeded(start_level, seed, &palette);
        let tubes = level.instantiate();
        let hints_remaining = config.hints_per_level;
        Ok(Self {
            config,
            palette,
            seed,
            level,
            tubes,
            phase: Phase::Idle,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            hints_remaining,
        })
    }

    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    pub fn level_id(&self) -> u32 {
        self.level.id
    }

    pub fn capacity(&self) -> usize {
        self.level.capacity
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn hints_remaining(&self) -> u32 {
        self.hints_remaining
    }

    /// Pours made since the level (re)started, net of undos.
    pub fn moves(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn handle(&mut self, action: SessionAction) -> Result<SessionEvent> {
        let event = match action {
            SessionAction::Tap(index) => self.tap(index)?,
            SessionAction::FinishAnimation => self.finish_animation(),
            SessionAction::Undo => self.undo(),
            SessionAction::Redo => self.redo(),
            SessionAction::Restart => self.restart(),
            SessionAction::RequestHint => self.hint(),
            SessionAction::GrantHints => self.grant_hints(),
            SessionAction::Advance => self.advance(),
            SessionAction::SelectLevel(id) => self.select_level(id)?,
        };
        debug!("{action:?} -> {event:?} (phase {:?})", self.phase);
        Ok(event)
    }

    pub fn tap(&mut self, index: usize) -> Result<SessionEvent> {
        if !self.is_playing() {
            return Ok(SessionEvent::Ignored);
        }
        if index >= self.tubes.len() {
            return Err(Error::TubeOutOfRange {
                index,
                count: self.tubes.len(),
            });
        }
        let event = match self.phase {
            Phase::AnimatingMove { .. } | Phase::LevelComplete | Phase::Finished => {
                SessionEvent::Ignored
            }
            Phase::Idle => {
                if self.tubes[index].is_empty() {
                    SessionEvent::Ignored
                } else {
                    self.phase = Phase::TubeSelected(index);
                    SessionEvent::Selected(index)
                }
            }
            Phase::TubeSelected(from) if from == index => {
                self.phase = Phase::Idle;
                SessionEvent::Deselected
            }
            Phase::TubeSelected(from) => self.pour(from, index),
        };
        Ok(event)
    }

    fn pour(&mut self, from: usize, to: usize) -> SessionEvent {
        let capacity = self.capacity();
        let (source, target) = (&self.tubes[from], &self.tubes[to]);
        if !can_move(source, target, capacity) {
            let selected = (!target.is_empty()).then_some(to);
            self.phase = match selected {
                Some(index) => Phase::TubeSelected(index),
                None => Phase::Idle,
            };
            return SessionEvent::Rejected { from, to, selected };
        }

        let Some(color) = source.top() else {
            return SessionEvent::Ignored;
        };
        let outcome = execute_move(source, target, capacity);
        let mut next = self.tubes.clone();
        next[from] = outcome.updated_from;
        next[to] = outcome.updated_to;

        self.push_undo_state();
        self.tubes = next;
        self.phase = Phase::AnimatingMove { from, to };
        SessionEvent::Poured {
            from,
            to,
            color,
            moved: outcome.moved_count,
        }
    }

    pub fn finish_animation(&mut self) -> SessionEvent {
        if !matches!(self.phase, Phase::AnimatingMove { .. }) {
            return SessionEvent::Ignored;
        }
        if check_win(&self.tubes, self.capacity()) {
            self.phase = Phase::LevelComplete;
            SessionEvent::LevelComplete(self.level.id)
        } else {
            self.phase = Phase::Idle;
            SessionEvent::Settled
        }
    }

    fn is_playing(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::TubeSelected(_))
    }

    fn push_undo_state(&mut self) {
        self.undo_stack.push(self.tubes.clone());
        self.redo_stack.clear();
    }

    pub fn undo(&mut self) -> SessionEvent {
        if !self.is_playing() {
            return SessionEvent::Ignored;
        }
        let Some(previous) = self.undo_stack.pop() else {
            return SessionEvent::Ignored;
        };
        let current = std::mem::replace(&mut self.tubes, previous);
        self.redo_stack.push(current);
        self.phase = Phase::Idle;
        SessionEvent::Undone
    }

    pub fn redo(&mut self) -> SessionEvent {
        if !self.is_playing() {
            return SessionEvent::Ignored;
        }
        let Some(next) = self.redo_stack.pop() else {
            return SessionEvent::Ignored;
        };
        let current = std::mem::replace(&mut self.tubes, next);
        self.undo_stack.push(current);
        self.phase = Phase::Idle;
        SessionEvent::Redone
    }

    pub fn restart(&mut self) -> SessionEvent {
        if matches!(self.phase, Phase::AnimatingMove { .. } | Phase::Finished) {
            return SessionEvent::Ignored;
        }
        self.start_level(self.level.clone());
        SessionEvent::LevelStarted(self.level.id)
    }

    /// Spends one hint. Nothing is spent when the board has no legal move.
    pub fn hint(&mut self) -> SessionEvent {
        if !self.is_playing() {
            return SessionEvent::Ignored;
        }
        if self.hints_remaining == 0 {
            return SessionEvent::NoHintsLeft;
        }
        match find_best_move(&self.tubes, self.capacity()) {
            Some(hint) => {
                self.hints_remaining -= 1;
                SessionEvent::HintShown(hint)
            }
            None => SessionEvent::Deadlocked,
        }
    }

    pub fn grant_hints(&mut self) -> SessionEvent {
        if matches!(self.phase, Phase::AnimatingMove { .. } | Phase::Finished) {
            return SessionEvent::Ignored;
        }
        self.hints_remaining = self.hints_remaining.saturating_add(self.config.hint_refill);
        SessionEvent::HintsGranted(self.hints_remaining)
    }

    pub fn advance(&mut self) -> SessionEvent {
        if self.phase != Phase::LevelComplete {
            return SessionEvent::Ignored;
        }
        let next = self.level.id + 1;
        if next > self.config.level_count {
            self.phase = Phase::Finished;
            return SessionEvent::AllLevelsComplete;
        }
        self.load_level(next);
        SessionEvent::LevelStarted(next)
    }

    pub fn select_level(&mut self, id: u32) -> Result<SessionEvent> {
        check_level(&self.config, id)?;
        if matches!(self.phase, Phase::AnimatingMove { .. }) {
            return Ok(SessionEvent::Ignored);
        }
        self.load_level(id);
        Ok(SessionEvent::LevelStarted(id))
    }

    fn load_level(&mut self, id: u32) {
        let level = generate_level_seeded(id, self.seed, &self.palette);
        self.start_level(level);
    }

    fn start_level(&mut self, level: LevelDefinition) {
        self.tubes = level.instantiate();
        self.level = level;
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.hints_remaining = self.config.hints_per_level;
        self.phase = Phase::Idle;
    }
}

fn check_level(config: &GameConfig, id: u32) -> Result<()> {
    if id == 0 || id > config.level_count {
        return Err(Error::LevelOutOfRange(id));
    }
    Ok(())
}
