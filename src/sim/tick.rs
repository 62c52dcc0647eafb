//! Trigger dispatch
//!
//! Every state change driven by time flows through `GameSession::dispatch`,
//! one trigger at a time, each running to completion.

use std::time::Duration;

use super::clock::Trigger;
use super::state::{GameEvent, GamePhase, GameSession};
use super::symbol::{Outcome, Symbol, resolve, rotate_symbol};
use crate::consts::*;
use crate::settings::{MissPolicy, TiePolicy};

impl GameSession {
    /// Advance the session clock by `elapsed` and handle every trigger that fired
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.is_active() {
            return;
        }
        self.clock.advance(elapsed);
        // Queued triggers die with the session
        while self.is_active() {
            let Some(trigger) = self.clock.next_trigger() else {
                break;
            };
            self.dispatch(trigger);
        }
    }

    /// Handle one logical timer firing
    pub fn dispatch(&mut self, trigger: Trigger) {
        if !self.is_active() {
            return;
        }
        match trigger {
            Trigger::Spawn => self.spawn_obstacle(),
            Trigger::Advance => self.advance_obstacles(),
            Trigger::Ramp => self.ramp_speed(),
        }
    }

    fn spawn_obstacle(&mut self) {
        let obstacle = self.field.spawn(&mut self.rng);
        log::debug!(
            "Spawned #{} '{}' {} -> {}",
            obstacle.id,
            obstacle.letter,
            obstacle.symbol,
            obstacle.target_lane
        );
        self.events.push(GameEvent::Spawned {
            id: obstacle.id,
            letter: obstacle.letter,
            symbol: obstacle.symbol,
            lane: obstacle.target_lane,
        });
    }

    fn advance_obstacles(&mut self) {
        self.field.advance(self.speed, self.settings.ease_fraction);
        self.advance_ticks += 1;

        // Insertion order; a terminal resolution stops evaluation
        for id in self.field.ids() {
            let Some(obstacle) = self.field.get(id).copied() else {
                continue;
            };
            let collides = obstacle.target_lane == self.player.lane
                && obstacle.vertical() >= self.settings.arrival_threshold;

            if collides {
                self.field.remove(id);
                self.resolve_collision(id, obstacle.symbol, obstacle.letter);
            } else if obstacle.at_edge() {
                self.field.remove(id);
                self.resolve_miss(id);
            }

            if self.player.lives == 0 {
                self.end_game();
                return;
            }
        }
    }

    fn resolve_collision(&mut self, id: u32, symbol: Symbol, letter: char) {
        let Some(current) = self.player.symbol else {
            return;
        };
        let outcome = resolve(current, symbol);
        let points = match outcome {
            Outcome::Win => {
                self.collect(letter, current);
                WIN_POINTS
            }
            Outcome::Tie => {
                if self.settings.tie_policy == TiePolicy::AwardLetter {
                    self.collect(letter, current);
                }
                TIE_POINTS
            }
            Outcome::Lose => {
                self.player.lose_life();
                0
            }
        };
        self.player.award(points);
        log::debug!(
            "#{} {} vs {}: {:?} (+{}, lives {})",
            id,
            current,
            symbol,
            outcome,
            points,
            self.player.lives
        );
        self.events.push(GameEvent::Resolved {
            id,
            outcome,
            points,
        });
    }

    fn collect(&mut self, letter: char, current: Symbol) {
        self.player.letters.push(letter);
        self.player.symbol = Some(rotate_symbol(current, &mut self.rng));
    }

    fn resolve_miss(&mut self, id: u32) {
        match self.settings.miss_policy {
            MissPolicy::LoseLife => {
                self.player.lose_life();
            }
            MissPolicy::EndGame => self.player.lives = 0,
        }
        log::debug!("#{} missed (lives {})", id, self.player.lives);
        self.events.push(GameEvent::Missed { id });
    }

    fn ramp_speed(&mut self) {
        self.speed += self.settings.speed_increment;
        log::info!("Speed ramped to {:.2}", self.speed);
        self.events.push(GameEvent::SpeedRamped { speed: self.speed });
    }

    fn end_game(&mut self) {
        self.clock.cancel();
        self.set_phase(GamePhase::GameOver);
        log::info!(
            "Game over: score {}, letters {}",
            self.player.score,
            self.player.letters.iter().collect::<String>()
        );
        self.events.push(GameEvent::GameOver {
            score: self.player.score,
        });
    }
}
