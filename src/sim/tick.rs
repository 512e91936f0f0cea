//! The per-frame update pass
//!
//! One call to [`tick`] advances the whole simulation by `dt` seconds:
//! countdown and end-of-time resolution, spawn-rate ramp, player input,
//! movement for both farmers, AI decisions, crop spawning, growth, pickup
//! arbitration, scoring, and goal checks. The pass is atomic: rendering only
//! ever sees the state between calls.

use crate::consts::*;
use super::state::{GamePhase, GameState};

/// Input snapshot for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Currently-held movement keys
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Pause toggle (one-shot; the caller clears it after the frame)
    pub pause: bool,
}

/// Advance the game by one frame. `dt` must already be capped by the caller
/// (see [`MAX_FRAME_DT`]); a no-op unless the state is Playing, except that
/// LevelUp counts down its pending transition.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        state.toggle_pause();
    }

    match state.phase {
        GamePhase::LevelUp => {
            // The one pending transition: apply the next level when the
            // delay expires, never schedule a second one.
            state.levelup_timer -= dt;
            if state.levelup_timer <= 0.0 {
                let next = state.level_index + 1;
                state.apply_level(next);
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::Playing => {}
        _ => return,
    }

    // Round clock
    state.time_left = (state.time_left - dt).clamp(0.0, MAX_TIME_LEFT);
    if state.time_left <= 0.0 {
        state.phase = if state.player_score > state.ai_score {
            log::info!("Time! Player wins on points");
            GamePhase::Win
        } else {
            // ties go to the AI
            log::info!("Time! AI wins on points");
            GamePhase::GameOver
        };
        return;
    }

    // Spawn-rate difficulty ramp
    state.spawner.advance(dt);

    // Movement: player from held keys, AI from the chase policy; both share
    // the same resolver
    state.player.apply_input(input);
    state.player.update_movement(dt, &state.obstacles);

    let ai_pre_move = state.ai.rect.pos();
    state.ai_policy.decide(dt, &mut state.ai, &state.crops);
    state.ai.update_movement(dt, &state.obstacles);
    state
        .ai_policy
        .observe_displacement(dt, &state.ai, ai_pre_move, &mut state.rng);

    // Crop spawning
    for _ in 0..state.spawner.take_due(dt) {
        state.spawn_crop();
    }

    // Time-based growth; the AI grows slightly less. The interval guard
    // keeps a hand-built zero interval from spinning the loop forever.
    state.growth_timer += dt;
    while state.growth_every > 0.0 && state.growth_timer >= state.growth_every {
        state.growth_timer -= state.growth_every;
        state.player.grow_by(state.growth_amount);
        state.ai.grow_by((state.growth_amount * 0.8).floor().max(1.0));
    }

    // Pickup arbitration
    let (player_gain, ai_gain) = collect_crops(state);
    state.crops.retain(|c| !c.taken);

    if player_gain > 0 {
        state.player_score += player_gain;
        if state.player_score > state.high_score {
            state.high_score = state.player_score;
        }
    }
    state.ai_score += ai_gain;

    // Goal checks, player first: a frame where both cross favors the player
    if state.player_score >= state.goal {
        state.advance_level();
    } else if state.ai_score >= state.goal {
        log::info!("AI reached the goal first");
        state.phase = GamePhase::GameOver;
    }

    for crop in &mut state.crops {
        crop.update(dt);
    }
}

/// Resolve every live crop against both farmers. Overlap by one farmer
/// awards the crop to them; overlap by both goes to the closer center
/// (squared distance), with exact ties to the player. Each crop is awarded
/// at most once, and the score deltas are returned in one batch so the
/// iteration order can never double-count.
fn collect_crops(state: &mut GameState) -> (u32, u32) {
    let player_center = state.player.center();
    let ai_center = state.ai.center();
    let mut player_gain = 0;
    let mut ai_gain = 0;

    for crop in &mut state.crops {
        if crop.taken {
            continue;
        }
        let by_player = state.player.rect.overlaps(&crop.rect);
        let by_ai = state.ai.rect.overlaps(&crop.rect);
        if !by_player && !by_ai {
            continue;
        }

        let player_owns = if by_player && by_ai {
            let crop_center = crop.rect.center();
            let pd2 = player_center.distance_squared(crop_center);
            let ad2 = ai_center.distance_squared(crop_center);
            pd2 <= ad2
        } else {
            by_player
        };

        crop.taken = true;
        let points = state.crop_values.points(crop.kind);
        if player_owns {
            player_gain += points;
        } else {
            ai_gain += points;
        }
    }

    (player_gain, ai_gain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    use crate::consts::LEVEL_UP_DELAY;
    use crate::levels::LevelSet;
    use crate::sim::crops::{Crop, CropKind};

    const DT: f32 = 1.0 / 60.0;

    fn playing_state() -> GameState {
        let mut s = GameState::new(LevelSet::builtin(), 42);
        s.start();
        // keep scripted scenarios clean of random spawns and scarecrows
        s.crops.clear();
        s.obstacles.clear();
        s
    }

    fn crop_at(x: f32, y: f32, kind: CropKind) -> Crop {
        Crop::new(x, y, kind, 0.0)
    }

    /// Park both actors far from everything
    fn park(s: &mut GameState) {
        s.player.rect.x = 0.0;
        s.player.rect.y = 0.0;
        s.ai.rect.x = 800.0;
        s.ai.rect.y = 450.0;
    }

    #[test]
    fn no_update_outside_playing() {
        let mut s = GameState::new(LevelSet::builtin(), 42);
        let t0 = s.time_left;
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.phase, GamePhase::Menu);
        assert_eq!(s.time_left, t0);
        assert!(s.crops.is_empty());
    }

    #[test]
    fn pause_freezes_the_clock() {
        let mut s = playing_state();
        let t0 = s.time_left;
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut s, &pause, DT);
        assert_eq!(s.phase, GamePhase::Paused);
        assert_eq!(s.time_left, t0);

        tick(&mut s, &pause, DT);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn clock_counts_down_while_playing() {
        let mut s = playing_state();
        park(&mut s);
        let t0 = s.time_left;
        tick(&mut s, &TickInput::default(), DT);
        assert!((t0 - s.time_left - DT).abs() < 1e-6);
    }

    #[test]
    fn player_sweeps_three_crops_for_nine_points() {
        let mut s = playing_state();
        park(&mut s);
        // stack all three under the parked player, AI far away
        s.crops.push(crop_at(5.0, 5.0, CropKind::Wheat));
        s.crops.push(crop_at(10.0, 5.0, CropKind::Pumpkin));
        s.crops.push(crop_at(5.0, 12.0, CropKind::GoldenApple));

        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.player_score, 9);
        assert_eq!(s.ai_score, 0);
        assert!(
            s.crops.iter().all(|c| !c.taken),
            "awarded crops are gone the same frame"
        );
    }

    #[test]
    fn contested_crop_goes_to_closer_center() {
        let mut s = playing_state();
        s.obstacles.clear();
        // crop between the two farmers, both overlapping, player closer
        s.player.rect.x = 100.0;
        s.player.rect.y = 100.0;
        s.ai.rect.x = 130.0;
        s.ai.rect.y = 100.0;
        s.crops.push(crop_at(118.0, 104.0, CropKind::Pumpkin));

        let crop_center = s.crops[0].rect.center();
        assert!(
            s.player.center().distance_squared(crop_center)
                < s.ai.center().distance_squared(crop_center)
        );

        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.player_score, 3);
        assert_eq!(s.ai_score, 0);
    }

    #[test]
    fn contested_crop_exact_tie_goes_to_player() {
        let mut s = playing_state();
        // both actors same size, mirrored around the crop center
        s.player.rect.x = 100.0;
        s.player.rect.y = 100.0;
        s.ai.rect.x = 124.0;
        s.ai.rect.y = 100.0;
        // crop center at the exact midpoint of the two actor centers
        let mid_x = (s.player.center().x + s.ai.center().x) / 2.0;
        s.crops
            .push(crop_at(mid_x - CROP_WIDTH / 2.0, 104.0, CropKind::GoldenApple));

        let cc = s.crops[0].rect.center();
        assert_eq!(
            s.player.center().distance_squared(cc),
            s.ai.center().distance_squared(cc)
        );

        let (player_gain, ai_gain) = collect_crops(&mut s);
        assert_eq!(player_gain, 5);
        assert_eq!(ai_gain, 0);
        assert!(s.crops[0].taken);
    }

    #[test]
    fn taken_crop_is_never_awarded_again() {
        let mut s = playing_state();
        s.player.rect.x = 100.0;
        s.player.rect.y = 100.0;
        s.crops.push(crop_at(104.0, 104.0, CropKind::Pumpkin));

        assert_eq!(collect_crops(&mut s), (3, 0));
        // still overlapping, already marked taken: re-evaluation awards nothing
        assert_eq!(collect_crops(&mut s), (0, 0));
    }

    #[test]
    fn uncontested_ai_pickup_scores_for_ai() {
        let mut s = playing_state();
        park(&mut s);
        s.crops.push(crop_at(s.ai.rect.x + 4.0, s.ai.rect.y + 4.0, CropKind::Wheat));
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.ai_score, 1);
        assert_eq!(s.player_score, 0);
    }

    #[test]
    fn time_expiry_player_ahead_wins() {
        let mut s = playing_state();
        park(&mut s);
        s.player_score = 20;
        s.ai_score = 15;
        s.time_left = 0.001;
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.phase, GamePhase::Win);
    }

    #[test]
    fn time_expiry_tie_or_behind_is_game_over() {
        let mut s = playing_state();
        park(&mut s);
        s.player_score = 15;
        s.ai_score = 15;
        s.time_left = 0.001;
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.phase, GamePhase::GameOver);
    }

    #[test]
    fn reaching_goal_mid_run_schedules_level_up() {
        let mut s = playing_state();
        park(&mut s);
        s.player_score = s.goal - 1;
        s.crops.push(crop_at(5.0, 5.0, CropKind::Wheat));
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.phase, GamePhase::LevelUp);
        assert_eq!(s.level_index, 0, "next level not applied yet");
    }

    #[test]
    fn level_up_applies_next_level_after_delay() {
        let mut s = playing_state();
        park(&mut s);
        s.player_score = s.goal;
        s.advance_level();
        assert_eq!(s.phase, GamePhase::LevelUp);

        // partway through the delay nothing changes
        tick(&mut s, &TickInput::default(), LEVEL_UP_DELAY / 2.0);
        assert_eq!(s.phase, GamePhase::LevelUp);
        assert_eq!(s.level_index, 0);

        tick(&mut s, &TickInput::default(), LEVEL_UP_DELAY);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.level_index, 1);
        assert_eq!(s.goal, 30);
    }

    #[test]
    fn goal_on_final_level_wins_outright() {
        let mut s = playing_state();
        park(&mut s);
        s.apply_level(s.levels.len() - 1);
        s.player_score = s.goal - 1;
        s.crops.push(crop_at(5.0, 5.0, CropKind::Wheat));
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.phase, GamePhase::Win);
    }

    #[test]
    fn ai_reaching_goal_first_is_game_over() {
        let mut s = playing_state();
        park(&mut s);
        s.player_score = s.goal - 1;
        s.ai_score = s.goal - 1;
        s.crops.push(crop_at(s.ai.rect.x + 4.0, s.ai.rect.y + 4.0, CropKind::Wheat));
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.ai_score, s.goal);
        assert_eq!(s.phase, GamePhase::GameOver);
    }

    #[test]
    fn both_crossing_goal_same_frame_favors_player() {
        let mut s = playing_state();
        park(&mut s);
        s.player_score = s.goal - 1;
        s.ai_score = s.goal - 1;
        s.crops.push(crop_at(5.0, 5.0, CropKind::Wheat));
        s.crops.push(crop_at(s.ai.rect.x + 4.0, s.ai.rect.y + 4.0, CropKind::Wheat));
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.player_score, s.goal);
        assert_eq!(s.ai_score, s.goal);
        assert_eq!(s.phase, GamePhase::LevelUp, "player check runs first");
    }

    #[test]
    fn high_score_tracks_best_player_score() {
        let mut s = playing_state();
        park(&mut s);
        s.high_score = 4;
        s.crops.push(crop_at(5.0, 5.0, CropKind::GoldenApple));
        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.player_score, 5);
        assert_eq!(s.high_score, 5);
    }

    #[test]
    fn spawner_populates_crops_over_time() {
        let mut s = playing_state();
        park(&mut s);
        let mut elapsed = 0.0;
        while elapsed < 3.0 {
            tick(&mut s, &TickInput::default(), DT);
            elapsed += DT;
        }
        // the AI may have eaten some already; every eaten crop scored >= 1
        assert!(
            s.crops.len() + s.ai_score as usize >= 2,
            "0.9s interval over 3s should spawn several crops"
        );
        for crop in &s.crops {
            assert_eq!(crop.rect.x % TILE, 0.0);
            assert_eq!(crop.rect.y % TILE, 0.0);
        }
    }

    #[test]
    fn growth_fires_on_its_own_accumulator() {
        let mut s = playing_state();
        park(&mut s);
        s.growth_every = 0.5;
        s.growth_amount = 2.0;
        let w0 = s.player.rect.w;
        let ai_w0 = s.ai.rect.w;
        let mut elapsed = 0.0;
        while elapsed < 1.2 {
            tick(&mut s, &TickInput::default(), DT);
            elapsed += DT;
        }
        assert_eq!(s.player.rect.w, w0 + 4.0);
        assert_eq!(s.ai.rect.w, ai_w0 + 2.0, "AI grows 80% of 2, floored to 1, twice");
    }

    #[test]
    fn zero_growth_interval_does_not_stall_the_frame() {
        let mut s = playing_state();
        park(&mut s);
        s.growth_every = 0.0;
        let w0 = s.player.rect.w;
        let t0 = s.time_left;
        tick(&mut s, &TickInput::default(), DT);
        // the frame completes, time advances, and nothing grows
        assert!(s.time_left < t0);
        assert_eq!(s.player.rect.w, w0);
    }

    #[test]
    fn player_moves_with_held_keys() {
        let mut s = playing_state();
        park(&mut s);
        let x0 = s.player.rect.x;
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut s, &input, DT);
        assert!(s.player.rect.x > x0);
        assert!(s.player.moving);
    }

    #[test]
    fn deterministic_for_a_given_seed() {
        let run = |seed: u64| {
            let mut s = GameState::new(LevelSet::builtin(), seed);
            s.start();
            for _ in 0..600 {
                tick(&mut s, &TickInput::default(), DT);
            }
            (s.crops.len(), s.ai.rect.pos(), s.ai_score)
        };
        assert_eq!(run(1234), run(1234));
    }

    #[test]
    fn crops_sway_but_never_move() {
        let mut s = playing_state();
        park(&mut s);
        s.crops.push(crop_at(300.0, 300.0, CropKind::Wheat));
        let sway0 = s.crops[0].sway;
        tick(&mut s, &TickInput::default(), DT);
        assert!(s.crops[0].sway > sway0);
        assert_eq!(s.crops[0].rect.pos(), Vec2::new(300.0, 300.0));
    }
}
