//! Game flow controller
//!
//! Owns the consent/idle/playing/over state machine and the per-session
//! simulation state, and mediates everything that crosses the
//! simulation boundary: jump intent, audio cues, the coin toast, and
//! persisted preferences. Generic over its capabilities so it runs
//! headless in tests.

use crate::Viewport;
use crate::audio::{AudioSink, Clip};
use crate::platform::KeyValueStore;
use crate::prefs::Prefs;
use crate::sim::{GameEvent, SessionState, TickInput, tick};

/// Finite game states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the one-time policy acknowledgment
    Consent,
    /// Ready; the next jump starts a session
    Idle,
    Playing,
    Over,
}

/// One-way notification surface (toast on coin pickup)
pub trait Notifier {
    fn notify(&mut self, title: &str, body: &str);
}

/// Discards notifications (native stub)
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _title: &str, _body: &str) {}
}

/// The game flow controller
pub struct GameFlow<S, A, N> {
    phase: Phase,
    state: SessionState,
    prefs: Prefs,
    store: S,
    audio: A,
    notifier: N,
    /// Jump intent latched between frames; consumed by the next tick
    pending_jump: bool,
    /// Input is ignored while a settings/help overlay is open
    modal_open: bool,
    /// Seed for the next session start
    next_seed: u64,
}

impl<S: KeyValueStore, A: AudioSink, N: Notifier> GameFlow<S, A, N> {
    pub fn new(seed: u64, viewport: Viewport, store: S, mut audio: A, notifier: N) -> Self {
        let prefs = Prefs::load(&store);
        audio.set_muted(prefs.muted);
        let phase = if prefs.consent_accepted {
            Phase::Idle
        } else {
            Phase::Consent
        };
        Self {
            phase,
            state: SessionState::new(seed, viewport),
            prefs,
            store,
            audio,
            notifier,
            pending_jump: false,
            modal_open: false,
            next_seed: seed,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &SessionState {
        &self.state
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn high_score(&self) -> u64 {
        self.prefs.high_score
    }

    pub fn muted(&self) -> bool {
        self.prefs.muted
    }

    pub fn set_modal_open(&mut self, open: bool) {
        self.modal_open = open;
    }

    /// New surface dimensions; gap height and ground line follow
    pub fn resize(&mut self, viewport: Viewport) {
        self.state.set_viewport(viewport);
    }

    /// Acknowledge the one-time policy screen
    pub fn accept_consent(&mut self) {
        if self.phase == Phase::Consent {
            self.prefs.accept_consent(&mut self.store);
            self.phase = Phase::Idle;
        }
    }

    /// The single jump intent from key/pointer/touch input.
    ///
    /// Starts a session from `Idle`; otherwise latches the impulse for
    /// the next tick. Ignored in `Consent`/`Over` and while a modal
    /// overlay is open.
    pub fn jump(&mut self) {
        if self.modal_open {
            return;
        }
        match self.phase {
            Phase::Playing => {
                self.pending_jump = true;
                self.play_music();
            }
            Phase::Idle => self.begin_session(),
            Phase::Consent | Phase::Over => {}
        }
    }

    /// Explicit restart from the game-over screen
    pub fn restart(&mut self) {
        if self.phase == Phase::Over {
            self.begin_session();
        }
    }

    /// Flip the mute preference, apply it to all clips immediately and
    /// persist it
    pub fn toggle_mute(&mut self) {
        let muted = !self.prefs.muted;
        self.prefs.set_muted(muted, &mut self.store);
        self.audio.set_muted(muted);
        if muted {
            // Keep the track position so unmuting resumes, not restarts
            self.audio.pause_music();
        } else if self.phase == Phase::Playing {
            self.audio.play(Clip::Music);
        }
    }

    /// Run the simulation ticks due for this frame. Outside `Playing`
    /// this is a no-op; the renderer still redraws every frame.
    pub fn frame(&mut self, ticks: u32) {
        for _ in 0..ticks {
            if self.phase != Phase::Playing {
                break;
            }
            let input = TickInput {
                jump: std::mem::take(&mut self.pending_jump),
            };
            let events = tick(&mut self.state, &input);
            self.apply_events(&events);
        }
    }

    fn apply_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::CoinCollected { bounty } => {
                    self.notifier
                        .notify("Coin collected!", &format!("+{bounty} added."));
                    self.prefs.record_score(self.state.score, &mut self.store);
                }
                GameEvent::ObstaclePassed => self.audio.play(Clip::Pass),
                GameEvent::GameOver => {
                    self.phase = Phase::Over;
                    self.audio.stop_music();
                    self.audio.play(Clip::GameOver);
                    log::info!("session over, score {}", self.state.score);
                }
            }
        }
    }

    fn begin_session(&mut self) {
        // Advance the seed so consecutive sessions differ but a given
        // start remains reproducible
        self.next_seed = self
            .next_seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state = SessionState::new(self.next_seed, self.state.viewport);
        self.pending_jump = true;
        self.phase = Phase::Playing;
        self.play_music();
    }

    fn play_music(&self) {
        if !self.prefs.muted {
            self.audio.play(Clip::Music);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudioSink;
    use crate::consts::*;
    use crate::platform::MemoryStore;
    use crate::sim::Coin;

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Vec<String>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, title: &str, _body: &str) {
            self.messages.push(title.to_string());
        }
    }

    type TestFlow = GameFlow<MemoryStore, NullAudioSink, RecordingNotifier>;

    fn flow_with(store: MemoryStore) -> TestFlow {
        GameFlow::new(
            42,
            Viewport::new(480.0, 640.0),
            store,
            NullAudioSink::default(),
            RecordingNotifier::default(),
        )
    }

    fn accepted_flow() -> TestFlow {
        let mut flow = flow_with(MemoryStore::new());
        flow.accept_consent();
        flow
    }

    /// Run frames until the session ends, jumping to stay alive for
    /// `keep_alive_frames` frames first
    fn run_to_game_over(flow: &mut TestFlow, keep_alive_frames: u32) {
        let mut n = 0;
        while flow.phase() == Phase::Playing {
            if n < keep_alive_frames && flow.session().player.velocity_y > 7.0 {
                flow.jump();
            }
            flow.frame(1);
            n += 1;
            assert!(n < 100_000, "session never ended");
        }
    }

    #[test]
    fn test_starts_in_consent_without_stored_flag() {
        let flow = flow_with(MemoryStore::new());
        assert_eq!(flow.phase(), Phase::Consent);
    }

    #[test]
    fn test_skips_consent_when_previously_accepted() {
        let mut store = MemoryStore::new();
        let mut first = flow_with(store.clone());
        first.accept_consent();
        store = first.store;
        let second = flow_with(store);
        assert_eq!(second.phase(), Phase::Idle);
    }

    #[test]
    fn test_jump_ignored_during_consent() {
        let mut flow = flow_with(MemoryStore::new());
        flow.jump();
        assert_eq!(flow.phase(), Phase::Consent);
    }

    #[test]
    fn test_jump_ignored_while_modal_open() {
        let mut flow = accepted_flow();
        flow.set_modal_open(true);
        flow.jump();
        assert_eq!(flow.phase(), Phase::Idle);
        flow.set_modal_open(false);
        flow.jump();
        assert_eq!(flow.phase(), Phase::Playing);
    }

    #[test]
    fn test_idle_jump_starts_fresh_session_with_impulse() {
        let mut flow = accepted_flow();
        flow.jump();
        assert_eq!(flow.phase(), Phase::Playing);
        flow.frame(1);
        // Impulse applied on the first tick, then one gravity step
        assert!((flow.session().player.velocity_y - (JUMP_IMPULSE + GRAVITY)).abs() < 1e-5);
        assert_eq!(flow.score(), 0);
    }

    #[test]
    fn test_free_fall_session_ends() {
        let mut flow = accepted_flow();
        flow.jump();
        // Consume the starting impulse, then let it fall
        run_to_game_over(&mut flow, 0);
        assert_eq!(flow.phase(), Phase::Over);
        // Frames after game over change nothing
        let ticks = flow.session().tick_count;
        flow.frame(10);
        assert_eq!(flow.session().tick_count, ticks);
    }

    #[test]
    fn test_restart_only_from_over() {
        let mut flow = accepted_flow();
        flow.restart();
        assert_eq!(flow.phase(), Phase::Idle);
        flow.jump();
        run_to_game_over(&mut flow, 0);
        flow.restart();
        assert_eq!(flow.phase(), Phase::Playing);
        assert_eq!(flow.score(), 0);
        assert_eq!(flow.session().tick_count, 0);
    }

    #[test]
    fn test_coin_pickup_notifies_and_updates_high_score() {
        let mut flow = accepted_flow();
        flow.jump();
        flow.frame(1);
        flow.state.coins.push(Coin {
            pos: flow.session().player.pos,
        });
        flow.jump();
        flow.frame(1);
        assert_eq!(flow.score(), COIN_BOUNTY);
        assert_eq!(flow.high_score(), COIN_BOUNTY);
        assert_eq!(flow.notifier.messages.len(), 1);
    }

    #[test]
    fn test_high_score_survives_sessions_and_lower_scores() {
        let mut flow = accepted_flow();

        // First session: three coins, score 300
        flow.jump();
        for _ in 0..3 {
            flow.frame(1);
            flow.state.coins.push(Coin {
                pos: flow.session().player.pos,
            });
            flow.jump();
        }
        flow.frame(1);
        assert_eq!(flow.score(), 300);
        run_to_game_over(&mut flow, 0);

        // Second run of the app, same store: one coin, score 100
        let store = flow.store;
        let mut flow = flow_with(store);
        assert_eq!(flow.high_score(), 300);
        flow.jump();
        flow.frame(1);
        flow.state.coins.push(Coin {
            pos: flow.session().player.pos,
        });
        flow.jump();
        flow.frame(1);
        assert_eq!(flow.score(), 100);
        run_to_game_over(&mut flow, 0);
        assert_eq!(flow.high_score(), 300);
    }

    /// Records every sink call so music pause/stop behavior is checkable
    #[derive(Default)]
    struct TraceAudio {
        muted: bool,
        calls: std::cell::RefCell<Vec<&'static str>>,
    }

    impl AudioSink for TraceAudio {
        fn play(&self, clip: Clip) {
            self.calls.borrow_mut().push(match clip {
                Clip::Music => "play music",
                Clip::GameOver => "play game-over",
                Clip::Pass => "play pass",
            });
        }
        fn pause_music(&self) {
            self.calls.borrow_mut().push("pause music");
        }
        fn stop_music(&self) {
            self.calls.borrow_mut().push("stop music");
        }
        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }
    }

    #[test]
    fn test_mute_pauses_music_without_rewind() {
        let mut flow = GameFlow::new(
            42,
            Viewport::new(480.0, 640.0),
            MemoryStore::new(),
            TraceAudio::default(),
            RecordingNotifier::default(),
        );
        flow.accept_consent();
        flow.jump();
        flow.toggle_mute();
        flow.toggle_mute();
        {
            let calls = flow.audio.calls.borrow();
            assert!(calls.contains(&"pause music"));
            // Only a game-over stop may rewind the track
            assert!(!calls.contains(&"stop music"));
            // Unmuting while playing resumes the music
            assert_eq!(calls.last(), Some(&"play music"));
        }

        // The game-over stop still rewinds
        while flow.phase() == Phase::Playing {
            flow.frame(1);
        }
        assert_eq!(flow.audio.calls.borrow().last(), Some(&"play game-over"));
        assert!(flow.audio.calls.borrow().contains(&"stop music"));
    }

    #[test]
    fn test_toggle_mute_persists() {
        let mut flow = accepted_flow();
        assert!(!flow.muted());
        flow.toggle_mute();
        assert!(flow.muted());
        assert!(flow.audio.muted);
        let store = flow.store;
        let flow = flow_with(store);
        assert!(flow.muted());
    }
}
