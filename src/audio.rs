//! Fire-and-forget audio
//!
//! Three clips: a looping background track, a one-shot game-over cue
//! and a one-shot pass cue. Playback failures (blocked autoplay, no
//! media support) are logged and otherwise ignored; sound never
//! affects gameplay.

/// The game's audio clips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clip {
    /// Looping background track, started on the first jump
    Music,
    /// One-shot cue when the session ends
    GameOver,
    /// One-shot cue when a pipe is passed
    Pass,
}

/// Audio capability injected into the flow controller.
///
/// Implementations may no-op entirely; a headless test environment
/// uses [`NullAudioSink`].
pub trait AudioSink {
    fn play(&self, clip: Clip);
    /// Pause the background track, keeping its position
    fn pause_music(&self);
    /// Pause the background track and rewind it
    fn stop_music(&self);
    /// Mute or unmute all clips immediately
    fn set_muted(&mut self, muted: bool);
}

/// Silent sink for tests and the native stub
#[derive(Debug, Default)]
pub struct NullAudioSink {
    pub muted: bool,
}

impl AudioSink for NullAudioSink {
    fn play(&self, _clip: Clip) {}
    fn pause_music(&self) {}
    fn stop_music(&self) {}
    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioSink;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AudioSink, Clip};
    use wasm_bindgen::JsValue;
    use web_sys::HtmlAudioElement;

    /// Browser audio over three `HtmlAudioElement`s
    pub struct WebAudioSink {
        music: HtmlAudioElement,
        game_over: HtmlAudioElement,
        pass: HtmlAudioElement,
    }

    impl WebAudioSink {
        pub fn new(
            music_src: &str,
            game_over_src: &str,
            pass_src: &str,
        ) -> Result<Self, JsValue> {
            let music = HtmlAudioElement::new_with_src(music_src)?;
            music.set_loop(true);
            music.set_volume(0.3);
            let game_over = HtmlAudioElement::new_with_src(game_over_src)?;
            let pass = HtmlAudioElement::new_with_src(pass_src)?;
            Ok(Self {
                music,
                game_over,
                pass,
            })
        }

        /// Issue a play request and discard the result; autoplay
        /// rejections surface here and nowhere else
        fn fire(element: &HtmlAudioElement) {
            match element.play() {
                Ok(promise) => {
                    // Swallow the rejection so it never reaches the console
                    // as an unhandled error
                    let _ = promise.catch(&js_sys::Function::new_no_args(""));
                }
                Err(err) => log::warn!("audio play failed: {err:?}"),
            }
        }
    }

    impl AudioSink for WebAudioSink {
        fn play(&self, clip: Clip) {
            match clip {
                Clip::Music => Self::fire(&self.music),
                Clip::GameOver => Self::fire(&self.game_over),
                Clip::Pass => {
                    // Rewind so rapid passes retrigger from the start
                    self.pass.set_current_time(0.0);
                    Self::fire(&self.pass);
                }
            }
        }

        fn pause_music(&self) {
            if let Err(err) = self.music.pause() {
                log::warn!("audio pause failed: {err:?}");
            }
        }

        fn stop_music(&self) {
            self.pause_music();
            self.music.set_current_time(0.0);
        }

        fn set_muted(&mut self, muted: bool) {
            self.music.set_muted(muted);
            self.game_over.set_muted(muted);
            self.pass.set_muted(muted);
        }
    }
}
