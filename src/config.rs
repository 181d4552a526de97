/// What a window-close request does to a running game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QuitPolicy {
    /// The request is logged and otherwise dropped; only Esc or a crash ends the game.
    Ignore,
    /// Only selectable when building a `Config` in code; the binary always plays with `Ignore`.
    #[allow(dead_code)]
    EndGame,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub track_score: bool,
    pub quit_policy: QuitPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config { track_score: true, quit_policy: QuitPolicy::Ignore }
    }
}
