//! Browser bindings
//!
//! The host page owns the DOM, the WebSocket and the animation loop. It
//! calls into this module to build request frames, fold server replies
//! into account state, and advance and draw the local match.

use std::cell::RefCell;

use game_core::{Config, Settings};
use proto::Slot;
use wasm_bindgen::prelude::*;
use web_sys::{AudioContext, HtmlCanvasElement, OscillatorType};

use crate::accounts::{Accounts, Notice, NoticeKind, SignUpForm};
use crate::network;
use crate::renderer::Renderer;
use crate::scene;
use crate::simulation::LocalGame;
use crate::stats;

const HIT_FREQUENCY_HZ: f32 = 660.0;
const HIT_GAIN: f32 = 0.15;
const HIT_SECONDS: f64 = 0.06;

fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

fn js_err(message: impl AsRef<str>) -> JsValue {
    JsValue::from_str(message.as_ref())
}

/// Short square-wave blip for paddle hits
struct HitSound {
    ctx: AudioContext,
}

impl HitSound {
    fn new() -> Result<Self, JsValue> {
        Ok(Self {
            ctx: AudioContext::new()?,
        })
    }

    fn play(&self) -> Result<(), JsValue> {
        let oscillator = self.ctx.create_oscillator()?;
        oscillator.set_type(OscillatorType::Square);
        oscillator.frequency().set_value(HIT_FREQUENCY_HZ);

        let gain = self.ctx.create_gain()?;
        gain.gain().set_value(HIT_GAIN);

        oscillator.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&self.ctx.destination())?;

        let now = self.ctx.current_time();
        oscillator.start_with_when(now)?;
        oscillator.stop_with_when(now + HIT_SECONDS)?;
        Ok(())
    }
}

struct Client {
    accounts: Accounts,
    settings: Settings,
    game: Option<LocalGame>,
    renderer: Renderer,
    sound: Option<HitSound>,
}

impl Client {
    async fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let config = Config::default();
        let arena = (config.arena_width as f32, config.arena_height as f32);
        let renderer = Renderer::new(canvas, arena).await.map_err(js_err)?;
        Ok(Self {
            accounts: Accounts::new(),
            settings: Settings::default(),
            game: None,
            renderer,
            sound: None,
        })
    }

    fn game(&self) -> Result<&LocalGame, JsValue> {
        self.game.as_ref().ok_or_else(|| js_err("No match in progress"))
    }

    fn start_match(&mut self, seed: u64) {
        if self.settings.sound_enabled && self.sound.is_none() {
            // Needs the user gesture that started the match
            match HitSound::new() {
                Ok(sound) => self.sound = Some(sound),
                Err(e) => log(&format!("Sound unavailable: {:?}", e)),
            }
        }
        self.game = Some(LocalGame::new(self.settings, seed));
        log(&format!(
            "Match started: {} vs {}, first to {}",
            self.accounts.player_name(Slot::Player1),
            self.accounts.player_name(Slot::Player2),
            self.settings.score_limit
        ));
    }

    fn frame(&mut self, dt: f32) -> Result<bool, JsValue> {
        let Some(game) = self.game.as_mut() else {
            return Ok(false);
        };
        let report = game.frame(dt);
        if report.play_hit_sound {
            if let Some(sound) = &self.sound {
                if let Err(e) = sound.play() {
                    log(&format!("Failed to play sound: {:?}", e));
                }
            }
        }

        let scene = scene::build(&game.snapshot(), game.config(), game.settings());
        self.renderer.draw(&scene).map_err(js_err)?;
        Ok(report.finished)
    }

    /// (player 1, score, player 2, score) for the finished match
    fn result(&self) -> Result<(String, u32, String, u32), JsValue> {
        let (left, right) = self
            .game()?
            .final_scores()
            .ok_or_else(|| js_err("The match is not over yet"))?;
        Ok((
            self.accounts.player_name(Slot::Player1),
            left,
            self.accounts.player_name(Slot::Player2),
            right,
        ))
    }
}

/// A server reply, as the page sees it
#[wasm_bindgen]
pub struct ServerNotice {
    kind: NoticeKind,
    message: String,
    request: Option<String>,
}

#[wasm_bindgen]
impl ServerNotice {
    /// SCREAMING_SNAKE name of the reply
    #[wasm_bindgen(getter)]
    pub fn kind(&self) -> String {
        let name = match self.kind {
            NoticeKind::SignedUp => "SIGNED_UP",
            NoticeKind::LoggedIn => "LOGGED_IN",
            NoticeKind::LoggedOut => "LOGGED_OUT",
            NoticeKind::User => "USER",
            NoticeKind::History => "HISTORY",
            NoticeKind::MatchRecorded => "MATCH_RECORDED",
            NoticeKind::Pong => "PONG",
            NoticeKind::Error => "ERROR",
        };
        name.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    /// For errors, the request that failed
    #[wasm_bindgen(getter)]
    pub fn request(&self) -> Option<String> {
        self.request.clone()
    }
}

impl From<Notice> for ServerNotice {
    fn from(notice: Notice) -> Self {
        Self {
            kind: notice.kind,
            message: notice.message,
            request: notice.request.map(|r| format!("{:?}", r)),
        }
    }
}

thread_local! {
    static CLIENT: RefCell<Option<Client>> = const { RefCell::new(None) };
}

fn with_client<T>(f: impl FnOnce(&mut Client) -> Result<T, JsValue>) -> Result<T, JsValue> {
    CLIENT.with(|cell| match cell.borrow_mut().as_mut() {
        Some(client) => f(client),
        None => Err(js_err("Client not initialized")),
    })
}

fn slot(number: u8) -> Result<Slot, JsValue> {
    network::slot_from_number(number).map_err(js_err)
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub fn init_client(canvas: HtmlCanvasElement) -> js_sys::Promise {
    wasm_bindgen_futures::future_to_promise(async move {
        let client = Client::new(canvas).await?;
        CLIENT.with(|cell| *cell.borrow_mut() = Some(client));
        log("Client initialized");
        Ok(JsValue::UNDEFINED)
    })
}

#[wasm_bindgen]
pub fn prepare_login(slot_number: u8, username: &str, password: &str) -> Result<Vec<u8>, JsValue> {
    let slot = slot(slot_number)?;
    with_client(|client| {
        client
            .accounts
            .prepare_login(slot, username, password)
            .map_err(js_err)
    })
}

#[wasm_bindgen]
pub fn prepare_sign_up(
    username: &str,
    password: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
) -> Result<Vec<u8>, JsValue> {
    let form = SignUpForm {
        username: username.into(),
        password: password.into(),
        email: email.into(),
        first_name: first_name.into(),
        last_name: last_name.into(),
    };
    with_client(|client| client.accounts.prepare_sign_up(form).map_err(js_err))
}

#[wasm_bindgen]
pub fn prepare_logout(slot_number: u8) -> Result<Vec<u8>, JsValue> {
    let slot = slot(slot_number)?;
    with_client(|client| {
        if client.accounts.player(slot).is_none() {
            return Err(js_err(format!(
                "No player is logged in as Player {}.",
                slot.number()
            )));
        }
        network::create_logout_message(slot).map_err(js_err)
    })
}

#[wasm_bindgen]
pub fn prepare_history(slot_number: u8) -> Result<Vec<u8>, JsValue> {
    let slot = slot(slot_number)?;
    with_client(|client| {
        let user = client
            .accounts
            .player(slot)
            .ok_or_else(|| js_err("User not found."))?;
        network::create_history_message(user.id).map_err(js_err)
    })
}

#[wasm_bindgen]
pub fn prepare_ping() -> Result<Vec<u8>, JsValue> {
    let now_ms = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_default();
    network::create_ping_message(now_ms as u32).map_err(js_err)
}

/// Fold a binary frame from the server into client state
#[wasm_bindgen]
pub fn handle_server_message(bytes: &[u8]) -> Result<ServerNotice, JsValue> {
    let msg = network::decode(bytes).map_err(js_err)?;
    with_client(|client| {
        let notice = client.accounts.apply(msg);
        if notice.is_error() {
            log(&format!("Server error: {}", notice.message));
        }
        Ok(notice.into())
    })
}

#[wasm_bindgen]
pub fn both_logged_in() -> bool {
    with_client(|client| Ok(client.accounts.both_logged_in())).unwrap_or(false)
}

#[wasm_bindgen]
pub fn player_name(slot_number: u8) -> Result<String, JsValue> {
    let slot = slot(slot_number)?;
    with_client(|client| Ok(client.accounts.player_name(slot)))
}

#[wasm_bindgen]
pub fn apply_settings(
    ball: &str,
    paddle1: &str,
    paddle2: &str,
    score_limit: u32,
    sound_enabled: bool,
) -> Result<(), JsValue> {
    let settings = Settings::from_names(ball, paddle1, paddle2, score_limit, sound_enabled)
        .map_err(|e| js_err(e.to_string()))?;
    with_client(|client| {
        client.settings = settings;
        Ok(())
    })
}

#[wasm_bindgen]
pub fn start_match() -> Result<(), JsValue> {
    let seed = js_sys::Date::now() as u64;
    with_client(|client| {
        client.start_match(seed);
        Ok(())
    })
}

/// Returns true if the key belongs to the match, so the page can
/// suppress its default action
#[wasm_bindgen]
pub fn key_down(key: &str) -> bool {
    with_client(|client| Ok(client.game.as_mut().is_some_and(|g| g.key_down(key))))
        .unwrap_or(false)
}

#[wasm_bindgen]
pub fn key_up(key: &str) -> bool {
    with_client(|client| Ok(client.game.as_mut().is_some_and(|g| g.key_up(key))))
        .unwrap_or(false)
}

/// Advance and draw one animation frame. True on the frame the match ends.
#[wasm_bindgen]
pub fn frame(dt: f32) -> Result<bool, JsValue> {
    with_client(|client| client.frame(dt))
}

#[wasm_bindgen]
pub fn is_paused() -> bool {
    with_client(|client| Ok(client.game()?.snapshot().paused)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn prepare_record_match() -> Result<Vec<u8>, JsValue> {
    with_client(|client| {
        let (_, left, _, right) = client.result()?;
        network::create_record_match_message(left, right).map_err(js_err)
    })
}

#[wasm_bindgen]
pub fn final_score_line() -> Result<String, JsValue> {
    with_client(|client| {
        let (p1, s1, p2, s2) = client.result()?;
        Ok(stats::final_score_line(&p1, s1, &p2, s2))
    })
}

#[wasm_bindgen]
pub fn winner_message() -> Result<String, JsValue> {
    with_client(|client| {
        let (p1, s1, p2, s2) = client.result()?;
        Ok(stats::winner_message(&p1, s1, &p2, s2))
    })
}

/// History shown on the statistics screen, as it stood before this match
#[wasm_bindgen]
pub fn history_text(slot_number: u8) -> Result<String, JsValue> {
    let slot = slot(slot_number)?;
    with_client(|client| {
        let (left, right) = client
            .accounts
            .histories()
            .ok_or_else(|| js_err("No history received yet"))?;
        let entries = match slot {
            Slot::Player1 => left,
            Slot::Player2 => right,
        };
        Ok(stats::history_text(
            &client.accounts.player_name(slot),
            entries,
        ))
    })
}

/// Drop the match and both players, ready for the welcome screen
#[wasm_bindgen]
pub fn back_to_menu() -> Result<(), JsValue> {
    with_client(|client| {
        client.game = None;
        client.accounts.clear();
        Ok(())
    })
}
