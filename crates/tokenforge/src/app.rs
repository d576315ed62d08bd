#![forbid(unsafe_code)]

//! Application model: the wizard state machine and simulated deployment.

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use forge_core::event::{Event, KeyCode, KeyEvent};
use forge_extras::{Backdrop, MatrixRainFx};
use forge_render::frame::Frame;
use forge_runtime::{Cmd, Every, Model, Subscription};
use forge_widgets::TextInput;

use crate::chrome;
use crate::theme;

/// Backdrop animation period.
pub const RAIN_TICK: Duration = Duration::from_millis(50);

/// Wall-clock pacing of the simulated deployment. Arbitrary UX choice,
/// not tied to any real confirmation time.
pub const DEPLOY_DELAY: Duration = Duration::from_millis(3000);

const DEFAULT_SUPPLY: &str = "1000000";
const DEFAULT_DECIMALS: &str = "18";
const SYMBOL_MAX_LEN: usize = 10;
const DECIMALS_MAX_LEN: usize = 2;

/// The token being configured. Ephemeral; reset wholesale by
/// "deploy another".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub total_supply: String,
    pub decimals: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            total_supply: DEFAULT_SUPPLY.into(),
            decimals: DEFAULT_DECIMALS.into(),
        }
    }
}

/// Wizard steps. Only meaningful while not deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Identity,
    Economics,
    Review,
}

impl WizardStep {
    /// 1-based position for the step indicator.
    pub const fn number(self) -> u8 {
        match self {
            Self::Identity => 1,
            Self::Economics => 2,
            Self::Review => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Identity => "IDENTITY",
            Self::Economics => "ECONOMICS",
            Self::Review => "REVIEW",
        }
    }
}

/// Focusable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Symbol,
    TotalSupply,
    Decimals,
}

/// Application messages.
pub enum Msg {
    /// A raw terminal event (key, paste, resize).
    Terminal(Event),
    /// Backdrop animation step.
    RainTick,
    /// Simulated deployment finished with the given fake hash.
    DeployFinished(String),
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Tick => Msg::RainTick,
            other => Msg::Terminal(other),
        }
    }
}

/// The whole application state.
pub struct AppModel {
    pub(crate) step: WizardStep,
    pub(crate) deploying: bool,
    pub(crate) deployed: bool,
    pub(crate) tx_hash: String,
    pub(crate) focus: Field,
    pub(crate) name: TextInput,
    pub(crate) symbol: TextInput,
    pub(crate) total_supply: TextInput,
    pub(crate) decimals: TextInput,
    pub(crate) backdrop: Backdrop,
    deploy_delay: Duration,
}

impl AppModel {
    pub fn new() -> Self {
        Self::with_deploy_delay(DEPLOY_DELAY)
    }

    /// Model with an explicit deployment delay. Tests use
    /// `Duration::ZERO` so the task resolves without sleeping.
    pub fn with_deploy_delay(deploy_delay: Duration) -> Self {
        let mut model = Self {
            step: WizardStep::Identity,
            deploying: false,
            deployed: false,
            tx_hash: String::new(),
            focus: Field::Name,
            name: TextInput::new(),
            symbol: TextInput::new(),
            total_supply: TextInput::new(),
            decimals: TextInput::new(),
            backdrop: Backdrop::new(
                Box::new(MatrixRainFx::new()),
                theme::backdrop_inputs(),
            ),
            deploy_delay,
        };
        model.reset();
        model
    }

    /// Return every field and the step to their initial values.
    pub fn reset(&mut self) {
        self.step = WizardStep::Identity;
        self.deploying = false;
        self.deployed = false;
        self.tx_hash.clear();

        self.name = TextInput::new()
            .with_placeholder("My Token")
            .with_style(theme::bright())
            .with_placeholder_style(theme::dim());
        self.symbol = TextInput::new()
            .with_placeholder("TKN")
            .with_max_length(SYMBOL_MAX_LEN)
            .with_char_map(|c| Some(c.to_uppercase().collect()))
            .with_style(theme::bright())
            .with_placeholder_style(theme::dim());
        self.total_supply = TextInput::new()
            .with_value(DEFAULT_SUPPLY)
            .with_char_map(|c| c.is_ascii_digit().then(|| String::from(c)))
            .with_style(theme::bright())
            .with_placeholder_style(theme::dim());
        self.decimals = TextInput::new()
            .with_value(DEFAULT_DECIMALS)
            .with_max_length(DECIMALS_MAX_LEN)
            .with_char_map(|c| c.is_ascii_digit().then(|| String::from(c)))
            .with_style(theme::bright())
            .with_placeholder_style(theme::dim());

        self.set_focus(Field::Name);
    }

    /// Snapshot of the entered values.
    pub fn config(&self) -> TokenConfig {
        TokenConfig {
            name: self.name.value().into(),
            symbol: self.symbol.value().into(),
            total_supply: self.total_supply.value().into(),
            decimals: self.decimals.value().into(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn is_deploying(&self) -> bool {
        self.deploying
    }

    pub fn is_deployed(&self) -> bool {
        self.deployed
    }

    pub fn tx_hash(&self) -> &str {
        &self.tx_hash
    }

    /// Whether the step-1 guard passes: name and symbol non-empty.
    pub fn identity_complete(&self) -> bool {
        !self.name.value().is_empty() && !self.symbol.value().is_empty()
    }

    /// Fields focusable on the current step, in Tab order.
    fn active_fields(&self) -> &'static [Field] {
        match self.step {
            WizardStep::Identity => &[Field::Name, Field::Symbol],
            WizardStep::Economics => &[Field::TotalSupply, Field::Decimals],
            WizardStep::Review => &[],
        }
    }

    fn set_focus(&mut self, field: Field) {
        self.focus = field;
        self.name.set_focused(field == Field::Name);
        self.symbol.set_focused(field == Field::Symbol);
        self.total_supply.set_focused(field == Field::TotalSupply);
        self.decimals.set_focused(field == Field::Decimals);
    }

    fn cycle_focus(&mut self, forward: bool) {
        let fields = self.active_fields();
        if fields.is_empty() {
            return;
        }
        let pos = fields.iter().position(|&f| f == self.focus).unwrap_or(0);
        let next = if forward {
            (pos + 1) % fields.len()
        } else {
            (pos + fields.len() - 1) % fields.len()
        };
        self.set_focus(fields[next]);
    }

    fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        if !self.active_fields().contains(&self.focus) {
            return None;
        }
        Some(match self.focus {
            Field::Name => &mut self.name,
            Field::Symbol => &mut self.symbol,
            Field::TotalSupply => &mut self.total_supply,
            Field::Decimals => &mut self.decimals,
        })
    }

    fn handle_key(&mut self, key: KeyEvent) -> Cmd<Msg> {
        if key.ctrl() && key.is_char('c') {
            return Cmd::quit();
        }
        if self.deploying {
            // The simulated delay always runs to completion.
            return Cmd::none();
        }
        if self.deployed {
            return match key.code {
                KeyCode::Enter => {
                    self.reset();
                    Cmd::none()
                }
                KeyCode::Escape | KeyCode::Char('q') => Cmd::quit(),
                _ => Cmd::none(),
            };
        }
        match key.code {
            // Only when no text field can swallow the character.
            KeyCode::Char('q') if self.active_fields().is_empty() => Cmd::quit(),
            KeyCode::Tab | KeyCode::Down => {
                self.cycle_focus(true);
                Cmd::none()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.cycle_focus(false);
                Cmd::none()
            }
            KeyCode::Enter => self.advance(),
            KeyCode::Escape => self.back(),
            _ => {
                if let Some(input) = self.focused_input_mut() {
                    input.handle_event(&Event::Key(key));
                }
                Cmd::none()
            }
        }
    }

    fn advance(&mut self) -> Cmd<Msg> {
        match self.step {
            WizardStep::Identity => {
                if self.identity_complete() {
                    self.step = WizardStep::Economics;
                    self.set_focus(Field::TotalSupply);
                } else {
                    tracing::debug!("advance blocked: name or symbol empty");
                }
                Cmd::none()
            }
            WizardStep::Economics => {
                self.step = WizardStep::Review;
                Cmd::none()
            }
            WizardStep::Review => self.start_deploy(),
        }
    }

    fn back(&mut self) -> Cmd<Msg> {
        match self.step {
            WizardStep::Identity => Cmd::quit(),
            WizardStep::Economics => {
                self.step = WizardStep::Identity;
                self.set_focus(Field::Name);
                Cmd::none()
            }
            WizardStep::Review => {
                self.step = WizardStep::Economics;
                self.set_focus(Field::TotalSupply);
                Cmd::none()
            }
        }
    }

    fn start_deploy(&mut self) -> Cmd<Msg> {
        self.deploying = true;
        let config = self.config();
        tracing::info!(
            name = %config.name,
            symbol = %config.symbol,
            "starting simulated deployment"
        );
        let delay = self.deploy_delay;
        Cmd::task(move || {
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            Msg::DeployFinished(fake_tx_hash(hash_seed()))
        })
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for AppModel {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::RainTick => {
                self.backdrop.tick();
                Cmd::none()
            }
            Msg::DeployFinished(hash) => {
                self.deploying = false;
                self.deployed = true;
                self.tx_hash = hash;
                tracing::info!(tx_hash = %self.tx_hash, "simulated deployment confirmed");
                Cmd::none()
            }
            Msg::Terminal(Event::Key(key)) => self.handle_key(key),
            Msg::Terminal(event @ Event::Paste(_)) => {
                if !self.deploying
                    && !self.deployed
                    && let Some(input) = self.focused_input_mut()
                {
                    input.handle_event(&event);
                }
                Cmd::none()
            }
            // The backdrop resizes itself against the frame on the next
            // paint; nothing else cares about dimensions.
            Msg::Terminal(_) => Cmd::none(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        self.backdrop.paint(frame);
        chrome::draw(self, frame);
    }

    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Msg>>> {
        vec![Box::new(Every::new(RAIN_TICK, || Msg::RainTick))]
    }
}

/// Build a fake transaction hash: `0x` plus 64 random hex digits.
///
/// Driven by a simple LCG; the value is decorative and carries no
/// cryptographic meaning.
#[must_use]
pub fn fake_tx_hash(mut seed: u64) -> String {
    const HEX: &[u8] = b"0123456789abcdef";
    let mut out = String::with_capacity(66);
    out.push_str("0x");
    for _ in 0..64 {
        seed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        out.push(HEX[(seed >> 60) as usize] as char);
    }
    out
}

fn hash_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0x746f_6b65_6e66_6f72, |d| d.as_nanos() as u64)
}

/// Group a digits-only string with thousands separators for display.
#[must_use]
pub fn format_supply(digits: &str) -> String {
    if digits.is_empty() {
        return "0".into();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
