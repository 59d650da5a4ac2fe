//! Presentation sinks.
//!
//! A sink receives exactly two kinds of writes: `clear` (back to the canonical
//! placeholders, chart disposed) and `render` (every field replaced from one
//! [`ViewModel`]). [`Screen`] is the in-memory state both front ends share.
use serde::Serialize;
use std::io::Write;

use crate::config::Config;
use crate::pokemon::StatValue;
use crate::view::{MoveLine, RadarChart, ViewModel};

pub const MISSING_INPUT_MESSAGE: &str = "Error! Enter a name or ID";
pub const NOT_FOUND_MESSAGE: &str = "Error! Pokémon not found";
/// Placeholder for id, region and types while nothing is rendered.
pub const FIELD_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearReason {
    MissingInput,
    NotFound,
}

impl ClearReason {
    pub fn message(&self) -> &'static str {
        match self {
            ClearReason::MissingInput => MISSING_INPUT_MESSAGE,
            ClearReason::NotFound => NOT_FOUND_MESSAGE,
        }
    }
}

pub trait PresentationSink: Send {
    /// Resets every field to its placeholder and disposes any chart. Idempotent.
    fn clear(&mut self, reason: ClearReason);

    /// Replaces every field from `view`.
    fn render(&mut self, view: &ViewModel);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenSettings {
    pub placeholder_sprite: String,
    /// Chart ceiling, or `None` when the chart is disabled.
    pub chart_ceiling: Option<u32>,
}

impl From<&Config> for ScreenSettings {
    fn from(config: &Config) -> Self {
        Self {
            placeholder_sprite: config.display.placeholder_sprite.clone(),
            chart_ceiling: config.chart.enabled.then_some(config.chart.ceiling),
        }
    }
}

/// Every displayed field, as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screen {
    pub message: Option<String>,
    pub name: String,
    pub id: String,
    pub sprite: String,
    pub region: String,
    pub types: String,
    pub moves: Vec<MoveLine>,
    pub average_move_power: String,
    pub average_base_stat: String,
    pub stats: Vec<StatValue>,
    pub chart: Option<RadarChart>,
    #[serde(skip)]
    settings: ScreenSettings,
}

impl Screen {
    pub fn new(settings: ScreenSettings) -> Self {
        let mut screen = Self {
            message: None,
            name: String::new(),
            id: String::new(),
            sprite: String::new(),
            region: String::new(),
            types: String::new(),
            moves: Vec::new(),
            average_move_power: String::new(),
            average_base_stat: String::new(),
            stats: Vec::new(),
            chart: None,
            settings,
        };
        screen.reset(None);
        screen
    }

    fn reset(&mut self, message: Option<String>) {
        self.chart = None;
        self.name = message.clone().unwrap_or_default();
        self.message = message;
        self.id = FIELD_PLACEHOLDER.to_string();
        self.sprite = self.settings.placeholder_sprite.clone();
        self.region = FIELD_PLACEHOLDER.to_string();
        self.types = FIELD_PLACEHOLDER.to_string();
        self.moves.clear();
        self.average_move_power.clear();
        self.average_base_stat.clear();
        self.stats.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.id == FIELD_PLACEHOLDER && self.moves.is_empty() && self.chart.is_none()
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", self.name));
        out.push_str(&format!("ID: {}\n", self.id));
        out.push_str(&format!("Sprite: {}\n", self.sprite));
        out.push_str(&format!("Region: {}\n", self.region));
        out.push_str(&format!("Type: {}\n", self.types));

        if !self.moves.is_empty() {
            out.push_str("Moves:\n");
            for mv in &self.moves {
                out.push_str(&format!(
                    "  {} (Type: {}, Power: {})\n    {}\n",
                    mv.name, mv.type_name, mv.power, mv.effect
                ));
            }
        }
        out.push_str(&format!("Average move power: {}\n", self.average_move_power));
        out.push_str(&format!("Average base stat: {}\n", self.average_base_stat));

        match &self.chart {
            Some(chart) => {
                out.push_str(&format!("Stats (scale 0-{}):\n", chart.ceiling));
                for axis in &chart.axes {
                    let width = (axis.ratio * 20.0).round() as usize;
                    out.push_str(&format!(
                        "  {:<16} {:>4} {}\n",
                        axis.label,
                        axis.value,
                        "#".repeat(width)
                    ));
                }
            }
            None if !self.stats.is_empty() => {
                out.push_str("Stats:\n");
                for stat in &self.stats {
                    out.push_str(&format!("  {:<16} {:>4}\n", stat.name, stat.base));
                }
            }
            None => {}
        }
        out
    }
}

impl PresentationSink for Screen {
    fn clear(&mut self, reason: ClearReason) {
        self.reset(Some(reason.message().to_string()));
    }

    fn render(&mut self, view: &ViewModel) {
        // The previous chart goes before anything new is drawn.
        self.chart = None;
        self.message = None;
        self.name = view.display_name();
        self.id = view.id.to_string();
        self.sprite = view
            .sprite
            .clone()
            .unwrap_or_else(|| self.settings.placeholder_sprite.clone());
        self.region = view.display_region();
        self.types = view.display_types();
        self.moves = view.display_moves();
        self.average_move_power = view.display_average_move_power();
        self.average_base_stat = view.display_average_base_stat();
        self.stats = view.stats.clone();
        self.chart = self.settings.chart_ceiling.map(|ceiling| view.chart(ceiling));
    }
}

/// Prints the screen to a writer after every write.
pub struct TerminalSink<W: Write + Send> {
    screen: Screen,
    out: W,
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(settings: ScreenSettings, out: W) -> Self {
        Self {
            screen: Screen::new(settings),
            out,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush_screen(&mut self) {
        let text = self.screen.to_text();
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            tracing::error!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write + Send> PresentationSink for TerminalSink<W> {
    fn clear(&mut self, reason: ClearReason) {
        self.screen.clear(reason);
        self.flush_screen();
    }

    fn render(&mut self, view: &ViewModel) {
        self.screen.render(view);
        self.flush_screen();
    }
}
