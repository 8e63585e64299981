use crate::presets::{load_aspect_presets, load_base_resolutions};
use crate::settings::SavedSettings;
use itertools::Itertools;
use log::{debug, info};
use resolver::types::Resolution;
use resolver::Resolver;
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Width and height shown before anything is selected
const DEFAULT_DIMENSION: u64 = 512;

#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command `{0}`")]
    UnknownCommand(String),
    #[error("`{0}` expects {1} argument(s)")]
    WrongArguments(String, usize),
    #[error("Failed to serialize table")]
    Serialize(#[from] serde_json::Error),
}

pub type SelectorResult<T> = Result<T, SelectorError>;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SelectorMessage {
    /// Re-read both lists and rebuild the table
    Refresh,
    SelectionChanged { aspect: String, base: String },
    /// Only the aspect dropdown moved
    AspectChanged(String),
    /// Only the base resolution dropdown moved
    BaseChanged(String),
    Show,
    DumpTable,
    Quit,
}

impl FromStr for SelectorMessage {
    type Err = SelectorError;

    fn from_str(s: &str) -> SelectorResult<Self> {
        let mut words = s.split_whitespace();
        let command = words.next().ok_or(SelectorError::Empty)?;
        let args: Vec<&str> = words.collect();
        let arity = |count: usize| -> SelectorResult<()> {
            if args.len() == count {
                Ok(())
            } else {
                Err(SelectorError::WrongArguments(command.to_string(), count))
            }
        };
        match command {
            "refresh" => arity(0).map(|_| SelectorMessage::Refresh),
            "select" => arity(2).map(|_| SelectorMessage::SelectionChanged {
                aspect: args[0].to_string(),
                base: args[1].to_string(),
            }),
            "aspect" => arity(1).map(|_| SelectorMessage::AspectChanged(args[0].to_string())),
            "base" => arity(1).map(|_| SelectorMessage::BaseChanged(args[0].to_string())),
            "show" => arity(0).map(|_| SelectorMessage::Show),
            "table" => arity(0).map(|_| SelectorMessage::DumpTable),
            "quit" | "exit" => arity(0).map(|_| SelectorMessage::Quit),
            other => Err(SelectorError::UnknownCommand(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Reply {
    Choices {
        presets: Vec<String>,
        bases: Vec<String>,
    },
    Dimensions {
        width: u64,
        height: u64,
    },
    Status {
        aspect: String,
        base: String,
        width: u64,
        height: u64,
    },
    Table(String),
    Exit,
}

impl Display for Reply {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Choices { presets, bases } => write!(
                f,
                "presets: {}\nbases: {}",
                presets.iter().join(", "),
                bases.iter().join(", ")
            ),
            Reply::Dimensions { width, height } => write!(f, "{}x{}", width, height),
            Reply::Status {
                aspect,
                base,
                width,
                height,
            } => write!(f, "aspect {} base {} -> {}x{}", aspect, base, width, height),
            Reply::Table(json) => write!(f, "{}", json),
            Reply::Exit => Ok(()),
        }
    }
}

#[derive(Serialize)]
struct TableRow<'a> {
    base: &'a str,
    aspect: &'a str,
    resolution: Option<Resolution>,
}

/// Host side of the resolver: owns the dropdown lists, the current selection and the
/// width/height fields that selections write into.
#[derive(Debug)]
pub(crate) struct AspectSelector {
    settings: SavedSettings,
    resolver: Resolver,
    aspect_presets: Vec<String>,
    base_resolutions: Vec<String>,
    selected_aspect: String,
    selected_base: String,
    width: u64,
    height: u64,
}

impl AspectSelector {
    pub(crate) async fn new(settings: SavedSettings) -> Self {
        let presets = load_aspect_presets(&settings.presets_path()).await;
        let bases = load_base_resolutions(&settings.resolutions_path()).await;
        Self::with_lists(settings, presets, bases)
    }

    /// Builds a selector from lists that were already loaded, selecting the first entry of each
    pub(crate) fn with_lists(
        settings: SavedSettings,
        aspect_presets: Vec<String>,
        base_resolutions: Vec<String>,
    ) -> Self {
        let resolver = Resolver::new(&aspect_presets, &base_resolutions);
        Self {
            settings,
            resolver,
            selected_aspect: aspect_presets.first().cloned().unwrap_or_default(),
            selected_base: base_resolutions.first().cloned().unwrap_or_default(),
            aspect_presets,
            base_resolutions,
            width: DEFAULT_DIMENSION,
            height: DEFAULT_DIMENSION,
        }
    }

    pub(crate) fn dimensions(&self) -> (u64, u64) {
        (self.width, self.height)
    }

    pub(crate) async fn update(&mut self, message: SelectorMessage) -> SelectorResult<Reply> {
        let reply = match message {
            SelectorMessage::Refresh => self.refresh().await,
            SelectorMessage::SelectionChanged { aspect, base } => {
                self.apply_selection(aspect, base)
            }
            SelectorMessage::AspectChanged(aspect) => {
                let base = self.selected_base.clone();
                self.apply_selection(aspect, base)
            }
            SelectorMessage::BaseChanged(base) => {
                let aspect = self.selected_aspect.clone();
                self.apply_selection(aspect, base)
            }
            SelectorMessage::Show => {
                let (width, height) = self.dimensions();
                Reply::Status {
                    aspect: self.selected_aspect.clone(),
                    base: self.selected_base.clone(),
                    width,
                    height,
                }
            }
            SelectorMessage::DumpTable => {
                let rows: Vec<_> = self
                    .resolver
                    .table()
                    .iter()
                    .map(|(base, aspect, resolution)| TableRow {
                        base,
                        aspect,
                        resolution,
                    })
                    .collect();
                Reply::Table(serde_json::to_string(&rows)?)
            }
            SelectorMessage::Quit => Reply::Exit,
        };
        Ok(reply)
    }

    async fn refresh(&mut self) -> Reply {
        self.aspect_presets = load_aspect_presets(&self.settings.presets_path()).await;
        self.base_resolutions = load_base_resolutions(&self.settings.resolutions_path()).await;
        self.resolver
            .refresh(&self.aspect_presets, &self.base_resolutions);
        Reply::Choices {
            presets: self.aspect_presets.clone(),
            bases: self.base_resolutions.clone(),
        }
    }

    fn apply_selection(&mut self, aspect: String, base: String) -> Reply {
        match self.resolver.resolve(&base, &aspect) {
            Some(resolution) => {
                info!("Selected aspect: {} -> resolution: {}", aspect, resolution);
                let (x, y) = resolution.aspect_ratio();
                debug!("Effective ratio after rounding is {}:{}", x, y);
                self.width = resolution.width;
                self.height = resolution.height;
            }
            None => debug!(
                "No resolution for aspect {} at base {}, keeping {}x{}",
                aspect, base, self.width, self.height
            ),
        }
        self.selected_aspect = aspect;
        self.selected_base = base;
        Reply::Dimensions {
            width: self.width,
            height: self.height,
        }
    }
}
