//! Grid planning: how many columns and rows to deal for a viewport and mode,
//! and how large each card should be drawn.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Horizontal space reserved around the board (px).
pub const HORIZONTAL_PADDING: f64 = 40.0;
/// Gap between neighbouring cards (px).
pub const CARD_GAP: f64 = 10.0;
/// Widest the board is allowed to grow (px).
pub const MAX_BOARD_WIDTH: f64 = 1400.0;
/// Share of the viewport height the board may occupy when bounding rows.
pub const ROW_HEIGHT_SHARE: f64 = 0.6;
/// Share of the viewport height used for the height-based card size.
pub const CARD_HEIGHT_SHARE: f64 = 0.7;
/// Rows assumed when sizing a card from the viewport height.
pub const REFERENCE_ROWS: f64 = 6.0;
/// Largest side accepted for a custom grid. Larger requests are rejected.
pub const CUSTOM_MAX_SIDE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceTier {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceTier {
    pub fn from_width(width: f64) -> Self {
        if width <= 768.0 {
            DeviceTier::Mobile
        } else if width <= 1024.0 {
            DeviceTier::Tablet
        } else {
            DeviceTier::Desktop
        }
    }

    /// Pairs dealt in `auto` mode.
    pub fn auto_pairs(self) -> usize {
        match self {
            DeviceTier::Mobile => 8,
            DeviceTier::Tablet => 12,
            DeviceTier::Desktop => 18,
        }
    }

    /// (min, max) card side in px.
    pub fn card_size_bounds(self) -> (f64, f64) {
        match self {
            DeviceTier::Mobile => (50.0, 110.0),
            DeviceTier::Tablet => (70.0, 140.0),
            DeviceTier::Desktop => (80.0, 160.0),
        }
    }

    /// (min, max) column count for a planned grid.
    pub fn column_bounds(self, mode: &GridMode) -> (u32, u32) {
        match self {
            DeviceTier::Mobile => (2, 3),
            DeviceTier::Tablet => (3, 4),
            DeviceTier::Desktop => match mode {
                GridMode::Easy | GridMode::Medium => (4, 5),
                _ => (4, 6),
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn tier(&self) -> DeviceTier {
        DeviceTier::from_width(self.width)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    #[default]
    Auto,
    Easy,
    Medium,
    Hard,
    Custom { columns: u32, rows: u32 },
}

impl GridMode {
    fn target_pairs(&self, tier: DeviceTier) -> usize {
        match self {
            GridMode::Auto => tier.auto_pairs(),
            GridMode::Easy => 6,
            GridMode::Medium => 12,
            GridMode::Hard => 18,
            GridMode::Custom { columns, rows } => (*columns as usize * *rows as usize).div_ceil(2),
        }
    }
}

impl FromStr for GridMode {
    type Err = GameError;

    /// Accepts `auto`, `easy`, `medium`, `hard` and `<cols>x<rows>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        match value.as_str() {
            "auto" => return Ok(GridMode::Auto),
            "easy" => return Ok(GridMode::Easy),
            "medium" => return Ok(GridMode::Medium),
            "hard" => return Ok(GridMode::Hard),
            _ => {}
        }
        let invalid = || GameError::InvalidGridMode(s.to_string());
        let (cols, rows) = value.split_once('x').ok_or_else(invalid)?;
        let columns = cols.trim().parse().map_err(|_| invalid())?;
        let rows = rows.trim().parse().map_err(|_| invalid())?;
        Ok(GridMode::Custom { columns, rows })
    }
}

impl fmt::Display for GridMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridMode::Auto => f.write_str("auto"),
            GridMode::Easy => f.write_str("easy"),
            GridMode::Medium => f.write_str("medium"),
            GridMode::Hard => f.write_str("hard"),
            GridMode::Custom { columns, rows } => write!(f, "{columns}x{rows}"),
        }
    }
}

/// A dealt layout. `columns * rows == total_cards`, always even, both sides ≥ 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
    pub total_cards: u32,
}

impl GridSpec {
    fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            total_cards: columns * rows,
        }
    }

    pub fn total_pairs(&self) -> usize {
        self.total_cards as usize / 2
    }
}

/// Plan the grid for `mode` on `viewport` given how many pairs can be drawn.
pub fn plan(mode: GridMode, viewport: Viewport, available_pairs: usize) -> Result<GridSpec, GameError> {
    if available_pairs < 2 {
        return Err(GameError::InsufficientCards {
            required: 2,
            available: available_pairs,
        });
    }
    match mode {
        GridMode::Custom { columns, rows } => plan_custom(columns, rows, available_pairs),
        _ => plan_adaptive(mode, viewport, available_pairs),
    }
}

/// `auto` is capped by the pool. The fixed difficulties need their full pair count.
fn plan_adaptive(mode: GridMode, viewport: Viewport, available_pairs: usize) -> Result<GridSpec, GameError> {
    let tier = viewport.tier();
    let wanted = mode.target_pairs(tier);
    let auto = matches!(mode, GridMode::Auto);
    if !auto && wanted > available_pairs {
        return Err(GameError::InsufficientCards {
            required: wanted,
            available: available_pairs,
        });
    }
    let target = wanted.min(available_pairs);
    let (min_cols, max_cols) = tier.column_bounds(&mode);
    let (min_card, _) = tier.card_size_bounds();

    let fit = ((viewport.width - HORIZONTAL_PADDING).max(0.0) / (min_card + CARD_GAP)).floor() as u32;
    let mut columns = fit.clamp(min_cols, max_cols);

    let mut rows = ((2 * target) as u32).div_ceil(columns).max(2);
    if (columns * rows) % 2 == 1 {
        rows += 1;
    }

    let max_rows = max_rows(viewport, tier);
    if rows > max_rows {
        rows = max_rows;
        if (columns * rows) % 2 == 1 {
            rows -= 1;
        }
        rows = rows.max(2);
    }

    // Auto shrinks until the pool can fill the board. 2x2 always fits since available >= 2.
    let capacity = 2 * available_pairs as u32;
    while auto && (columns * rows > capacity || (columns * rows) % 2 == 1) {
        if rows > 2 {
            rows -= 1;
        } else if columns > 2 {
            columns -= 1;
        } else {
            break;
        }
    }

    // Rounding rows up can ask for more pairs than the difficulty names.
    let spec = GridSpec::new(columns, rows);
    if spec.total_pairs() > available_pairs {
        return Err(GameError::InsufficientCards {
            required: spec.total_pairs(),
            available: available_pairs,
        });
    }
    Ok(spec)
}

fn max_rows(viewport: Viewport, tier: DeviceTier) -> u32 {
    let (min_card, _) = tier.card_size_bounds();
    let rows = (viewport.height.max(0.0) * ROW_HEIGHT_SHARE / (min_card + CARD_GAP)).floor() as u32;
    rows.max(2)
}

fn plan_custom(columns: u32, rows: u32, available_pairs: usize) -> Result<GridSpec, GameError> {
    if columns > CUSTOM_MAX_SIDE || rows > CUSTOM_MAX_SIDE {
        return Err(GameError::InvalidGridMode(format!(
            "{columns}x{rows} (at most {CUSTOM_MAX_SIDE} per side)"
        )));
    }
    let mut columns = columns.max(2);
    let mut rows = rows.max(2);
    if (columns * rows) % 2 == 1 {
        // Both sides odd: grow the side that adds fewer cards.
        if columns <= rows {
            rows += 1;
        } else {
            columns += 1;
        }
    }
    let spec = GridSpec::new(columns, rows);
    if spec.total_pairs() > available_pairs {
        return Err(GameError::InsufficientCards {
            required: spec.total_pairs(),
            available: available_pairs,
        });
    }
    Ok(spec)
}

/// Card side in px for the rendered column count on the current viewport.
pub fn card_size(columns: u32, viewport: Viewport) -> f64 {
    let columns = columns.max(1) as f64;
    let usable = viewport.width.min(MAX_BOARD_WIDTH) - HORIZONTAL_PADDING - CARD_GAP * (columns - 1.0);
    let by_width = usable / columns;
    let by_height = viewport.height * CARD_HEIGHT_SHARE / REFERENCE_ROWS;
    let (min, max) = viewport.tier().card_size_bounds();
    by_width.min(by_height).clamp(min, max)
}
