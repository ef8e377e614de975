//! Fill orientation of the grid.
//!
//! An orientation names the fill direction of the first (inner) axis followed
//! by the second (outer) axis: `lr-tb` fills each row left to right, then
//! moves down to the next row; `bt-rl` fills each column bottom to top, then
//! moves to the column on its left.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which axis is filled first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillOrder {
    /// Fill a whole row, then advance to the next row (`lr-*`, `rl-*`).
    RowMajor,
    /// Fill a whole column, then advance to the next column (`tb-*`, `bt-*`).
    ColumnMajor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalDirection {
    LeftToRight,
    RightToLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalDirection {
    TopToBottom,
    BottomToTop,
}

/// One of the eight fill orders of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Orientation {
    #[default]
    LrTb,
    LrBt,
    RlTb,
    RlBt,
    TbLr,
    TbRl,
    BtLr,
    BtRl,
}

impl Orientation {
    /// Every orientation, row-major ones first.
    pub const ALL: [Self; 8] = [
        Self::LrTb,
        Self::LrBt,
        Self::RlTb,
        Self::RlBt,
        Self::TbLr,
        Self::TbRl,
        Self::BtLr,
        Self::BtRl,
    ];

    /// Build an orientation from its three independent directives.
    #[must_use]
    pub const fn from_parts(
        order: FillOrder,
        horizontal: HorizontalDirection,
        vertical: VerticalDirection,
    ) -> Self {
        use HorizontalDirection::{LeftToRight, RightToLeft};
        use VerticalDirection::{BottomToTop, TopToBottom};
        match (order, horizontal, vertical) {
            (FillOrder::RowMajor, LeftToRight, TopToBottom) => Self::LrTb,
            (FillOrder::RowMajor, LeftToRight, BottomToTop) => Self::LrBt,
            (FillOrder::RowMajor, RightToLeft, TopToBottom) => Self::RlTb,
            (FillOrder::RowMajor, RightToLeft, BottomToTop) => Self::RlBt,
            (FillOrder::ColumnMajor, LeftToRight, TopToBottom) => Self::TbLr,
            (FillOrder::ColumnMajor, RightToLeft, TopToBottom) => Self::TbRl,
            (FillOrder::ColumnMajor, LeftToRight, BottomToTop) => Self::BtLr,
            (FillOrder::ColumnMajor, RightToLeft, BottomToTop) => Self::BtRl,
        }
    }

    #[must_use]
    pub const fn fill_order(self) -> FillOrder {
        match self {
            Self::LrTb | Self::LrBt | Self::RlTb | Self::RlBt => FillOrder::RowMajor,
            Self::TbLr | Self::TbRl | Self::BtLr | Self::BtRl => FillOrder::ColumnMajor,
        }
    }

    #[must_use]
    pub const fn horizontal(self) -> HorizontalDirection {
        match self {
            Self::RlTb | Self::RlBt | Self::TbRl | Self::BtRl => HorizontalDirection::RightToLeft,
            Self::LrTb | Self::LrBt | Self::TbLr | Self::BtLr => HorizontalDirection::LeftToRight,
        }
    }

    #[must_use]
    pub const fn vertical(self) -> VerticalDirection {
        match self {
            Self::LrTb | Self::RlTb | Self::TbLr | Self::TbRl => VerticalDirection::TopToBottom,
            Self::LrBt | Self::RlBt | Self::BtLr | Self::BtRl => VerticalDirection::BottomToTop,
        }
    }

    /// Columns advance towards decreasing x.
    #[must_use]
    pub const fn is_right_to_left(self) -> bool {
        matches!(self.horizontal(), HorizontalDirection::RightToLeft)
    }

    /// Rows advance towards decreasing y (y-up space).
    #[must_use]
    pub const fn is_top_to_bottom(self) -> bool {
        matches!(self.vertical(), VerticalDirection::TopToBottom)
    }

    /// Canonical string form, e.g. `"lr-tb"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LrTb => "lr-tb",
            Self::LrBt => "lr-bt",
            Self::RlTb => "rl-tb",
            Self::RlBt => "rl-bt",
            Self::TbLr => "tb-lr",
            Self::TbRl => "tb-rl",
            Self::BtLr => "bt-lr",
            Self::BtRl => "bt-rl",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = OrientationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|orientation| orientation.as_str() == s)
            .ok_or_else(|| OrientationParseError {
                input: s.to_string(),
            })
    }
}

impl TryFrom<String> for Orientation {
    type Error = OrientationParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Orientation> for String {
    fn from(value: Orientation) -> Self {
        value.as_str().to_string()
    }
}

/// Unknown orientation string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrientationParseError {
    pub input: String,
}

impl fmt::Display for OrientationParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown orientation {:?} (expected one of lr-tb, lr-bt, rl-tb, rl-bt, tb-lr, tb-rl, bt-lr, bt-rl)",
            self.input
        )
    }
}

impl std::error::Error for OrientationParseError {}
