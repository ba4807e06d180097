//! Line-level diff engine for multi-panel text comparison.
//!
//! The first panel of a [`PanelSet`] is the base; every other panel is diffed
//! line-by-line against it. Everything here is a pure function over text
//! snapshots: each edit produces fresh values and nothing is mutated in place.
//!
//! # Architecture
//!
//! ```text
//! panel text ──► diff ──► EditScript ──┬─► line_numbers (gutter numbers)
//!                                      ├─► matches (diff index -> plain line)
//!                                      ├─► gutter (rows for rendering)
//!                                      └─► summary
//! panel text ──► fold (brace ranges, independent of the diff)
//! query ──► search (Matcher) ──► Match offsets ──► matches (line + columns)
//! ```
//!
//! 1. [`diff`] - LCS alignment producing an [`EditScript`]
//! 2. [`line_numbers`] - Base/comparison line numbers per script entry
//! 3. [`fold`] - Foldable brace ranges and per-panel [`FoldState`]
//! 4. [`matches`] - Line-start offsets and match-to-line assignment
//! 5. [`search`] - The pattern engine seam ([`Matcher`]) plus find/replace
//! 6. [`panel`] and [`derived`] - Panels and the `panel id -> artifacts` table
//!
//! # Limits
//!
//! [`diff`] is O(n·m) in time and memory over line counts. That is fine for
//! interactive editing of moderate texts; callers wanting responsiveness on
//! large inputs should run it off their main thread.

pub mod derived;
pub mod diff;
pub mod fold;
pub mod gutter;
pub mod line_numbers;
pub mod matches;
pub mod panel;
pub mod search;
pub mod summary;
pub mod text;

pub use derived::{DerivedPanel, DerivedTable, PanelMatches};
pub use diff::{diff, diff_lines, DiffLine, DiffStats, EditScript, LineKind};
pub use fold::{find_foldable_ranges, FoldState, FoldableRange};
pub use gutter::{gutter_rows, GutterRow};
pub use line_numbers::{project_base_panel, project_line_numbers, LineNumberPair};
pub use matches::{
    assign_matches, build_line_start_offsets, diff_to_plain_lines, group_by_line,
    line_for_offset, LineMatch, LineStartOffsets, Match,
};
pub use panel::{Panel, PanelError, PanelId, PanelSet, MAX_PANELS, MIN_PANELS};
pub use search::{
    find_matches, find_or_empty, replace_all, replace_match, FindOptions, FindSession, Matcher,
    PatternMatcher, SearchError,
};
pub use summary::simple_summary;
