//! Shared identifiers and aliases used across the engine.

use std::collections::{HashMap, HashSet};

/// Integer index of a catalog item, valid in `[0, catalog size)`.
pub type ItemId = usize;

/// One round's feedback: item id to signed score.
///
/// Scores are `1` (positive), `-1` (negative), or `0` (shown but not
/// scored; still excluded from future batches and still diluting the
/// round's confidence).
pub type FeedbackRound = HashMap<ItemId, i8>;

/// Item ids already shown to the user or explicitly excluded by the
/// caller. Grows monotonically over a session.
pub type ExcludedItems = HashSet<ItemId>;
