//! The board: link table and terminal square.
//!
//! Ships with the standard Milton Bradley layout of nine ladders and ten
//! chutes. One chute differs between editions: the chute ending on 26
//! starts on 47 in some printings and on 48 in others.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{BoardIssue, CnlResult};

/// The square a player must land on exactly to win.
pub const FINAL_POSITION: u8 = 100;

/// Start square of the edition-dependent chute that ends on 26.
pub const VARIANT_CHUTE_START: u8 = 47;

/// Destination of the edition-dependent chute.
const VARIANT_CHUTE_END: u8 = 26;

/// Standard links, excluding the edition-dependent chute.
const STANDARD_LINKS: [(u8, u8); 18] = [
    (1, 38),
    (4, 14),
    (9, 31),
    (16, 6),
    (21, 42),
    (28, 84),
    (36, 44),
    (49, 11),
    (51, 67),
    (56, 53),
    (62, 19),
    (64, 60),
    (71, 91),
    (80, 100),
    (87, 24),
    (93, 73),
    (95, 75),
    (98, 78),
];

/// Which printing of the board to use for the chute ending on 26.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ChuteVariant {
    /// The chute starts on square 47.
    #[default]
    Start47,
    /// The chute starts on square 48.
    Start48,
}

impl ChuteVariant {
    /// The start square of the variant chute.
    pub fn start(self) -> u8 {
        match self {
            Self::Start47 => VARIANT_CHUTE_START,
            Self::Start48 => VARIANT_CHUTE_START + 1,
        }
    }

    /// Parse a variant from its start square ("47" or "48").
    pub fn from_start(square: u8) -> Option<Self> {
        match square {
            47 => Some(Self::Start47),
            48 => Some(Self::Start48),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChuteVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.start())
    }
}

/// Whether a link moves the player forward or back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Climbs to a higher square.
    Ladder,
    /// Slides to a lower square.
    Chute,
}

impl std::fmt::Display for LinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ladder => write!(f, "ladder"),
            Self::Chute => write!(f, "chute"),
        }
    }
}

/// A single chute or ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Link {
    /// The square that triggers the link.
    pub from: u8,
    /// The square the player ends up on.
    pub to: u8,
}

impl Link {
    /// Ladder if the link climbs, chute if it slides.
    pub fn kind(self) -> LinkKind {
        if self.to > self.from {
            LinkKind::Ladder
        } else {
            LinkKind::Chute
        }
    }

    /// Number of squares gained (positive) or lost (negative).
    pub fn delta(self) -> i16 {
        i16::from(self.to) - i16::from(self.from)
    }
}

/// An immutable board layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    links: BTreeMap<u8, u8>,
    final_position: u8,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// The standard board with the chute starting on [`VARIANT_CHUTE_START`].
    pub fn standard() -> Self {
        Self::standard_variant(ChuteVariant::default())
    }

    /// The standard board for a specific edition.
    pub fn standard_variant(variant: ChuteVariant) -> Self {
        let mut links: BTreeMap<u8, u8> = STANDARD_LINKS.into_iter().collect();
        links.insert(variant.start(), VARIANT_CHUTE_END);
        Self {
            links,
            final_position: FINAL_POSITION,
        }
    }

    /// Build a board from a custom link table.
    ///
    /// Rejects endpoints off the board, links starting on 0 or the final
    /// square, self-links, duplicate sources, and links whose destination
    /// is another link's source.
    pub fn new(links: impl IntoIterator<Item = (u8, u8)>) -> CnlResult<Self> {
        let mut table = BTreeMap::new();
        for (from, to) in links {
            if from > FINAL_POSITION || to > FINAL_POSITION {
                return Err(BoardIssue::OutOfRange {
                    from,
                    to,
                    max: FINAL_POSITION,
                }
                .into());
            }
            if from == 0 || from == FINAL_POSITION {
                return Err(BoardIssue::ReservedSource(from).into());
            }
            if from == to {
                return Err(BoardIssue::SelfLink(from).into());
            }
            if table.insert(from, to).is_some() {
                return Err(BoardIssue::DuplicateSource(from).into());
            }
        }

        if let Some((&from, &to)) = table.iter().find(|(_, to)| table.contains_key(*to)) {
            return Err(BoardIssue::Chained {
                from,
                to,
                next: table[&to],
            }
            .into());
        }

        Ok(Self {
            links: table,
            final_position: FINAL_POSITION,
        })
    }

    /// Where a link starting on `position` leads, if there is one.
    pub fn link_destination(&self, position: u8) -> Option<u8> {
        self.links.get(&position).copied()
    }

    /// Whether `position` is the winning square.
    pub fn is_final(&self, position: u8) -> bool {
        position == self.final_position
    }

    /// Whether `position` triggers a link.
    pub fn is_link_source(&self, position: u8) -> bool {
        self.links.contains_key(&position)
    }

    /// The winning square.
    pub fn final_position(&self) -> u8 {
        self.final_position
    }

    /// All links in ascending order of source square.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.links.iter().map(|(&from, &to)| Link { from, to })
    }

    /// Number of links on the board.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// The chute with the largest drop.
    pub fn longest_chute(&self) -> Option<Link> {
        self.links()
            .filter(|l| l.kind() == LinkKind::Chute)
            .min_by_key(|l| l.delta())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CnlError;

    fn issue(result: CnlResult<Board>) -> BoardIssue {
        match result {
            Err(CnlError::InvalidBoard(issue)) => issue,
            other => panic!("expected board issue, got {other:?}"),
        }
    }

    #[test]
    fn standard_board_has_nineteen_links() {
        let board = Board::standard();
        assert_eq!(board.link_count(), 19);
        assert_eq!(board.link_destination(1), Some(38));
        assert_eq!(board.link_destination(47), Some(26));
        assert_eq!(board.link_destination(48), None);
        assert_eq!(board.link_destination(80), Some(100));
        assert_eq!(board.link_destination(2), None);
    }

    #[test]
    fn variant_moves_the_chute() {
        let board = Board::standard_variant(ChuteVariant::Start48);
        assert_eq!(board.link_count(), 19);
        assert_eq!(board.link_destination(47), None);
        assert_eq!(board.link_destination(48), Some(26));
    }

    #[test]
    fn variant_parsing() {
        assert_eq!(ChuteVariant::from_start(47), Some(ChuteVariant::Start47));
        assert_eq!(ChuteVariant::from_start(48), Some(ChuteVariant::Start48));
        assert_eq!(ChuteVariant::from_start(46), None);
        assert_eq!(ChuteVariant::Start48.to_string(), "48");
    }

    #[test]
    fn standard_board_passes_validation() {
        let board = Board::standard();
        let rebuilt = Board::new(board.links().map(|l| (l.from, l.to))).unwrap();
        assert_eq!(rebuilt, board);
    }

    #[test]
    fn final_square() {
        let board = Board::standard();
        assert!(board.is_final(100));
        assert!(!board.is_final(99));
        assert_eq!(board.final_position(), FINAL_POSITION);
    }

    #[test]
    fn kinds_and_counts() {
        let board = Board::standard();
        let ladders = board.links().filter(|l| l.kind() == LinkKind::Ladder).count();
        let chutes = board.links().filter(|l| l.kind() == LinkKind::Chute).count();
        assert_eq!(ladders, 9);
        assert_eq!(chutes, 10);
    }

    #[test]
    fn links_sorted_by_source() {
        let sources: Vec<u8> = Board::standard().links().map(|l| l.from).collect();
        let mut sorted = sources.clone();
        sorted.sort_unstable();
        assert_eq!(sources, sorted);
    }

    #[test]
    fn longest_chute_is_87() {
        let chute = Board::standard().longest_chute().unwrap();
        assert_eq!(chute, Link { from: 87, to: 24 });
        assert_eq!(chute.delta(), -63);
    }

    #[test]
    fn rejects_duplicate_source() {
        assert_eq!(
            issue(Board::new([(5, 10), (5, 20)])),
            BoardIssue::DuplicateSource(5)
        );
    }

    #[test]
    fn rejects_self_link() {
        assert_eq!(issue(Board::new([(5, 5)])), BoardIssue::SelfLink(5));
    }

    #[test]
    fn rejects_reserved_sources() {
        assert_eq!(issue(Board::new([(0, 10)])), BoardIssue::ReservedSource(0));
        assert_eq!(
            issue(Board::new([(100, 10)])),
            BoardIssue::ReservedSource(100)
        );
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            issue(Board::new([(5, 101)])),
            BoardIssue::OutOfRange { from: 5, to: 101, .. }
        ));
    }

    #[test]
    fn rejects_chained_links() {
        assert_eq!(
            issue(Board::new([(1, 38), (38, 4)])),
            BoardIssue::Chained {
                from: 1,
                to: 38,
                next: 4
            }
        );
    }

    #[test]
    fn empty_board_is_valid() {
        let board = Board::new([]).unwrap();
        assert_eq!(board.link_count(), 0);
        assert!(board.longest_chute().is_none());
    }
}
