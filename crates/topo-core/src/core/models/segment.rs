use super::position::Position;
use serde::Serialize;

/// Which side of the membrane a segment lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Outside,
    Inside,
}

impl Side {
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            'o' => Some(Self::Outside),
            'i' => Some(Self::Inside),
            _ => None,
        }
    }
}

/// A topology interval, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Segment {
    pub start: u32,
    pub end: u32,
}

impl Segment {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position.value() && position.value() <= self.end
    }
}

/// The outside- and inside-membrane segments of one protein, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MembraneDomains {
    pub outside: Vec<Segment>,
    pub inside: Vec<Segment>,
}

impl MembraneDomains {
    pub fn new(outside: Vec<Segment>, inside: Vec<Segment>) -> Self {
        Self { outside, inside }
    }

    pub fn segments(&self, side: Side) -> &[Segment] {
        match side {
            Side::Outside => &self.outside,
            Side::Inside => &self.inside,
        }
    }

    pub(crate) fn push(&mut self, side: Side, segment: Segment) {
        match side {
            Side::Outside => self.outside.push(segment),
            Side::Inside => self.inside.push(segment),
        }
    }

    /// True when `position` falls within at least one outside-membrane segment.
    pub fn is_outside(&self, position: Position) -> bool {
        self.outside.iter().any(|segment| segment.contains(position))
    }

    pub fn is_empty(&self) -> bool {
        self.outside.is_empty() && self.inside.is_empty()
    }

    /// Largest segment end across both sides, if any segment exists.
    pub fn max_end(&self) -> Option<u32> {
        self.outside
            .iter()
            .chain(self.inside.iter())
            .map(|segment| segment.end)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_contains_is_inclusive_on_both_ends() {
        let segment = Segment::new(10, 20);
        assert!(segment.contains(Position::new(10)));
        assert!(segment.contains(Position::new(15)));
        assert!(segment.contains(Position::new(20)));
        assert!(!segment.contains(Position::new(9)));
        assert!(!segment.contains(Position::new(21)));
    }

    #[test]
    fn is_outside_checks_every_outside_segment() {
        let domains = MembraneDomains::new(
            vec![Segment::new(0, 10), Segment::new(20, 30)],
            vec![Segment::new(11, 19)],
        );
        assert!(domains.is_outside(Position::new(5)));
        assert!(domains.is_outside(Position::new(25)));
        assert!(!domains.is_outside(Position::new(15)));
        assert!(!domains.is_outside(Position::new(31)));
    }

    #[test]
    fn is_outside_is_false_without_outside_segments() {
        let domains = MembraneDomains::new(vec![], vec![Segment::new(0, 100)]);
        assert!(!domains.is_outside(Position::new(50)));
    }

    #[test]
    fn side_from_marker_recognizes_only_o_and_i() {
        assert_eq!(Side::from_marker('o'), Some(Side::Outside));
        assert_eq!(Side::from_marker('i'), Some(Side::Inside));
        assert_eq!(Side::from_marker('-'), None);
        assert_eq!(Side::from_marker('O'), None);
    }

    #[test]
    fn max_end_spans_both_sides() {
        let domains = MembraneDomains::new(vec![Segment::new(0, 10)], vec![Segment::new(40, 90)]);
        assert_eq!(domains.max_end(), Some(90));
        assert_eq!(MembraneDomains::default().max_end(), None);
    }
}
