//! `BBBCCCVVV` Scripture references and display labels for ranges.
//!
//! A reference packs book (1-66), chapter and verse into one integer:
//!   040005003 -> MAT 5.3

/// First verse of the canon (GEN 1.1).
pub const CANON_START: i32 = 1_001_001;
/// Last verse of the canon (REV 22.21).
pub const CANON_END: i32 = 66_022_021;

const BOOK_CODES: [&str; 66] = [
  "GEN", "EXO", "LEV", "NUM", "DEU", "JOS", "JDG", "RUT", "1SA", "2SA",
  "1KI", "2KI", "1CH", "2CH", "EZR", "NEH", "EST", "JOB", "PSA", "PRO",
  "ECC", "SNG", "ISA", "JER", "LAM", "EZK", "DAN", "HOS", "JOL", "AMO",
  "OBA", "JON", "MIC", "NAM", "HAB", "ZEP", "HAG", "ZEC", "MAL", "MAT",
  "MRK", "LUK", "JHN", "ACT", "ROM", "1CO", "2CO", "GAL", "EPH", "PHP",
  "COL", "1TH", "2TH", "1TI", "2TI", "TIT", "PHM", "HEB", "JAS", "1PE",
  "2PE", "1JN", "2JN", "3JN", "JUD", "REV",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BcvRef {
  pub book: i32,
  pub chapter: i32,
  pub verse: i32,
}

impl BcvRef {
  pub fn parse(bbbcccvvv: i32) -> Self {
    Self {
      book: bbbcccvvv / 1_000_000,
      chapter: (bbbcccvvv / 1_000) % 1_000,
      verse: bbbcccvvv % 1_000,
    }
  }

  /// Three-letter book code, or `None` outside 1..=66.
  pub fn book_code(&self) -> Option<&'static str> {
    usize::try_from(self.book)
      .ok()
      .and_then(|b| b.checked_sub(1))
      .and_then(|i| BOOK_CODES.get(i).copied())
  }
}

/// Display label for a range, e.g. "MAT 5.3-12" or "MAT 5.3-MRK 1.1".
/// Unknown book numbers yield an empty label.
pub fn format_range(start: i32, end: i32) -> String {
  let s = BcvRef::parse(start);
  let e = BcvRef::parse(end);
  let (Some(s_book), Some(e_book)) = (s.book_code(), e.book_code()) else {
    return String::new();
  };

  let head = format!("{} {}.{}", s_book, s.chapter, s.verse);
  if s == e || end < start {
    head
  } else if s.book != e.book {
    format!("{}-{} {}.{}", head, e_book, e.chapter, e.verse)
  } else if s.chapter != e.chapter {
    format!("{}-{}.{}", head, e.chapter, e.verse)
  } else {
    format!("{}-{}", head, e.verse)
  }
}

/// True if the two inclusive ranges share at least one reference.
pub fn ranges_overlap(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> bool {
  a_start <= b_end && b_start <= a_end
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_splits_book_chapter_verse() {
    let r = BcvRef::parse(40_005_003);
    assert_eq!(r, BcvRef { book: 40, chapter: 5, verse: 3 });
    assert_eq!(r.book_code(), Some("MAT"));
    assert_eq!(BcvRef::parse(67_001_001).book_code(), None);
  }

  #[test]
  fn labels_follow_range_shape() {
    assert_eq!(format_range(40_005_003, 40_005_003), "MAT 5.3");
    assert_eq!(format_range(40_005_003, 40_005_012), "MAT 5.3-12");
    assert_eq!(format_range(40_005_003, 40_006_002), "MAT 5.3-6.2");
    assert_eq!(format_range(40_005_003, 41_001_001), "MAT 5.3-MRK 1.1");
    assert_eq!(format_range(CANON_START, CANON_START), "GEN 1.1");
  }

  #[test]
  fn unknown_books_give_empty_label() {
    assert_eq!(format_range(0, 0), "");
    assert_eq!(format_range(67_001_001, 67_001_002), "");
  }

  #[test]
  fn overlap_is_inclusive() {
    assert!(ranges_overlap(10, 20, 20, 30));
    assert!(!ranges_overlap(10, 19, 20, 30));
    assert!(ranges_overlap(CANON_START, CANON_END, 40_005_003, 40_005_003));
  }
}
