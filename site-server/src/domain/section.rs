const SECTIONS: [&str; 3] = [
    "This is the home section. A real site would put its main information, \
     latest news or recommended content here. The fragment is fetched on \
     demand instead of being shipped with the initial page load.",
    "This is the about section. It introduces the team: background, mission, \
     vision and values. The details are only fetched when a visitor asks for \
     them.",
    "This is the contact section. It lists phone, email and postal address \
     along with a contact form, so visitors can always reach us.",
];

/// Text of the 1-based section `number`, or `None` when it does not exist.
pub(crate) fn section(number: i64) -> Option<&'static str> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    SECTIONS.get(index).copied()
}

pub(crate) fn section_count() -> usize {
    SECTIONS.len()
}

#[cfg(test)]
mod tests {
    use super::{SECTIONS, section, section_count};

    #[test]
    fn known_sections_return_fixed_texts() {
        assert_eq!(section(1), Some(SECTIONS[0]));
        assert_eq!(section(2), Some(SECTIONS[1]));
        assert_eq!(section(3), Some(SECTIONS[2]));
        assert_eq!(section_count(), 3);
    }

    #[test]
    fn other_indices_are_not_found() {
        for number in [0, 4, -1, i64::MIN, i64::MAX] {
            assert_eq!(section(number), None, "section {number}");
        }
    }
}
